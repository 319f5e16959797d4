use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

pub use cell::*;
pub use engine::*;
pub use generator::*;

mod cell;
mod engine;
mod generator;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinesweeperConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl MinesweeperConfig {
    /// Validates the board shape and mine count; at least one safe cell must remain.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if mines >= mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self { size, mines })
    }

    pub const fn beginner() -> Self {
        Self {
            size: (9, 9),
            mines: 10,
        }
    }

    pub const fn intermediate() -> Self {
        Self {
            size: (16, 16),
            mines: 40,
        }
    }

    pub const fn expert() -> Self {
        Self {
            size: (16, 30),
            mines: 99,
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Zero for a hand-built config that asks for more mines than cells.
    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for MinesweeperConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Placed mines plus the adjacency counts derived from them. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    adjacent: Array2<u8>,
    size: Coord2,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let size: Coord2 = (
            rows.try_into().map_err(|_| GameError::InvalidDimensions)?,
            cols.try_into().map_err(|_| GameError::InvalidDimensions)?,
        );
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }
        Ok(Self::from_valid_mask(mine_mask, size))
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoordinate);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_valid_mask(mine_mask, size))
    }

    /// `mine_mask` must already have the shape `size`.
    pub(crate) fn from_valid_mask(mine_mask: Array2<bool>, size: Coord2) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        let mut adjacent: Array2<u8> = Array2::zeros(size.to_nd_index());
        for row in 0..size.0 {
            for col in 0..size.1 {
                let coords = (row, col);
                if mine_mask[coords.to_nd_index()] {
                    continue;
                }
                adjacent[coords.to_nd_index()] = iter_neighbors(coords, size)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8;
            }
        }

        Self {
            mine_mask,
            adjacent,
            size,
            mine_count,
        }
    }

    pub fn config(&self) -> MinesweeperConfig {
        MinesweeperConfig {
            size: self.size,
            mines: self.mine_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate)
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Number of mines around a safe cell. Always 0 for a mine cell.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacent[coords.to_nd_index()]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        iter_neighbors(coords, self.size)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}
