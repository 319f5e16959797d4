use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::*;

/// Largest tile a merge can produce; two of these stay side by side.
pub const MAX_TILE: u32 = 1 << 31;

/// Square grid of tiles, 0 for empty, otherwise a power of two of at least 2.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Array2<u32>", into = "Array2<u32>")]
pub struct SlidingGrid {
    tiles: Array2<u32>,
}

impl SlidingGrid {
    pub fn new(size: Coord) -> Result<Self> {
        if size < 2 {
            return Err(GameError::InvalidDimensions);
        }
        Ok(Self::empty(size))
    }

    /// Empty grid, sizes below 2 are raised to 2.
    pub(crate) fn empty(size: Coord) -> Self {
        let size = size.max(2);
        Self {
            tiles: Array2::zeros((size, size).to_nd_index()),
        }
    }

    /// Builds a grid from `size * size` row-major values.
    pub fn from_row_major(size: Coord, values: &[u32]) -> Result<Self> {
        if values.len() != usize::from(mult(size, size)) {
            return Err(GameError::InvalidDimensions);
        }
        let tiles = Array2::from_shape_vec((size, size).to_nd_index(), values.to_vec())
            .map_err(|_| GameError::InvalidDimensions)?;
        Self::try_from(tiles)
    }

    pub fn size(&self) -> Coord {
        // square and at most `Coord::MAX` wide, checked on construction
        self.tiles.nrows() as Coord
    }

    pub fn tiles(&self) -> &Array2<u32> {
        &self.tiles
    }

    pub fn get(&self, coords: Coord2) -> Result<u32> {
        if in_bounds(coords, (self.size(), self.size())) {
            Ok(self.tiles[coords.to_nd_index()])
        } else {
            Err(GameError::InvalidCoordinate)
        }
    }

    pub fn to_row_major(&self) -> Vec<u32> {
        self.tiles.iter().copied().collect()
    }

    pub fn tile_sum(&self) -> u64 {
        self.tiles.iter().map(|&value| u64::from(value)).sum()
    }

    pub fn max_tile(&self) -> u32 {
        self.tiles.iter().copied().max().unwrap_or(0)
    }

    pub fn empty_cells(&self) -> Vec<Coord2> {
        self.tiles
            .indexed_iter()
            .filter(|&(_, &value)| value == 0)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.tiles.iter().filter(|&&value| value == 0).count()
    }

    pub fn has_adjacent_pair(&self) -> bool {
        let n = self.tiles.nrows();
        (0..n).any(|row| {
            (0..n).any(|col| {
                let value = self.tiles[[row, col]];
                (col + 1 < n && self.tiles[[row, col + 1]] == value)
                    || (row + 1 < n && self.tiles[[row + 1, col]] == value)
            })
        })
    }

    /// Grid after sliding toward `direction`, and the score gained by merges.
    pub fn slid(&self, direction: Direction) -> (Self, u32) {
        let n = self.tiles.nrows();
        let mut next = self.clone();
        let mut gained = 0;

        for lane in 0..n {
            let mut line: SmallVec<[u32; 8]> = (0..n)
                .map(|step| self.tiles[lane_index(direction, lane, step, n)])
                .collect();
            gained = slide_line(&mut line).saturating_add(gained);
            for (step, &value) in line.iter().enumerate() {
                next.tiles[lane_index(direction, lane, step, n)] = value;
            }
        }

        (next, gained)
    }

    pub(crate) fn set(&mut self, coords: Coord2, value: u32) {
        self.tiles[coords.to_nd_index()] = value;
    }
}

pub(crate) const fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

impl TryFrom<Array2<u32>> for SlidingGrid {
    type Error = GameError;

    fn try_from(tiles: Array2<u32>) -> Result<Self> {
        let (rows, cols) = tiles.dim();
        if rows != cols || rows < 2 || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidDimensions);
        }
        if !tiles.iter().all(|&value| is_valid_tile(value)) {
            return Err(GameError::InvalidTile);
        }
        Ok(Self { tiles })
    }
}

impl From<SlidingGrid> for Array2<u32> {
    fn from(grid: SlidingGrid) -> Self {
        grid.tiles
    }
}

/// Position of the `step`-th cell counted from the leading edge of `lane`.
fn lane_index(direction: Direction, lane: usize, step: usize, n: usize) -> [usize; 2] {
    match direction {
        Direction::Left => [lane, step],
        Direction::Right => [lane, n - 1 - step],
        Direction::Up => [step, lane],
        Direction::Down => [n - 1 - step, lane],
    }
}

/// Compacts `line` toward index 0, merging equal neighbors once per move, scanning
/// from index 0. Returns the sum of the merged tiles, saturating at `u32::MAX`.
/// Tiles of [`MAX_TILE`] never merge.
pub fn slide_line(line: &mut [u32]) -> u32 {
    let mut write = 0;
    let mut mergeable: Option<usize> = None;
    let mut gained = 0;

    for read in 0..line.len() {
        let value = line[read];
        if value == 0 {
            continue;
        }
        line[read] = 0;

        match mergeable {
            Some(target) if line[target] == value && value < MAX_TILE => {
                line[target] = value * 2;
                gained = line[target].saturating_add(gained);
                // a merged tile can't merge again this move
                mergeable = None;
            }
            _ => {
                line[write] = value;
                mergeable = Some(write);
                write += 1;
            }
        }
    }

    gained
}
