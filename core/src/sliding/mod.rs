use serde::{Deserialize, Serialize};

use crate::*;

pub use engine::*;
pub use grid::*;

mod engine;
mod grid;

/// The four possible slide directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidingConfig {
    pub size: Coord,
    pub win_tile: u32,
    pub start_tiles: u8,
}

impl SlidingConfig {
    pub fn new(size: Coord, win_tile: u32, start_tiles: u8) -> Result<Self> {
        if size < 2 {
            return Err(GameError::InvalidDimensions);
        }
        if win_tile < 4 || !win_tile.is_power_of_two() {
            return Err(GameError::InvalidTile);
        }
        let start_tiles = CellCount::from(start_tiles).min(mult(size, size)) as u8;
        Ok(Self {
            size,
            win_tile,
            start_tiles,
        })
    }
}

impl Default for SlidingConfig {
    fn default() -> Self {
        Self {
            size: 4,
            win_tile: 2048,
            start_tiles: 2,
        }
    }
}
