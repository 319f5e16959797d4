use serde::{Deserialize, Serialize};

/// Canonical player-visible state stored by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed(u8),
    Flagged,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Full view of a single cell, combining the mine layout with the player's marks.
///
/// Before the first reveal no mines are placed, so `is_mine` is false everywhere.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinesweeperCell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mine_count: u8,
}

// what a renderer should draw; mines only show up once the game is over
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Revealed(u8),
    Flagged,
    Mine,
    Exploded,
    MisplacedFlag,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

impl From<CellState> for CellView {
    fn from(other: CellState) -> Self {
        match other {
            CellState::Hidden => CellView::Hidden,
            CellState::Revealed(count) => CellView::Revealed(count),
            CellState::Flagged => CellView::Flagged,
        }
    }
}
