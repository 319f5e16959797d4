//! Tic-tac-toe against an optimal bot.
//!
//! The board is a 9-cell row-major array, index `row * 3 + col`. The outcome is always
//! derived from the cells alone, so a board value fully describes a position except for
//! whose turn it is.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

pub use engine::*;
pub use search::*;

mod engine;
mod search;

pub const CELL_COUNT: usize = 9;

/// Rows, columns, then both diagonals.
pub const LINES: [[u8; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    Human,
    Bot,
}

impl Mark {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Human => Self::Bot,
            Self::Bot => Self::Human,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicTacToeStatus {
    InProgress,
    HumanWin,
    BotWin,
    Draw,
}

impl TicTacToeStatus {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl Default for TicTacToeStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

impl From<TicTacToeStatus> for GameOutcome {
    fn from(status: TicTacToeStatus) -> Self {
        match status {
            TicTacToeStatus::InProgress => GameOutcome::InProgress,
            TicTacToeStatus::HumanWin => GameOutcome::Won,
            TicTacToeStatus::BotWin => GameOutcome::Lost,
            TicTacToeStatus::Draw => GameOutcome::Draw,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeConfig {
    pub first: Mark,
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self { first: Mark::Human }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicTacToeBoard {
    cells: [Option<Mark>; CELL_COUNT],
}

impl TicTacToeBoard {
    pub const fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    pub const fn from_cells(cells: [Option<Mark>; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub const fn cells(&self) -> &[Option<Mark>; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: u8) -> Result<Option<Mark>> {
        self.cells
            .get(usize::from(index))
            .copied()
            .ok_or(GameError::InvalidCoordinate)
    }

    /// Copy of this board with `mark` placed at `index`; the cell must be empty.
    pub fn with_mark(mut self, index: u8, mark: Mark) -> Self {
        debug_assert!(self.cells[usize::from(index)].is_none());
        self.cells[usize::from(index)] = Some(mark);
        self
    }

    pub fn empty_cells(&self) -> SmallVec<[u8; CELL_COUNT]> {
        (0..CELL_COUNT as u8)
            .filter(|&index| self.cells[usize::from(index)].is_none())
            .collect()
    }

    pub fn move_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// First completed line and its owner.
    pub fn winning_line(&self) -> Option<(Mark, [u8; 3])> {
        LINES.iter().find_map(|&line| {
            let [a, b, c] = line.map(|index| self.cells[usize::from(index)]);
            match a {
                Some(mark) if b == a && c == a => Some((mark, line)),
                _ => None,
            }
        })
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winning_line().map(|(mark, _)| mark)
    }

    pub fn has_line(&self, mark: Mark) -> bool {
        LINES.iter().any(|line| {
            line.iter()
                .all(|&index| self.cells[usize::from(index)] == Some(mark))
        })
    }

    pub fn status(&self) -> TicTacToeStatus {
        match self.winner() {
            Some(Mark::Human) => TicTacToeStatus::HumanWin,
            Some(Mark::Bot) => TicTacToeStatus::BotWin,
            None if self.is_full() => TicTacToeStatus::Draw,
            None => TicTacToeStatus::InProgress,
        }
    }
}
