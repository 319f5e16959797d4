use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeSnapshot {
    pub cells: [Option<Mark>; CELL_COUNT],
    pub to_move: Mark,
    pub status: TicTacToeStatus,
    pub winning_line: Option<[u8; 3]>,
}

/// One round of human versus bot. The bot never moves on its own: the caller asks
/// [`Self::compute_bot_move`] and applies the answer with [`Self::place_bot`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeEngine {
    config: TicTacToeConfig,
    board: TicTacToeBoard,
    to_move: Mark,
    status: TicTacToeStatus,
}

impl TicTacToeEngine {
    pub fn new(config: TicTacToeConfig) -> Self {
        Self {
            config,
            board: TicTacToeBoard::new(),
            to_move: config.first,
            status: TicTacToeStatus::InProgress,
        }
    }

    /// Resumes from an arbitrary position. Boards where both sides own a line are rejected.
    pub fn from_cells(cells: [Option<Mark>; CELL_COUNT], to_move: Mark) -> Result<Self> {
        let board = TicTacToeBoard::from_cells(cells);
        if board.has_line(Mark::Human) && board.has_line(Mark::Bot) {
            return Err(GameError::IllegalMove);
        }
        Ok(Self {
            config: TicTacToeConfig::default(),
            board,
            to_move,
            status: board.status(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub fn config(&self) -> TicTacToeConfig {
        self.config
    }

    pub fn board(&self) -> &TicTacToeBoard {
        &self.board
    }

    pub fn cells(&self) -> &[Option<Mark>; CELL_COUNT] {
        self.board.cells()
    }

    pub fn status(&self) -> TicTacToeStatus {
        self.status
    }

    pub fn outcome(&self) -> GameOutcome {
        self.status.into()
    }

    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn available_moves(&self) -> SmallVec<[u8; CELL_COUNT]> {
        if self.status.is_finished() {
            SmallVec::new()
        } else {
            self.board.empty_cells()
        }
    }

    pub fn winning_line(&self) -> Option<[u8; 3]> {
        self.board.winning_line().map(|(_, line)| line)
    }

    pub fn place_human(&mut self, index: u8) -> Result<TicTacToeStatus> {
        self.place(Mark::Human, index)
    }

    pub fn place_bot(&mut self, index: u8) -> Result<TicTacToeStatus> {
        self.place(Mark::Bot, index)
    }

    /// Best cell for the bot in the current position, as if it were the bot's turn.
    /// Does not touch the board.
    pub fn compute_bot_move(&self) -> Result<u8> {
        self.check_in_progress()?;
        search_bot_move(&self.board)
            .map(|result| result.index)
            .ok_or(GameError::GameAlreadyOver)
    }

    pub fn snapshot(&self) -> TicTacToeSnapshot {
        TicTacToeSnapshot {
            cells: *self.board.cells(),
            to_move: self.to_move,
            status: self.status,
            winning_line: self.winning_line(),
        }
    }

    fn place(&mut self, mark: Mark, index: u8) -> Result<TicTacToeStatus> {
        let cell = self.board.get(index)?;
        self.check_in_progress()?;
        if self.to_move != mark || cell.is_some() {
            return Err(GameError::IllegalMove);
        }

        self.board = self.board.with_mark(index, mark);
        self.status = self.board.status();
        self.to_move = mark.opponent();
        log::debug!("{:?} took cell {}, status {:?}", mark, index, self.status);
        Ok(self.status)
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

impl Default for TicTacToeEngine {
    fn default() -> Self {
        Self::new(TicTacToeConfig::default())
    }
}
