use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakProgress {
    pub current: u32,
    pub target: u32,
    pub completed: bool,
}

/// Session-level "draw N rounds in a row" goal layered over tic-tac-toe rounds.
///
/// Kept outside [`TicTacToeEngine`]: the caller feeds it each finished round and resets
/// the engine itself. A win by either side breaks the streak. Once reached, `completed`
/// stays set even if later rounds break the streak.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStreak {
    target: u32,
    current: u32,
    completed: bool,
}

impl DrawStreak {
    pub fn new(target: u32) -> Self {
        Self {
            target: target.max(1),
            current: 0,
            completed: false,
        }
    }

    pub fn record(&mut self, status: TicTacToeStatus) -> StreakProgress {
        match status {
            TicTacToeStatus::InProgress => {}
            TicTacToeStatus::Draw => {
                self.current += 1;
                if self.current >= self.target && !self.completed {
                    log::debug!("Draw streak of {} reached", self.current);
                    self.completed = true;
                }
            }
            TicTacToeStatus::HumanWin | TicTacToeStatus::BotWin => {
                if self.current > 0 {
                    log::debug!("Draw streak broken at {} by {:?}", self.current, status);
                }
                self.current = 0;
            }
        }
        self.progress()
    }

    pub fn progress(&self) -> StreakProgress {
        StreakProgress {
            current: self.current,
            target: self.target,
            completed: self.completed,
        }
    }
}
