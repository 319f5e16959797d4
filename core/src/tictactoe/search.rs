use serde::{Deserialize, Serialize};

use super::*;

/// Terminal value before the depth adjustment.
const WIN_SCORE: i32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Cell the bot should take.
    pub index: u8,
    /// Minimax value of that move from the bot's point of view.
    pub score: i32,
    /// Positions visited, for profiling the pruning.
    pub nodes: u32,
}

/// Full-depth minimax with alpha-beta pruning, searching for the bot's best move.
///
/// Values are from the bot's perspective: a bot win reached after `depth` moves scores
/// `10 - depth`, a human win `depth - 10`, a draw 0. Root moves are tried in ascending
/// index order and only a strictly better score replaces the current best, so ties go
/// to the lowest index. Returns `None` when the position is already decided.
pub fn search_bot_move(board: &TicTacToeBoard) -> Option<SearchResult> {
    if board.status().is_finished() {
        return None;
    }

    let mut nodes = 0;
    let mut alpha = i32::MIN;
    let beta = i32::MAX;
    let mut best: Option<(u8, i32)> = None;

    for index in board.empty_cells() {
        let child = board.with_mark(index, Mark::Bot);
        let score = minimax(child, 1, alpha, beta, Mark::Human, &mut nodes);
        log::trace!("Root move {} scored {}", index, score);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
            alpha = alpha.max(score);
        }
    }

    let (index, score) = best?;
    log::debug!(
        "Bot move {} with score {} after {} nodes",
        index,
        score,
        nodes
    );
    Some(SearchResult {
        index,
        score,
        nodes,
    })
}

/// `board` is owned by this frame, every child gets its own copy.
fn minimax(
    board: TicTacToeBoard,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
    to_move: Mark,
    nodes: &mut u32,
) -> i32 {
    *nodes += 1;

    match board.status() {
        TicTacToeStatus::BotWin => return WIN_SCORE - depth,
        TicTacToeStatus::HumanWin => return depth - WIN_SCORE,
        TicTacToeStatus::Draw => return 0,
        TicTacToeStatus::InProgress => {}
    }

    let next = to_move.opponent();
    match to_move {
        Mark::Bot => {
            let mut best = i32::MIN;
            for index in board.empty_cells() {
                let child = board.with_mark(index, to_move);
                let score = minimax(child, depth + 1, alpha, beta, next, nodes);
                best = best.max(score);
                alpha = alpha.max(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
        Mark::Human => {
            let mut best = i32::MAX;
            for index in board.empty_cells() {
                let child = board.with_mark(index, to_move);
                let score = minimax(child, depth + 1, alpha, beta, next, nodes);
                best = best.min(score);
                beta = beta.min(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
    }
}
