use gridplay_core::{GameError, Mark, TicTacToeConfig, TicTacToeEngine, TicTacToeStatus};

/// Plays every possible human line against the bot, collecting the final statuses.
fn play_all_lines(engine: TicTacToeEngine, outcomes: &mut Vec<TicTacToeStatus>) {
    if engine.status() != TicTacToeStatus::InProgress {
        outcomes.push(engine.status());
        return;
    }

    match engine.to_move() {
        Mark::Bot => {
            let mut next = engine;
            let index = engine.compute_bot_move().expect("bot move in live game");
            assert!(
                engine.cells()[usize::from(index)].is_none(),
                "bot picked occupied cell {index} in {:?}",
                engine.cells()
            );
            next.place_bot(index).expect("bot move applies");
            play_all_lines(next, outcomes);
        }
        Mark::Human => {
            for index in engine.available_moves() {
                let mut next = engine;
                next.place_human(index).expect("human move applies");
                play_all_lines(next, outcomes);
            }
        }
    }
}

#[test]
fn bot_never_loses_moving_second() {
    let mut outcomes = Vec::new();
    play_all_lines(TicTacToeEngine::default(), &mut outcomes);

    assert!(!outcomes.is_empty());
    assert!(
        outcomes.iter().all(|&status| status != TicTacToeStatus::HumanWin),
        "human found a winning line against the bot"
    );
}

#[test]
fn bot_never_loses_moving_first() {
    let mut outcomes = Vec::new();
    let engine = TicTacToeEngine::new(TicTacToeConfig { first: Mark::Bot });
    play_all_lines(engine, &mut outcomes);

    assert!(outcomes.iter().all(|&status| status != TicTacToeStatus::HumanWin));
    assert!(outcomes.contains(&TicTacToeStatus::BotWin));
}

#[test]
fn human_wins_by_completing_row() {
    let (h, b) = (Some(Mark::Human), Some(Mark::Bot));
    let cells = [h, h, None, b, b, None, None, None, None];
    let mut engine = TicTacToeEngine::from_cells(cells, Mark::Human).unwrap();

    assert_eq!(engine.place_human(2), Ok(TicTacToeStatus::HumanWin));
    assert_eq!(engine.place_bot(5), Err(GameError::GameAlreadyOver));
}
