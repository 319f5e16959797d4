use gridplay_core::*;
use rand::{SeedableRng, rngs::SmallRng};

#[test]
fn single_safe_cell_wins_on_first_reveal() {
    let config = MinesweeperConfig::new((1, 1), 0).unwrap();
    let mut engine = MinesweeperEngine::new(config, 0);

    assert_eq!(engine.reveal((0, 0)), Ok(RevealOutcome::Won));
    assert_eq!(engine.outcome(), GameOutcome::Won);
    assert_eq!(engine.reveal((0, 0)), Err(GameError::GameAlreadyOver));
}

#[test]
fn lost_minesweeper_snapshot_survives_json() {
    let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();
    let mut engine = MinesweeperEngine::from_layout(layout);
    engine.toggle_flag((0, 1)).unwrap();
    engine.reveal((1, 1)).unwrap();
    assert_eq!(engine.reveal((2, 2)), Ok(RevealOutcome::HitMine));

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.cells[[2, 2]], CellView::Exploded);
    assert_eq!(snapshot.cells[[0, 0]], CellView::Mine);
    assert_eq!(snapshot.cells[[0, 1]], CellView::MisplacedFlag);
    assert_eq!(snapshot.cells[[1, 1]], CellView::Revealed(2));

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: MinesweeperSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn minesweeper_engine_resumes_from_json() {
    let config = MinesweeperConfig::new((8, 8), 10).unwrap();
    let mut engine = MinesweeperEngine::new(config, 99);
    engine.reveal((4, 4)).unwrap();

    let json = serde_json::to_string(&engine).unwrap();
    let mut restored: MinesweeperEngine = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, engine);

    assert_eq!(restored.state(), MinesweeperState::Active);
    assert!(restored.mine_layout().is_none());
    let (rows, cols) = restored.size();
    let mine = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .find(|&coords| restored.cell(coords).unwrap().is_mine)
        .unwrap();
    assert_eq!(restored.reveal(mine), Ok(RevealOutcome::HitMine));
    assert_eq!(restored.triggered_mine(), Some(mine));
}

#[test]
fn tictactoe_snapshot_reports_winning_line() {
    let (h, b) = (Some(Mark::Human), Some(Mark::Bot));
    let mut engine =
        TicTacToeEngine::from_cells([b, h, h, b, h, None, None, None, None], Mark::Bot).unwrap();
    let index = engine.compute_bot_move().unwrap();
    assert_eq!(index, 6);
    engine.place_bot(index).unwrap();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.status, TicTacToeStatus::BotWin);
    assert_eq!(snapshot.winning_line, Some([0, 3, 6]));

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: TicTacToeSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn sliding_snapshot_survives_json() {
    let grid = SlidingGrid::from_row_major(2, &[2, 2, 0, 4]).unwrap();
    let mut engine = SlidingEngine::from_grid(grid, SmallRng::seed_from_u64(5));
    engine.slide(Direction::Left).unwrap();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.score, 4);
    assert_eq!(snapshot.tiles[[0, 0]], 4);

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: SlidingSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn sliding_grid_json_is_validated() {
    let grid = SlidingGrid::from_row_major(2, &[2, 0, 0, 8]).unwrap();
    let json = serde_json::to_string(&grid).unwrap();
    assert_eq!(serde_json::from_str::<SlidingGrid>(&json).unwrap(), grid);

    let wide = r#"{"v":1,"dim":[2,3],"data":[0,0,0,0,0,0]}"#;
    assert!(serde_json::from_str::<SlidingGrid>(wide).is_err());

    let odd_tile = r#"{"v":1,"dim":[2,2],"data":[3,0,0,0]}"#;
    assert!(serde_json::from_str::<SlidingGrid>(odd_tile).is_err());
}
