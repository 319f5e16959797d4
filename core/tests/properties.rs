use gridplay_core::*;
use proptest::prelude::*;

fn minesweeper_config() -> impl Strategy<Value = MinesweeperConfig> {
    (1u8..=12, 1u8..=12).prop_flat_map(|(rows, cols)| {
        let total = CellCount::from(rows) * CellCount::from(cols);
        (0..total).prop_map(move |mines| MinesweeperConfig::new((rows, cols), mines).unwrap())
    })
}

fn in_bounds_coords(size: Coord2) -> impl Strategy<Value = Coord2> {
    (0..size.0, 0..size.1)
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn first_reveal_never_hits_a_mine(
        (config, start) in minesweeper_config()
            .prop_flat_map(|config| (Just(config), in_bounds_coords(config.size))),
        seed in any::<u64>(),
    ) {
        let mut engine = MinesweeperEngine::new(config, seed);
        let outcome = engine.reveal(start).unwrap();
        prop_assert_ne!(outcome, RevealOutcome::HitMine);

        let size = config.size;
        let placed = (0..size.0)
            .flat_map(|row| (0..size.1).map(move |col| (row, col)))
            .filter(|&coords| engine.cell(coords).unwrap().is_mine)
            .count();
        prop_assert_eq!(placed, usize::from(config.mines));

        let opened = engine.cell(start).unwrap();
        prop_assert!(opened.is_revealed);
        prop_assert!(!opened.is_mine);

        let zone = 1 + iter_neighbors(start, size).count() as CellCount;
        if config.safe_cells() >= zone {
            prop_assert_eq!(opened.adjacent_mine_count, 0);
            for neighbor in iter_neighbors(start, size) {
                prop_assert!(!engine.cell(neighbor).unwrap().is_mine);
            }
        }
    }

    #[test]
    fn adjacency_counts_match_neighbors(
        (size, mines) in (1u8..=10, 1u8..=10).prop_flat_map(|size| {
            (Just(size), prop::collection::vec(in_bounds_coords(size), 0..20))
        }),
    ) {
        let layout = MineLayout::from_mine_coords(size, &mines).unwrap();

        for row in 0..size.0 {
            for col in 0..size.1 {
                if layout.contains_mine((row, col)) {
                    continue;
                }
                let expected = iter_neighbors((row, col), size)
                    .filter(|&neighbor| layout.contains_mine(neighbor))
                    .count() as u8;
                prop_assert_eq!(layout.adjacent_mine_count((row, col)), expected);
            }
        }
    }

    #[test]
    fn revealed_count_matches_board(
        (config, clicks) in minesweeper_config().prop_flat_map(|config| {
            (Just(config), prop::collection::vec(in_bounds_coords(config.size), 1..30))
        }),
        seed in any::<u64>(),
    ) {
        let mut engine = MinesweeperEngine::new(config, seed);
        for coords in clicks {
            if engine.is_finished() {
                break;
            }
            let _ = engine.chord_reveal(coords);
        }

        let snapshot = engine.snapshot();
        let revealed = snapshot
            .cells
            .iter()
            .filter(|view| matches!(view, CellView::Revealed(_)))
            .count();

        prop_assert_eq!(usize::from(engine.revealed_count()), revealed);
        prop_assert!(engine.revealed_count() <= config.safe_cells());
        if engine.state() == MinesweeperState::Won {
            prop_assert_eq!(engine.revealed_count(), config.safe_cells());
        }
    }

    #[test]
    fn slides_keep_the_tile_total(
        size in 2u8..=6,
        seed in any::<u64>(),
        moves in prop::collection::vec(direction(), 1..60),
    ) {
        let config = SlidingConfig::new(size, 2048, 2).unwrap();
        let mut engine = SlidingEngine::with_seed(config, seed);

        for direction in moves {
            if engine.outcome().is_finished() {
                break;
            }
            let sum_before = engine.grid().tile_sum();
            let score_before = engine.score();

            let result = engine.slide(direction).unwrap();

            prop_assert_eq!(result.changed, result.spawned.is_some());
            if let Some(tile) = result.spawned {
                prop_assert!(matches!(tile.value, 2 | 4));
                prop_assert_eq!(engine.grid().get(tile.coords), Ok(tile.value));
            }
            let spawned = result.spawned.map_or(0, |tile| u64::from(tile.value));
            prop_assert_eq!(engine.grid().tile_sum(), sum_before + spawned);
            prop_assert_eq!(engine.score(), score_before + result.gained);
        }
    }

    #[test]
    fn bot_only_picks_empty_cells(
        moves in prop::collection::vec(0u8..9, 0..9),
    ) {
        let mut engine = TicTacToeEngine::default();
        for index in moves {
            if engine.status().is_finished() {
                break;
            }
            match engine.to_move() {
                Mark::Human => {
                    let _ = engine.place_human(index);
                }
                Mark::Bot => {
                    let _ = engine.place_bot(index);
                }
            }
        }

        match engine.compute_bot_move() {
            Ok(index) => {
                prop_assert!(!engine.status().is_finished());
                prop_assert_eq!(engine.cells()[usize::from(index)], None);
            }
            Err(error) => {
                prop_assert_eq!(error, GameError::GameAlreadyOver);
                prop_assert!(engine.status().is_finished());
            }
        }
    }
}
