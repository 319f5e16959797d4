use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    pub coords: Coord2,
    pub value: u32,
}

/// Result of executing a slide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideResult {
    /// Whether the grid changed; a tile is spawned only if it did.
    pub changed: bool,
    /// Sum of the tiles created by merges.
    pub gained: u32,
    pub spawned: Option<SpawnedTile>,
}

impl SlideResult {
    const NO_CHANGE: Self = Self {
        changed: false,
        gained: 0,
        spawned: None,
    };
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidingSnapshot {
    pub tiles: Array2<u32>,
    pub score: u32,
    pub outcome: GameOutcome,
}

/// 2048-style game. Randomness comes only from `rng`, so a seeded generator replays the
/// exact same spawns.
#[derive(Clone, Debug)]
pub struct SlidingEngine<R = SmallRng> {
    config: SlidingConfig,
    grid: SlidingGrid,
    score: u32,
    rng: R,
}

impl SlidingEngine<SmallRng> {
    pub fn with_seed(config: SlidingConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SlidingEngine<R> {
    /// Empty grid plus the configured number of starting tiles.
    pub fn new(config: SlidingConfig, rng: R) -> Self {
        let grid = SlidingGrid::empty(config.size);
        let mut engine = Self {
            config,
            grid,
            score: 0,
            rng,
        };
        for _ in 0..config.start_tiles {
            engine.spawn_tile();
        }
        engine
    }

    /// Continues from an existing grid with the default win tile and no extra spawns.
    pub fn from_grid(grid: SlidingGrid, rng: R) -> Self {
        let config = SlidingConfig {
            size: grid.size(),
            start_tiles: 0,
            ..SlidingConfig::default()
        };
        Self {
            config,
            grid,
            score: 0,
            rng,
        }
    }

    pub fn config(&self) -> SlidingConfig {
        self.config
    }

    pub fn grid(&self) -> &SlidingGrid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_tile(&self) -> u32 {
        self.grid.max_tile()
    }

    pub fn empty_count(&self) -> usize {
        self.grid.empty_count()
    }

    /// Puts a 2 (90%) or a 4 (10%) on a uniformly chosen empty cell. No-op on a full grid.
    pub fn spawn_tile(&mut self) -> Option<SpawnedTile> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let coords = empty[self.rng.random_range(0..empty.len())];
        let value = if self.rng.random_range(0..10) < 9 { 2 } else { 4 };
        self.grid.set(coords, value);
        log::trace!("Spawned {} at {:?}", value, coords);
        Some(SpawnedTile { coords, value })
    }

    pub fn can_slide(&self, direction: Direction) -> bool {
        self.grid.slid(direction).0 != self.grid
    }

    pub fn legal_moves(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.can_slide(direction))
    }

    /// Slides every lane toward `direction`. An unchanged grid is a no-op; otherwise one
    /// tile is spawned and the merge gain is added to the score.
    pub fn slide(&mut self, direction: Direction) -> Result<SlideResult> {
        if self.check_outcome().is_finished() {
            return Err(GameError::GameAlreadyOver);
        }

        let (next, gained) = self.grid.slid(direction);
        if next == self.grid {
            log::trace!("Slide {:?} changed nothing", direction);
            return Ok(SlideResult::NO_CHANGE);
        }

        self.grid = next;
        self.score = self.score.saturating_add(gained);
        let spawned = self.spawn_tile();
        log::debug!(
            "Slide {:?} gained {}, score {}, outcome {:?}",
            direction,
            gained,
            self.score,
            self.check_outcome()
        );

        Ok(SlideResult {
            changed: true,
            gained,
            spawned,
        })
    }

    /// `Won` once any tile reaches the win tile, `Lost` when no slide can change the grid.
    pub fn check_outcome(&self) -> GameOutcome {
        if self.grid.max_tile() >= self.config.win_tile {
            GameOutcome::Won
        } else if self.grid.empty_count() == 0 && !self.grid.has_adjacent_pair() {
            GameOutcome::Lost
        } else {
            GameOutcome::InProgress
        }
    }

    pub fn outcome(&self) -> GameOutcome {
        self.check_outcome()
    }

    pub fn snapshot(&self) -> SlidingSnapshot {
        SlidingSnapshot {
            tiles: self.grid.tiles().clone(),
            score: self.score,
            outcome: self.check_outcome(),
        }
    }
}
