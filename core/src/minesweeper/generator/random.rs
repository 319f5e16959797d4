use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Uniform mine placement over every cell outside the area reserved by [`StartTile`].
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Coord2,
    start_tile: StartTile,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2, start_tile: StartTile) -> Self {
        Self {
            seed,
            start,
            start_tile,
        }
    }

    /// Places mines drawing from `rng` instead of the generator's own seed.
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        config: MinesweeperConfig,
        rng: &mut R,
    ) -> MineLayout {
        use StartTile::*;

        let size = config.size;
        let (start, start_tile) = if in_bounds(self.start, size) {
            (self.start, self.start_tile)
        } else {
            log::warn!("Start tile {:?} outside of {:?}, fallback to random", self.start, size);
            ((0, 0), Random)
        };

        let requested = usize::from(config.mines);
        let total = usize::from(config.total_cells());
        let zero_zone = 1 + iter_neighbors(start, size).count();
        let start_tile = match start_tile {
            SimpleSafe | AlwaysZero if requested >= total => {
                log::warn!("Cannot make start tile safe, fallback to random");
                Random
            }
            AlwaysZero if requested + zero_zone > total => {
                log::warn!("Cannot make start tile zero, fallback to simple safe");
                SimpleSafe
            }
            other => other,
        };

        let reserved = |coords: Coord2| match start_tile {
            Random => false,
            SimpleSafe => coords == start,
            AlwaysZero => coords.0.abs_diff(start.0) <= 1 && coords.1.abs_diff(start.1) <= 1,
        };
        let mut candidates: Vec<Coord2> = (0..size.0)
            .flat_map(|row| (0..size.1).map(move |col| (row, col)))
            .filter(|&coords| !reserved(coords))
            .collect();

        let amount = requested.min(candidates.len());
        if amount < requested {
            log::warn!("Minefield only fits {} of {} requested mines", amount, requested);
        }

        // partial Fisher-Yates, the first `amount` candidates become mines
        let (chosen, _) = candidates.partial_shuffle(rng, amount);
        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        for coords in chosen.iter() {
            mines[coords.to_nd_index()] = true;
        }

        let layout = MineLayout::from_valid_mask(mines, size);
        log::debug!(
            "Generated {}x{} minefield with {} mines, start {:?} as {:?}",
            size.0,
            size.1,
            layout.mine_count(),
            start,
            start_tile
        );
        layout
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: MinesweeperConfig) -> MineLayout {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        self.generate_with(config, &mut rng)
    }
}
