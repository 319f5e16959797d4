use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: MinesweeperConfig) -> MineLayout;
}

/// How much of the first revealed cell's surroundings is kept free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartTile {
    Random,
    SimpleSafe,
    AlwaysZero,
}
