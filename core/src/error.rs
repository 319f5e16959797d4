use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoordinate,
    #[error("Game already ended, no new moves are accepted")]
    GameAlreadyOver,
    #[error("Move not allowed in the current position")]
    IllegalMove,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board dimensions are not supported")]
    InvalidDimensions,
    #[error("Tile value is not a power of two")]
    InvalidTile,
}

pub type Result<T> = core::result::Result<T, GameError>;
