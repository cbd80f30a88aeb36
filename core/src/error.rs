use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board size or mine count")]
    InvalidConfig,
    #[error("Coordinates outside the board")]
    OutOfBounds,
    #[error("No move is eligible for undo")]
    NothingToUndo,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
