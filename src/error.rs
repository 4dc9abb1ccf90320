use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the game library
#[derive(Debug, Error)]
pub enum GameError {
    /// The board cannot hold a head, a food cell and room to move
    #[error("board size must be at least {min}, got {got}")]
    BoardTooSmall { min: usize, got: usize },

    /// Coordinates must fit the board's signed cell space
    #[error("board size must be at most {max}, got {got}")]
    BoardTooLarge { max: usize, got: usize },

    /// A session needs at least one tick per second
    #[error("speed must be at least 1 tick per second")]
    ZeroSpeed,

    #[error("high score storage error at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("high score file {path:?} is malformed")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
