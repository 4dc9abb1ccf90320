//! High score persistence
//!
//! The engine only sees the [`HighScoreStore`] trait. The file store is what
//! the binary uses; the memory store backs tests and `--no-persist`.

pub mod high_score;

pub use high_score::{
    FileHighScoreStore, HighScoreStore, MemoryHighScoreStore, DEFAULT_HIGH_SCORE_FILE,
};
