//! Core game logic module for Twisted Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine is driven by an external tick scheduler and input source, and reads and
//! writes the high score only through an injected [`HighScoreStore`](crate::storage::HighScoreStore).

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{
    board_extent, GameConfig, DEFAULT_BOARD_SIZE, DEFAULT_SPEED, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
pub use engine::{GameEngine, TickOutcome, MAX_FOOD_ATTEMPTS};
pub use state::{CollisionType, GamePhase, GameState, Position, Snake};
