//! Twisted Snake - Snake where food grows the snake at both ends and teleports it
//!
//! This library provides:
//! - Core game logic (game module), free of I/O
//! - High score persistence behind a trait (storage module)
//! - Toast notifications (notify module)
//! - Keyboard mapping and TUI rendering (input and render modules)
//! - The interactive terminal session (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod modes;
pub mod notify;
pub mod render;
pub mod storage;

pub use error::{GameError, Result};
