use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Smallest board that fits a head, a food cell and room to move
pub const MIN_BOARD_SIZE: usize = 3;
/// Largest board a session accepts
pub const MAX_BOARD_SIZE: usize = 1024;
pub const DEFAULT_BOARD_SIZE: usize = 20;
/// Ticks per second
pub const DEFAULT_SPEED: u32 = 8;

/// Configuration for one game session
///
/// Both values are fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width and height of the square board, in cells
    pub board_size: usize,
    /// Game ticks per second
    pub speed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            speed: DEFAULT_SPEED,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size and speed
    pub fn new(board_size: usize, speed: u32) -> Self {
        Self { board_size, speed }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(5, DEFAULT_SPEED)
    }

    /// Reject configurations a session cannot be built from
    pub fn validate(&self) -> Result<()> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(GameError::BoardTooSmall {
                min: MIN_BOARD_SIZE,
                got: self.board_size,
            });
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(GameError::BoardTooLarge {
                max: MAX_BOARD_SIZE,
                got: self.board_size,
            });
        }
        if self.speed == 0 {
            return Err(GameError::ZeroSpeed);
        }
        Ok(())
    }

    /// Time between two game ticks
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed.max(1)))
    }

    /// Board side as a coordinate bound
    pub fn extent(&self) -> i32 {
        board_extent(self.board_size)
    }
}

/// Board side in coordinate space, saturating for sizes `validate` rejects
pub fn board_extent(board_size: usize) -> i32 {
    i32::try_from(board_size).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 20);
        assert_eq!(config.speed, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tick_period() {
        assert_eq!(GameConfig::default().tick_period(), Duration::from_millis(125));
        assert_eq!(GameConfig::new(10, 1).tick_period(), Duration::from_secs(1));
        assert_eq!(GameConfig::new(10, 3).tick_period(), Duration::from_millis(333));
    }

    #[test]
    fn test_board_too_small() {
        let err = GameConfig::new(2, 8).validate().unwrap_err();
        assert!(matches!(err, GameError::BoardTooSmall { min: 3, got: 2 }));
        assert!(GameConfig::new(3, 8).validate().is_ok());
    }

    #[test]
    fn test_board_too_large() {
        let err = GameConfig::new(3_000_000_000, 8).validate().unwrap_err();
        assert!(matches!(
            err,
            GameError::BoardTooLarge {
                max: MAX_BOARD_SIZE,
                got: 3_000_000_000
            }
        ));
        assert!(GameConfig::new(MAX_BOARD_SIZE, 8).validate().is_ok());
        assert!(GameConfig::new(MAX_BOARD_SIZE + 1, 8).validate().is_err());
    }

    #[test]
    fn test_board_extent() {
        assert_eq!(GameConfig::new(20, 8).extent(), 20);
        assert_eq!(board_extent(usize::MAX), i32::MAX);
    }

    #[test]
    fn test_zero_speed() {
        let err = GameConfig::new(10, 0).validate().unwrap_err();
        assert!(matches!(err, GameError::ZeroSpeed));
    }

    #[test]
    fn test_config_serde() {
        let json = r#"{"board_size": 12, "speed": 4}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, GameConfig::new(12, 4));
    }
}
