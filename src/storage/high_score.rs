use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GameError, Result};

pub const DEFAULT_HIGH_SCORE_FILE: &str = ".twisted_snake_high_score.json";

/// Persistence collaborator for the single high score value
///
/// Loaded once when an engine is built and written only when a finished
/// game beats the stored value.
pub trait HighScoreStore {
    fn load_high_score(&mut self) -> Result<u32>;
    fn save_high_score(&mut self, score: u32) -> Result<()>;
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load_high_score(&mut self) -> Result<u32> {
        (**self).load_high_score()
    }

    fn save_high_score(&mut self, score: u32) -> Result<()> {
        (**self).save_high_score(score)
    }
}

/// On-disk representation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// High score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

impl HighScoreStore for FileHighScoreStore {
    /// A missing file means nobody has played yet
    fn load_high_score(&mut self) -> Result<u32> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(GameError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let record: HighScoreRecord =
            serde_json::from_str(&contents).map_err(|source| GameError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        Ok(record.high_score)
    }

    fn save_high_score(&mut self, score: u32) -> Result<()> {
        let io_err = |source| GameError::Io {
            path: self.path.clone(),
            source,
        };

        // Create parent directories if needed
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })
            .map_err(|source| GameError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        std::fs::write(&self.path, json).map_err(io_err)?;

        Ok(())
    }
}

/// In-process store that remembers every write
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    high_score: u32,
    writes: Vec<u32>,
}

impl MemoryHighScoreStore {
    pub fn new(high_score: u32) -> Self {
        Self {
            high_score,
            writes: Vec::new(),
        }
    }

    /// Values passed to `save_high_score`, oldest first
    pub fn writes(&self) -> &[u32] {
        &self.writes
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&mut self) -> Result<u32> {
        Ok(self.high_score)
    }

    fn save_high_score(&mut self, score: u32) -> Result<()> {
        self.high_score = score;
        self.writes.push(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = TempDir::new().unwrap();
        let mut store = FileHighScoreStore::new(dir.path().join("none.json"));
        assert_eq!(store.load_high_score().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let mut store = FileHighScoreStore::new(&path);
        store.save_high_score(42).unwrap();
        assert!(path.exists());

        let mut reopened = FileHighScoreStore::new(&path);
        assert_eq!(reopened.load_high_score().unwrap(), 42);
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = FileHighScoreStore::new(&path);
        let err = store.load_high_score().unwrap_err();
        assert!(matches!(err, GameError::Malformed { .. }));
    }

    #[test]
    fn test_memory_store_records_writes() {
        let mut store = MemoryHighScoreStore::new(3);
        assert_eq!(store.load_high_score().unwrap(), 3);
        store.save_high_score(7).unwrap();
        assert_eq!(store.load_high_score().unwrap(), 7);
        assert_eq!(store.writes(), &[7]);
    }
}
