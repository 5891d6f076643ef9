use log::LevelFilter;

use crate::error::{Error, Result};
use crate::strategy::Difficulty;
use crate::{HEIGHT, WIDTH};

/// Settings for a game against the computer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// plies the tree looks ahead of the current position
    pub depth: usize,
    /// keep only the best move on the computer's own plies
    pub advanced_pruning: bool,
    pub difficulty: Difficulty,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_advanced_pruning(mut self, advanced_pruning: bool) -> Self {
        self.advanced_pruning = advanced_pruning;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 || self.depth > WIDTH * HEIGHT {
            return Err(Error::InvalidConfig("depth must be between 1 and 42 plies"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depth: 4,
            advanced_pruning: true,
            difficulty: Difficulty::Hard,
            log_level: LevelFilter::Warn,
        }
    }
}
