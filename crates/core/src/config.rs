//! Game configuration owned by [`GameState`](crate::GameState).

use crate::error::PuzzleError;
use crate::types::{
    SolvabilityPolicy, INITIAL_TIME_SECS, MAX_GRID_SIZE, MIN_GRID_SIZE, MIN_TIME_BUDGET_SECS,
};

/// Tunables of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Side length of the board (`2..=12`).
    pub grid_size: u8,
    /// Time budget of level 1, in seconds.
    pub base_time_secs: u32,
    pub policy: SolvabilityPolicy,
    /// RNG seed for every shuffle of the run.
    pub seed: u32,
    /// Catalog index of the first image.
    pub first_image: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: MIN_GRID_SIZE,
            base_time_secs: INITIAL_TIME_SECS,
            policy: SolvabilityPolicy::FreeSwap,
            seed: 1,
            first_image: 0,
        }
    }
}

impl GameConfig {
    pub fn with_grid_size(mut self, grid_size: u8) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_policy(mut self, policy: SolvabilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_base_time(mut self, secs: u32) -> Self {
        self.base_time_secs = secs;
        self
    }

    pub fn validate(&self) -> Result<(), PuzzleError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(PuzzleError::config(format!(
                "grid size {} outside {}..={}",
                self.grid_size, MIN_GRID_SIZE, MAX_GRID_SIZE
            )));
        }
        if self.base_time_secs < MIN_TIME_BUDGET_SECS {
            return Err(PuzzleError::config(format!(
                "base time {}s is below the {}s floor",
                self.base_time_secs, MIN_TIME_BUDGET_SECS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 2);
        assert_eq!(config.base_time_secs, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(GameConfig::default().with_grid_size(1).validate().is_err());
        assert!(GameConfig::default().with_grid_size(13).validate().is_err());
        assert!(GameConfig::default().with_grid_size(12).validate().is_ok());
        assert!(GameConfig::default().with_base_time(59).validate().is_err());
    }
}
