//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, Result};
use crate::validate::validate_count;

/// Path and step counts for one Monte Carlo run.
///
/// With `seed: Some(_)` the run is reproducible bit-for-bit for the same
/// seed, path count and step count. With `None` a seed is drawn from OS
/// entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub num_paths: usize,
    pub num_steps: usize,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    /// 100,000 paths over 252 daily steps, unseeded.
    fn default() -> Self {
        Self {
            num_paths: 100_000,
            num_steps: 252,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new(num_paths: usize, num_steps: usize) -> Self {
        Self {
            num_paths,
            num_steps,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build from signed counts as supplied by hosts without unsigned types.
    ///
    /// # Errors
    /// Returns [`OptionsError::InvalidParameter`] naming `num_paths` or
    /// `num_steps` when a count is zero or negative.
    pub fn from_signed(num_paths: i64, num_steps: i64, seed: Option<u64>) -> Result<Self> {
        let config = Self {
            num_paths: signed_count(num_paths, "num_paths")?,
            num_steps: signed_count(num_steps, "num_steps")?,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_count(self.num_paths, "num_paths")?;
        validate_count(self.num_steps, "num_steps")?;
        Ok(())
    }
}

fn signed_count(value: i64, name: &'static str) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or(OptionsError::InvalidParameter {
            parameter: name,
            value: value as f64,
            reason: "must be at least 1",
        })
}
