//! Engine configuration.
//!
//! Rounds, confidence level, and worker count are fixed per run so that
//! a given seed always reproduces the same interval. Loading from a
//! TOML file is provided for the surrounding assessment suite; this
//! crate itself never touches the filesystem otherwise.

use crate::numeric::Tolerance;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for bootstrap interval computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Number of bootstrap resampling rounds.
    pub rounds: usize,
    /// Two-sided confidence level in (0, 1).
    pub confidence: f64,
    /// Number of parallel resampling workers. Results depend on this
    /// value (it fixes the round-to-stream partition), so it is part of
    /// the configuration rather than taken from the machine.
    pub workers: usize,
    /// Tolerances for the tiered floating-point comparator.
    pub tolerance: Tolerance,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            rounds: 10_000,
            confidence: 0.99, // SP 800-90B style assessments use 99%
            workers: 4,
            tolerance: Tolerance::default(),
        }
    }
}

impl BootstrapConfig {
    /// Creates a configuration with the given rounds and confidence.
    pub fn new(rounds: usize, confidence: f64) -> Self {
        Self {
            rounds,
            confidence,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds < 2 {
            return Err(ConfigError::InvalidRounds(self.rounds));
        }
        if !(self.confidence.is_finite() && self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(ConfigError::InvalidConfidence(self.confidence));
        }
        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkers);
        }
        if !(self.tolerance.absolute >= 0.0 && self.tolerance.relative >= 0.0) {
            return Err(ConfigError::InvalidTolerance);
        }
        Ok(())
    }

    /// Loads and validates a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: BootstrapConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid rounds count {0} (need at least 2)")]
    InvalidRounds(usize),
    #[error("invalid confidence level {0} (must be in (0, 1))")]
    InvalidConfidence(f64),
    #[error("worker count must be at least 1")]
    InvalidWorkers,
    #[error("tolerances must be non-negative")]
    InvalidTolerance,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}
