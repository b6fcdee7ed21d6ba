use std::path::PathBuf;

use thiserror::Error;

use crate::solver::MAX_BITS;

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("bit width must be between 1 and {max}, got {bits}", max = MAX_BITS)]
    InvalidBitWidth { bits: u32 },

    #[error("trial count must be at least 1, got {trials}")]
    InvalidTrialCount { trials: usize },

    #[error("oracle failed on input {input}")]
    OracleFailure {
        input: u64,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not draw two distinct inputs after {attempts} attempts")]
    ResampleLimitExceeded { attempts: u32 },

    #[error("decision cancelled after {queried} oracle queries")]
    Cancelled { queried: u64 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failures raised by the built-in oracles.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("input {input} is outside the truth table of {len} entries")]
    OutOfDomain { input: u64, len: usize },

    #[error("invalid oracle spec {0:?}")]
    InvalidSpec(String),
}
