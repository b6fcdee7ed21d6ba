use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Tuning for the randomized strategies.
///
/// ```toml
/// max_resamples = 64
/// balanced_guess_probability = 0.3333333333333333
/// default_trials = 15
/// seed = 42
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Upper bound on redraws while looking for two distinct inputs.
    pub max_resamples: u32,
    /// Chance of answering `Balanced` when a sampled pair agrees.
    pub balanced_guess_probability: f64,
    /// Trial count the CLI uses for the amplified strategy when `--trials`
    /// is not given. `Solver` itself always takes the count per call.
    pub default_trials: usize,
    /// RNG seed the CLI uses when `--seed` is not given. Library callers
    /// seed the RNG they pass in.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_resamples: 64,
            balanced_guess_probability: 1.0 / 3.0,
            default_trials: 15,
            seed: None,
        }
    }
}

impl SolverConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_resamples == 0 {
            return Err(ConfigError::Invalid(
                "max_resamples must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.balanced_guess_probability) {
            return Err(ConfigError::Invalid(format!(
                "balanced_guess_probability must lie in [0, 1], got {}",
                self.balanced_guess_probability
            )));
        }
        if self.default_trials == 0 {
            return Err(ConfigError::Invalid(
                "default_trials must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
