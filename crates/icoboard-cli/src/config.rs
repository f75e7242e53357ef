//! Runtime configuration from the environment.
//!
//! | Variable                | Default  |
//! |-------------------------|----------|
//! | `ICOBOARD_SEED`         | entropy  |
//! | `ICOBOARD_SUBDIVISIONS` | 1        |
//! | `ICOBOARD_MAX_CASCADE`  | 8        |
//!
//! Command-line flags override whatever the environment says.

use std::str::FromStr;

use icoboard_match::{BoardConfig, DEFAULT_MAX_CASCADE_ROUNDS};
use icoboard_topology::RandomOracle;
use thiserror::Error;

pub const ENV_SEED: &str = "ICOBOARD_SEED";
pub const ENV_SUBDIVISIONS: &str = "ICOBOARD_SUBDIVISIONS";
pub const ENV_MAX_CASCADE: &str = "ICOBOARD_MAX_CASCADE";

pub const DEFAULT_SUBDIVISIONS: u32 = 1;

/// Deepest mesh the tool will build (5120 triangles). Adjacency is quadratic.
pub const MAX_SUBDIVISIONS: u32 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{0} subdivisions requested, at most {max} supported", max = MAX_SUBDIVISIONS)]
    TooDeep(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Seed for facet types; `None` draws from entropy
    pub seed: Option<u64>,
    /// 1-to-4 subdivisions applied by `generate`
    pub subdivisions: u32,
    /// Match rounds per turn
    pub max_cascade_rounds: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            seed: None,
            subdivisions: DEFAULT_SUBDIVISIONS,
            max_cascade_rounds: DEFAULT_MAX_CASCADE_ROUNDS,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            seed: parse_var(&lookup, ENV_SEED, "u64")?,
            subdivisions: parse_var(&lookup, ENV_SUBDIVISIONS, "subdivision count")?
                .unwrap_or(defaults.subdivisions),
            max_cascade_rounds: parse_var(&lookup, ENV_MAX_CASCADE, "round count")?
                .unwrap_or(defaults.max_cascade_rounds),
        };
        config.validate()
    }

    /// Apply command-line overrides on top.
    pub fn with_overrides(
        mut self,
        seed: Option<u64>,
        subdivisions: Option<u32>,
        max_cascade_rounds: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(levels) = subdivisions {
            self.subdivisions = levels;
        }
        if let Some(rounds) = max_cascade_rounds {
            self.max_cascade_rounds = rounds;
        }
        self.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.subdivisions > MAX_SUBDIVISIONS {
            return Err(ConfigError::TooDeep(self.subdivisions));
        }
        Ok(self)
    }

    pub fn oracle(&self) -> RandomOracle {
        match self.seed {
            Some(seed) => RandomOracle::seeded(seed),
            None => RandomOracle::from_entropy(),
        }
    }

    pub fn board_config(&self) -> BoardConfig {
        BoardConfig::default().with_max_cascade_rounds(self.max_cascade_rounds)
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(|_| ConfigError::Invalid {
        var,
        value: raw.clone(),
        expected,
    })
}
