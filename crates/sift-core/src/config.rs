//! Module: config
//! Responsibility: tunable limits for the algebra, loadable from TOML text.
//! Does not own: reading files; callers hand over the text.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Default cap on the Cartesian product a bag shape may expand into.
pub const DEFAULT_MAX_PERMUTATIONS: usize = 256;

/// Default cap on how deeply criterion text may nest groups.
pub const DEFAULT_MAX_DEPTH: usize = 64;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid limit '{field}': {reason}")]
    InvalidLimit {
        field: &'static str,
        reason: &'static str,
    },
}

///
/// SiftConfig
///
/// Top-level configuration. Every section is optional.
///
/// ```toml
/// [reshape]
/// max_permutations = 64
///
/// [grammar]
/// max_depth = 32
/// ```
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiftConfig {
    pub reshape: ReshapeLimits,
    pub grammar: GrammarLimits,
}

impl SiftConfig {
    /// Parse and validate configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reshape.validate()?;
        self.grammar.validate()
    }
}

///
/// ReshapeLimits
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReshapeLimits {
    /// Largest number of bags a single `Named` reshape may emit.
    pub max_permutations: usize,
}

impl ReshapeLimits {
    #[must_use]
    pub const fn new(max_permutations: usize) -> Self {
        Self { max_permutations }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_permutations == 0 {
            return Err(ConfigError::InvalidLimit {
                field: "reshape.max_permutations",
                reason: "must be at least 1",
            });
        }

        Ok(())
    }
}

impl Default for ReshapeLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PERMUTATIONS)
    }
}

///
/// GrammarLimits
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrammarLimits {
    /// Deepest group nesting the parser accepts; the whole text is depth 1.
    pub max_depth: usize,
}

impl GrammarLimits {
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidLimit {
                field: "grammar.max_depth",
                reason: "must be at least 1",
            });
        }

        Ok(())
    }
}

impl Default for GrammarLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

///
/// TESTS
///
