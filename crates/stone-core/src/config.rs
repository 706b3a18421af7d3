use crate::error::StoneError;
use serde::{Deserialize, Serialize};

/// Default nesting limit for decoded wire documents. Kept below serde_json's own limit of 128.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Environment keys read by [`WireConfig::from_env`]
pub struct ConfigKeys;

impl ConfigKeys {
    pub const MAX_DEPTH: &'static str = "STONE_WIRE_MAX_DEPTH";
    pub const STRICT: &'static str = "STONE_WIRE_STRICT"; // "true" / "false"
}

/// Settings shared by the wire decoder and the struct helpers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireConfig {
    /// Deepest nesting accepted by [`crate::wire::decode_with`]
    pub max_depth: usize,
    /// Reject object keys a struct reader did not consume
    pub strict: bool,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }
}

impl WireConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Load from the process environment, falling back to defaults for unset keys
    pub fn from_env() -> Result<Self, StoneError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoneError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ConfigKeys::MAX_DEPTH) {
            let depth: usize = raw.trim().parse().map_err(|_| {
                StoneError::Config(format!(
                    "{} must be a positive integer, got '{}'",
                    ConfigKeys::MAX_DEPTH,
                    raw
                ))
            })?;
            if depth == 0 {
                return Err(StoneError::Config(format!(
                    "{} must be greater than 0",
                    ConfigKeys::MAX_DEPTH
                )));
            }
            config.max_depth = depth;
        }

        if let Some(raw) = lookup(ConfigKeys::STRICT) {
            config.strict = match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(StoneError::Config(format!(
                        "{} must be 'true' or 'false', got '{}'",
                        ConfigKeys::STRICT,
                        raw
                    )))
                }
            };
        }

        tracing::debug!("Wire config: max_depth={} strict={}", config.max_depth, config.strict);
        Ok(config)
    }
}
