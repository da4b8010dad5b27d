//! Configuration for the client layer.

use pantry_engine::LOCAL_CAP;
use std::env;

/// Tunables for the saved-foods service.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Maximum records kept in the local list.
    pub local_cap: usize,
}

impl SyncConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let local_cap = match env::var("PANTRY_LOCAL_CAP") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidLocalCap(raw.clone()))?,
            Err(_) => LOCAL_CAP,
        };

        Ok(Self { local_cap })
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            local_cap: LOCAL_CAP,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PANTRY_LOCAL_CAP value: {0}")]
    InvalidLocalCap(String),
}
