//! # Transport Configuration
//!
//! Configuration for the playback coordinator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback coordinator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Maximum duration to wait for a resource open before treating the load
    /// as failed.
    ///
    /// `None` disables the timeout: a hung open leaves the transport at
    /// `Loading` until a later command supersedes it.
    ///
    /// Default: `None`.
    #[serde(default)]
    pub load_timeout: Option<Duration>,
}

impl TransportConfig {
    /// Create a configuration with a load timeout enabled.
    pub fn with_load_timeout(timeout: Duration) -> Self {
        Self {
            load_timeout: Some(timeout),
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(timeout) = self.load_timeout {
            if timeout.is_zero() {
                return Err("load_timeout must be greater than zero".to_string());
            }
        }
        Ok(())
    }
}
