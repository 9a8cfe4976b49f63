//! # Transport Error Types
//!
//! Error types for transport command handling.
//!
//! Only two failures ever reach callers: a track that cannot be played at
//! all, and a resource open that failed. Teardown and session-surface
//! failures are contained inside the core and logged, never surfaced.

use bridge_traits::BridgeError;
use thiserror::Error;

/// Errors surfaced to the presentation layer by transport commands.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The track has a blank stream URL and can never be loaded.
    ///
    /// Raised synchronously, before any resource open is attempted; the
    /// session state is left untouched.
    #[error("Track \"{title}\" has no playable stream URL")]
    UnplayableTrack {
        /// Display title, for the host's toast/alert.
        title: String,
    },

    /// The audio resource for a track's URL could not be opened.
    ///
    /// Terminal for that attempt: the session transitions to `Error` with
    /// the current track cleared. Retry is a fresh `play` call.
    #[error("Failed to open audio resource for {url}")]
    LoadFailure {
        /// Stream URL that failed to open.
        url: String,
        /// Underlying bridge failure.
        #[source]
        source: BridgeError,
    },

    /// The resource open exceeded the configured load timeout.
    #[error("Loading {url} timed out after {timeout_ms} ms")]
    LoadTimeout { url: String, timeout_ms: u64 },
}

impl TransportError {
    /// Returns `true` if this error reports a failed or timed-out load.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            TransportError::LoadFailure { .. } | TransportError::LoadTimeout { .. }
        )
    }
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
