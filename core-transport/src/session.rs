//! Live playback session state.
//!
//! A single [`PlaybackSession`] exists for the lifetime of the player. It is
//! mutated exclusively by the coordinator's command handlers; everything else
//! observes it through [`PlayerSnapshot`] values.

use crate::track::Track;
use bridge_traits::ResourceHandle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Transport lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportStatus {
    /// No track has ever been loaded.
    Idle,
    /// A resource open is in flight.
    Loading,
    /// Audio is running (or optimistically assumed to be, for `resume`).
    Playing,
    /// A track is loaded but not running. Also models a naturally ended
    /// track whose resource is retained until the next command.
    Paused,
    /// Explicit stop; resource released, no current track.
    Stopped,
    /// A load or playback attempt failed; resource released, track cleared.
    Error,
}

impl TransportStatus {
    /// Whether audio is (assumed to be) running.
    pub fn is_playing(&self) -> bool {
        matches!(self, TransportStatus::Playing)
    }

    /// Whether a resource open is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, TransportStatus::Loading)
    }
}

/// The coordinator's mutable state. One instance per process, owned by the
/// coordinator and guarded by its lock.
pub(crate) struct PlaybackSession {
    /// Track the session is currently bound to, if any.
    pub current_track: Option<Track>,
    /// Current transport status.
    pub status: TransportStatus,
    /// Exclusive handle on the platform audio resource. At most one
    /// unreleased handle exists at any time.
    pub handle: Option<Arc<dyn ResourceHandle>>,
    /// Monotonic load counter. Every deferred completion captures the value
    /// current at its start and is discarded if the session has moved on.
    pub generation: u64,
    /// Set when the current track reached its natural end. A resume past the
    /// end must re-arm the end-of-track watcher.
    pub track_ended: bool,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self {
            current_track: None,
            status: TransportStatus::Idle,
            handle: None,
            generation: 0,
            track_ended: false,
        }
    }

    /// Whether `url` identifies the session's current track.
    pub fn is_current(&self, url: &str) -> bool {
        self.current_track
            .as_ref()
            .map(|track| track.url == url)
            .unwrap_or(false)
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_track: self.current_track.clone(),
            status: self.status,
        }
    }
}

/// Read-only view of the session, broadcast to the presentation layer on
/// every observable state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Track the player is bound to, if any.
    pub current_track: Option<Track>,
    /// Current transport status.
    pub status: TransportStatus,
}

impl PlayerSnapshot {
    /// Snapshot of a player that has never loaded anything.
    pub fn idle() -> Self {
        Self {
            current_track: None,
            status: TransportStatus::Idle,
        }
    }

    /// Whether audio is (assumed to be) running.
    pub fn is_playing(&self) -> bool {
        self.status.is_playing()
    }

    /// Whether a resource open is in flight.
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }
}
