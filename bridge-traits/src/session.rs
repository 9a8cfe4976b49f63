//! Media session bridge traits.
//!
//! The session surface is the OS facility that shows now-playing metadata
//! (lock screen, notification shade, bluetooth displays) and forwards
//! user-initiated transport commands back into the app. Host platforms
//! implement [`SessionSurface`] over their native API (MPNowPlayingInfoCenter,
//! MediaSession, MPRIS, SMTC); the transport core stays platform-agnostic.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Metadata pushed to the session surface whenever the observable transport
/// state changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    /// Display title for the track.
    pub title: String,
    /// Display artist string.
    pub artist: String,
    /// Artwork URI, when the catalog supplied one.
    pub artwork: Option<String>,
    /// Whether audio is actually running (drives the play/pause glyph).
    pub is_playing: bool,
}

/// Transport command originating from the session surface.
///
/// Duplicate delivery is allowed; the transport core's command handlers are
/// idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Play,
    Pause,
    Next,
    Previous,
    Stop,
}

/// Callback installed by the session binder to receive inbound commands.
pub type CommandListener = Arc<dyn Fn(SessionCommand) + Send + Sync>;

/// Platform "now playing" surface.
///
/// Publishing is one-way and best-effort: a failing surface must never
/// destabilize the transport state machine, so callers log and continue on
/// error. Command listeners are installed at bind time and removed at unbind
/// time; installing a listener replaces any previous one, which is what keeps
/// re-binding from duplicating registrations.
#[async_trait]
pub trait SessionSurface: Send + Sync {
    /// Update the surface with the current now-playing metadata.
    ///
    /// `None` clears the surface (nothing is playing).
    async fn publish(&self, now_playing: Option<NowPlaying>) -> Result<()>;

    /// Install the inbound command listener, replacing any prior one.
    fn set_command_listener(&self, listener: CommandListener);

    /// Remove the inbound command listener, if any.
    fn clear_command_listener(&self);
}
