//! Track record consumed from the catalog service.

use bridge_traits::NowPlaying;
use serde::{Deserialize, Serialize};

/// One playable audio item, as supplied by the external catalog service.
///
/// The stream URL doubles as the track's stable identity: equality checks in
/// the transport core (active-row highlighting, toggle detection, sequencer
/// lookup) compare `url` by value, never references. The record is read-only
/// to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Stream URL; stable identity. A blank URL makes the track unplayable.
    pub url: String,
    /// Track title.
    pub title: String,
    /// Display artist string.
    pub artist: String,
    /// Artwork URI, when available.
    #[serde(default)]
    pub cover: Option<String>,
    /// Lyrics text, when available.
    #[serde(default)]
    pub lyrics: Option<String>,
    /// Display duration string. Not authoritative; never used for timing.
    #[serde(default)]
    pub duration_hint: Option<String>,
}

impl Track {
    /// Create a track with just identity and display fields.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            artist: artist.into(),
            cover: None,
            lyrics: None,
            duration_hint: None,
        }
    }

    /// Attach an artwork URI.
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Returns `true` if the track has a non-blank stream URL.
    pub fn is_playable(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Identity comparison by stream URL.
    pub fn is_same(&self, other: &Track) -> bool {
        self.url == other.url
    }

    /// Build the session-surface metadata for this track.
    pub fn now_playing(&self, is_playing: bool) -> NowPlaying {
        NowPlaying {
            title: self.title.clone(),
            artist: self.artist.clone(),
            artwork: self.cover.clone(),
            is_playing,
        }
    }
}
