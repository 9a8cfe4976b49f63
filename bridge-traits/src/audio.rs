//! Audio bridge traits.
//!
//! These abstractions let the transport core drive a platform audio engine
//! without knowing how the host decodes or routes sound. The host provides an
//! [`AudioBackend`] that turns a stream URL into an exclusively owned
//! [`ResourceHandle`]; the transport core guarantees that at most one handle
//! is alive at a time and that every handle is released before a new one is
//! opened.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Factory for platform audio resources.
///
/// `open` is the only long-latency call in the playback pipeline. It must not
/// be cancelled by the caller; the transport core tolerates late completions
/// and discards superseded ones, so implementations are free to let an
/// in-flight open run to completion even after a newer open has started.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Open the audio resource behind `url` and prepare it for playback.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL cannot be resolved or fetched
    /// - The audio format is not supported by the platform engine
    /// - The audio device is unavailable
    async fn open(&self, url: &str) -> Result<Arc<dyn ResourceHandle>>;
}

/// Live, exclusively owned audio resource bound to one stream URL.
///
/// Control methods are expected to be fast; the heavy lifting happened in
/// [`AudioBackend::open`]. After `release` the handle is dead and every other
/// method may fail.
#[async_trait]
pub trait ResourceHandle: Send + Sync {
    /// Begin playback from the start of the stream.
    async fn play(&self) -> Result<()>;

    /// Pause playback, preserving the current position.
    async fn pause(&self) -> Result<()>;

    /// Resume playback from the paused position.
    async fn resume(&self) -> Result<()>;

    /// Stop playback and reset the position to the start of the stream.
    async fn stop(&self) -> Result<()>;

    /// Free the underlying platform resource. Idempotent.
    async fn release(&self) -> Result<()>;

    /// Whether the resource finished loading and can accept control calls.
    fn is_loaded(&self) -> bool;

    /// Wait for the track to finish playing.
    ///
    /// Resolves to `true` when the stream reaches its natural end, `false`
    /// when the handle is stopped or released first. Awaiting again after a
    /// natural end waits for the next one: the transport core re-arms its
    /// end-of-track watcher when playback resumes past the end.
    async fn ended(&self) -> bool;
}
