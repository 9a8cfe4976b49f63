//! # Playback Coordinator
//!
//! Single-track transport state machine. All transport commands, whether
//! issued by the UI or forwarded from the OS session surface, funnel through
//! the command methods on [`PlaybackCoordinator`] so there is exactly one
//! mutation path for the live session.
//!
//! ```text
//! ┌──────────────┐  play/pause/...   ┌──────────────────────┐
//! │ Presentation │ ────────────────▶ │ PlaybackCoordinator  │
//! └──────────────┘                   │  - PlaybackSession   │
//! ┌──────────────┐  same entrypoints │  - generation token  │
//! │ SessionBinder│ ────────────────▶ │  - ResourceHandle    │
//! └──────────────┘                   └──────────┬───────────┘
//!        ▲ publish(NowPlaying)                  │ open/stop/release
//!        └──────────────────────────────────────┤
//!                                    ┌──────────▼───────────┐
//!                                    │ AudioBackend (host)  │
//!                                    └──────────────────────┘
//! ```
//!
//! ## Staleness discipline
//!
//! Commands run on a cooperative executor and their completions can arrive
//! out of order. Every load bumps the session's generation counter; every
//! deferred completion (resource open, pause confirmation, end-of-track
//! notification) captures the generation at its start and is discarded if
//! the session has moved on. This is the only cancellation mechanism: an
//! in-flight open is never aborted, its result is simply thrown away.

use crate::config::TransportConfig;
use crate::error::{Result, TransportError};
use crate::sequencer::{self, Advance, Direction};
use crate::session::{PlaybackSession, PlayerSnapshot, TransportStatus};
use crate::track::Track;
use bridge_traits::{AudioBackend, ResourceHandle, SessionSurface};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

type FullPlayerHandler = Arc<dyn Fn() + Send + Sync>;

enum Toggle {
    Pause,
    Resume,
}

/// What became of a resource open, settled under the session lock.
enum LoadOutcome {
    /// A newer play/stop won the race; the handle, if the open succeeded,
    /// still has to be released.
    Superseded(Option<Arc<dyn ResourceHandle>>),
    Ready(Arc<dyn ResourceHandle>),
    Failed(TransportError),
}

/// The playback coordinator. Cheap to clone; all clones share one session.
#[derive(Clone)]
pub struct PlaybackCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Arc<dyn AudioBackend>,
    config: TransportConfig,
    session: Mutex<PlaybackSession>,
    surface: Mutex<Option<Arc<dyn SessionSurface>>>,
    state_tx: watch::Sender<PlayerSnapshot>,
    full_player_handler: Mutex<Option<FullPlayerHandler>>,
}

impl PlaybackCoordinator {
    /// Create a coordinator with the default configuration.
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self::with_config(backend, TransportConfig::default())
    }

    /// Create a coordinator with an explicit configuration.
    ///
    /// An invalid configuration is replaced by the defaults with a warning
    /// rather than failing construction; playback must stay available.
    pub fn with_config(backend: Arc<dyn AudioBackend>, config: TransportConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(reason) => {
                warn!(%reason, "invalid transport config, using defaults");
                TransportConfig::default()
            }
        };
        let (state_tx, _) = watch::channel(PlayerSnapshot::idle());
        Self {
            inner: Arc::new(Inner {
                backend,
                config,
                session: Mutex::new(PlaybackSession::new()),
                surface: Mutex::new(None),
                state_tx,
                full_player_handler: Mutex::new(None),
            }),
        }
    }

    // ========================================================================
    // Observable state
    // ========================================================================

    /// Current session state, by value.
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.inner.session.lock().snapshot()
    }

    /// Subscribe to session state changes.
    ///
    /// The receiver always starts with the latest snapshot, so subscribers
    /// never miss the current state.
    pub fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.inner.state_tx.subscribe()
    }

    /// Whether `url` identifies the currently bound track. Used by the
    /// presentation layer for active-row highlighting.
    pub fn is_current(&self, url: &str) -> bool {
        self.inner.session.lock().is_current(url)
    }

    // ========================================================================
    // Transport commands
    // ========================================================================

    /// Play `track`, with toggle semantics.
    ///
    /// Re-issuing `play` on the currently playing track pauses it; on the
    /// currently paused track it resumes. `force_restart` bypasses both
    /// shortcuts and always reloads from the beginning.
    ///
    /// # Errors
    ///
    /// - [`TransportError::UnplayableTrack`] when the track has a blank URL;
    ///   raised before anything is touched.
    /// - [`TransportError::LoadFailure`] / [`TransportError::LoadTimeout`]
    ///   when the resource open fails. The session ends up at `Error` with
    ///   the current track cleared; retry is a fresh `play` call.
    #[instrument(skip(self, track), fields(url = %track.url))]
    pub async fn play(&self, track: Track, force_restart: bool) -> Result<()> {
        if !track.is_playable() {
            warn!(title = %track.title, "rejecting track without stream URL");
            return Err(TransportError::UnplayableTrack { title: track.title });
        }

        if !force_restart {
            let shortcut = {
                let session = self.inner.session.lock();
                if session.is_current(&track.url) {
                    match session.status {
                        TransportStatus::Playing => Some(Toggle::Pause),
                        TransportStatus::Paused => Some(Toggle::Resume),
                        _ => None,
                    }
                } else {
                    None
                }
            };
            match shortcut {
                Some(Toggle::Pause) => {
                    self.pause().await;
                    return Ok(());
                }
                Some(Toggle::Resume) => {
                    self.resume().await;
                    return Ok(());
                }
                None => {}
            }
        }

        // Begin a new load. Bumping the generation here invalidates every
        // still-outstanding completion from earlier loads.
        let (generation, old_handle) = {
            let mut session = self.inner.session.lock();
            session.generation += 1;
            session.status = TransportStatus::Loading;
            session.current_track = Some(track.clone());
            session.track_ended = false;
            (session.generation, session.handle.take())
        };
        info!(generation, "loading track");
        self.push_state().await;

        // Teardown of the previous resource is issued before the new open so
        // two platform resources are never live at once.
        if let Some(old) = old_handle {
            self.teardown(old).await;
        }

        let opened = self.open_resource(&track.url).await;

        // Settle the outcome entirely under the lock; every await below runs
        // with the guard released, which keeps the command future Send.
        let outcome = {
            let mut session = self.inner.session.lock();
            if session.generation != generation {
                // A newer play/stop superseded this load while the open was
                // in flight. Its state wins; this result is discarded.
                LoadOutcome::Superseded(opened.ok())
            } else {
                match opened {
                    Ok(handle) => {
                        session.handle = Some(Arc::clone(&handle));
                        session.status = TransportStatus::Playing;
                        LoadOutcome::Ready(handle)
                    }
                    Err(err) => {
                        session.status = TransportStatus::Error;
                        session.current_track = None;
                        session.handle = None;
                        LoadOutcome::Failed(err)
                    }
                }
            }
        };

        let handle = match outcome {
            LoadOutcome::Superseded(stale) => {
                if let Some(stale) = stale {
                    debug!(generation, "discarding superseded load");
                    self.teardown(stale).await;
                }
                return Ok(());
            }
            LoadOutcome::Failed(err) => {
                warn!(error = %err, "resource open failed");
                self.push_state().await;
                return Err(err);
            }
            LoadOutcome::Ready(handle) => handle,
        };

        if let Err(err) = handle.play().await {
            // Matches the shipped client: a begin-playback failure after a
            // successful open is logged and the optimistic state stands.
            warn!(error = %err, "begin playback failed");
        }
        info!(generation, "track playing");
        self.push_state().await;
        self.spawn_ended_watcher(handle, generation);
        Ok(())
    }

    /// Pause the running track. No-op unless the transport is `Playing`.
    pub async fn pause(&self) {
        let (handle, generation) = {
            let session = self.inner.session.lock();
            if session.status != TransportStatus::Playing {
                debug!(status = ?session.status, "pause ignored");
                return;
            }
            match &session.handle {
                Some(handle) => (Arc::clone(handle), session.generation),
                None => return,
            }
        };

        match handle.pause().await {
            Ok(()) => {
                let changed = {
                    let mut session = self.inner.session.lock();
                    if session.generation == generation
                        && session.status == TransportStatus::Playing
                    {
                        session.status = TransportStatus::Paused;
                        true
                    } else {
                        false
                    }
                };
                if changed {
                    debug!("transport paused");
                    self.push_state().await;
                }
            }
            Err(err) => warn!(error = %err, "pause request failed"),
        }
    }

    /// Resume the paused track.
    ///
    /// Deliberately optimistic: the status flips to `Playing` and metadata
    /// is pushed before the engine confirms, so the UI reflects intent
    /// immediately. A later resume failure is logged only. No-op unless the
    /// transport is `Paused` with a loaded handle.
    pub async fn resume(&self) {
        let (handle, rearm) = {
            let mut session = self.inner.session.lock();
            if session.status != TransportStatus::Paused {
                debug!(status = ?session.status, "resume ignored");
                return;
            }
            let Some(handle) = session.handle.clone() else {
                return;
            };
            if !handle.is_loaded() {
                debug!("resume ignored, resource not loaded");
                return;
            }
            session.status = TransportStatus::Playing;
            let rearm = if session.track_ended {
                session.track_ended = false;
                Some(session.generation)
            } else {
                None
            };
            (handle, rearm)
        };

        // Resuming past a natural end needs a fresh end-of-track watcher;
        // the one from the original load has already fired.
        if let Some(generation) = rearm {
            self.spawn_ended_watcher(Arc::clone(&handle), generation);
        }

        self.push_state().await;
        if let Err(err) = handle.resume().await {
            warn!(error = %err, "resume request failed");
        }
    }

    /// Stop playback and release the resource. Valid in any state.
    ///
    /// Teardown failures are swallowed: the user-visible goal, nothing is
    /// playing, is reached regardless.
    pub async fn stop(&self) {
        let old_handle = {
            let mut session = self.inner.session.lock();
            session.generation += 1;
            session.current_track = None;
            session.status = TransportStatus::Stopped;
            session.handle.take()
        };
        info!("transport stopped");
        if let Some(handle) = old_handle {
            self.teardown(handle).await;
        }
        self.push_state().await;
    }

    /// Advance to the next track in `catalog`.
    ///
    /// # Errors
    ///
    /// Propagates the underlying `play` failure, if any.
    pub async fn next_track(&self, catalog: &[Track]) -> Result<()> {
        self.advance(catalog, Direction::Next).await
    }

    /// Step back to the previous track in `catalog`.
    ///
    /// # Errors
    ///
    /// Propagates the underlying `play` failure, if any.
    pub async fn previous_track(&self, catalog: &[Track]) -> Result<()> {
        self.advance(catalog, Direction::Previous).await
    }

    async fn advance(&self, catalog: &[Track], direction: Direction) -> Result<()> {
        let current = self.inner.session.lock().current_track.clone();
        match sequencer::resolve(current.as_ref(), catalog, direction) {
            None => {
                debug!("empty catalog, nothing to advance to");
                Ok(())
            }
            Some(Advance::Play(track)) => self.play(track, false).await,
            // Forcing the restart keeps the toggle shortcut from pausing
            // instead of replaying when the neighbor is the current track.
            Some(Advance::Restart(track)) => self.play(track, true).await,
        }
    }

    // ========================================================================
    // Presentation side-channel
    // ========================================================================

    /// Install the "open full player" callback supplied by the presentation
    /// layer. Replaces any prior handler.
    pub fn set_full_player_handler(&self, handler: impl Fn() + Send + Sync + 'static) {
        *self.inner.full_player_handler.lock() = Some(Arc::new(handler));
    }

    /// Ask the presentation layer to navigate to the full player. This is a
    /// UI affordance, not transport state.
    pub fn request_full_player(&self) {
        let handler = self.inner.full_player_handler.lock().clone();
        match handler {
            Some(handler) => handler(),
            None => debug!("full player requested with no handler installed"),
        }
    }

    // ========================================================================
    // Session surface wiring (used by the binder)
    // ========================================================================

    pub(crate) fn attach_surface(&self, surface: Arc<dyn SessionSurface>) {
        *self.inner.surface.lock() = Some(surface);
    }

    pub(crate) fn detach_surface(&self) {
        *self.inner.surface.lock() = None;
    }

    // ========================================================================
    // Internals
    // ========================================================================

    async fn open_resource(&self, url: &str) -> Result<Arc<dyn ResourceHandle>> {
        let map_err = |source| TransportError::LoadFailure {
            url: url.to_string(),
            source,
        };
        match self.inner.config.load_timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.inner.backend.open(url)).await {
                    Ok(result) => result.map_err(map_err),
                    Err(_) => Err(TransportError::LoadTimeout {
                        url: url.to_string(),
                        timeout_ms: limit.as_millis() as u64,
                    }),
                }
            }
            None => self.inner.backend.open(url).await.map_err(map_err),
        }
    }

    /// Stop and release a handle, best-effort. Failures never block the
    /// command that triggered the teardown.
    async fn teardown(&self, handle: Arc<dyn ResourceHandle>) {
        if let Err(err) = handle.stop().await {
            warn!(error = %err, "stopping resource failed");
        }
        if let Err(err) = handle.release().await {
            warn!(error = %err, "releasing resource failed");
        }
    }

    /// Broadcast the current snapshot and mirror it to the session surface.
    /// Surface failures are contained here.
    async fn push_state(&self) {
        let snapshot = self.inner.session.lock().snapshot();
        self.inner.state_tx.send_replace(snapshot.clone());

        let surface = self.inner.surface.lock().clone();
        if let Some(surface) = surface {
            let now_playing = snapshot
                .current_track
                .as_ref()
                .map(|track| track.now_playing(snapshot.is_playing()));
            if let Err(err) = surface.publish(now_playing).await {
                warn!(error = %err, "session surface publish failed");
            }
        }
    }

    fn spawn_ended_watcher(&self, handle: Arc<dyn ResourceHandle>, generation: u64) {
        let coordinator = self.clone();
        tokio::spawn(async move {
            if handle.ended().await {
                coordinator.finish_track(generation).await;
            }
        });
    }

    /// Deferred completion for a natural end of track. The track and its
    /// resource are retained until the next command; only the status flips.
    async fn finish_track(&self, generation: u64) {
        let changed = {
            let mut session = self.inner.session.lock();
            if session.generation == generation {
                session.status = TransportStatus::Paused;
                session.track_ended = true;
                true
            } else {
                false
            }
        };
        if changed {
            debug!(generation, "track ended");
            self.push_state().await;
        }
    }
}
