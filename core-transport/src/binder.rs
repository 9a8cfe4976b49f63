//! Session binder.
//!
//! Glue between the coordinator and the OS session surface. Binding is a
//! two-way hookup: the coordinator gains a publish target for now-playing
//! metadata, and the surface gains a command listener that re-enters the
//! coordinator's own command methods, so OS-originated and UI-originated
//! commands share one code path.
//!
//! Lifecycle: the host binds once when the player UI mounts and unbinds on
//! unmount. `bind` always unbinds first, so re-binding never duplicates
//! listener registrations.

use crate::catalog::CatalogSource;
use crate::coordinator::PlaybackCoordinator;
use crate::error::Result;
use bridge_traits::{CommandListener, SessionCommand, SessionSurface};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Binds a [`PlaybackCoordinator`] to a platform [`SessionSurface`].
pub struct SessionBinder {
    coordinator: PlaybackCoordinator,
    surface: Arc<dyn SessionSurface>,
    catalog: Arc<dyn CatalogSource>,
    bound: Mutex<bool>,
}

impl SessionBinder {
    /// Create an unbound binder.
    ///
    /// `catalog` supplies the ordering used when the OS sends next/previous,
    /// since the surface cannot pass a catalog along with the command.
    pub fn new(
        coordinator: PlaybackCoordinator,
        surface: Arc<dyn SessionSurface>,
        catalog: Arc<dyn CatalogSource>,
    ) -> Self {
        Self {
            coordinator,
            surface,
            catalog,
            bound: Mutex::new(false),
        }
    }

    /// Hook the surface up to the coordinator. Unbinds any prior
    /// registration first.
    pub fn bind(&self) {
        self.unbind();

        let coordinator = self.coordinator.clone();
        let catalog = Arc::clone(&self.catalog);
        let listener: CommandListener = Arc::new(move |command| {
            let coordinator = coordinator.clone();
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move {
                if let Err(err) = dispatch(coordinator, catalog, command).await {
                    warn!(error = %err, ?command, "external transport command failed");
                }
            });
        });

        self.surface.set_command_listener(listener);
        self.coordinator.attach_surface(Arc::clone(&self.surface));
        *self.bound.lock() = true;
        info!("session surface bound");
    }

    /// Detach the surface: remove the command listener, stop publishing, and
    /// clear any stale now-playing entry from the surface.
    pub fn unbind(&self) {
        let was_bound = std::mem::replace(&mut *self.bound.lock(), false);

        self.surface.clear_command_listener();
        self.coordinator.detach_surface();

        if was_bound {
            let surface = Arc::clone(&self.surface);
            tokio::spawn(async move {
                if let Err(err) = surface.publish(None).await {
                    warn!(error = %err, "clearing session surface failed");
                }
            });
            info!("session surface unbound");
        }
    }

    /// Whether the surface is currently bound.
    pub fn is_bound(&self) -> bool {
        *self.bound.lock()
    }

    /// Handle one inbound transport command.
    ///
    /// This is the same entrypoint the installed listener spawns into;
    /// hosts that receive commands on their own channel can call it
    /// directly.
    ///
    /// # Errors
    ///
    /// Propagates load failures from the coordinator, exactly as the
    /// equivalent UI command would.
    pub async fn handle_command(&self, command: SessionCommand) -> Result<()> {
        dispatch(
            self.coordinator.clone(),
            Arc::clone(&self.catalog),
            command,
        )
        .await
    }
}

/// Route an external command into the coordinator's command methods.
async fn dispatch(
    coordinator: PlaybackCoordinator,
    catalog: Arc<dyn CatalogSource>,
    command: SessionCommand,
) -> Result<()> {
    debug!(?command, "external transport command");
    match command {
        SessionCommand::Play => {
            // Commands can race teardown; a play with nothing bound is noise.
            let Some(track) = coordinator.snapshot().current_track else {
                debug!("external play ignored, no current track");
                return Ok(());
            };
            coordinator.play(track, false).await
        }
        SessionCommand::Pause => {
            coordinator.pause().await;
            Ok(())
        }
        SessionCommand::Stop => {
            coordinator.stop().await;
            Ok(())
        }
        SessionCommand::Next => coordinator.next_track(&catalog.ordered_tracks()).await,
        SessionCommand::Previous => {
            coordinator
                .previous_track(&catalog.ordered_tracks())
                .await
        }
    }
}
