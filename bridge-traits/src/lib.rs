//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the playback core and
//! platform-specific integrations. Each trait represents a capability the
//! core requires but that is implemented differently per platform
//! (desktop, iOS, Android):
//!
//! - [`AudioBackend`](audio::AudioBackend) - Opens the platform's audio
//!   resource for a stream URL and hands back a [`ResourceHandle`](audio::ResourceHandle).
//! - [`SessionSurface`](session::SessionSurface) - The OS "now playing"
//!   surface (lock screen, notification, bluetooth): outbound metadata
//!   publishing and inbound transport commands.
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type for
//! consistent error handling. Platform implementations should convert
//! platform-specific errors to `BridgeError` and provide actionable messages.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks. Implementations must ensure thread safety.

pub mod audio;
pub mod error;
pub mod session;

pub use error::{BridgeError, Result};

// Re-export commonly used types
pub use audio::{AudioBackend, ResourceHandle};
pub use session::{CommandListener, NowPlaying, SessionCommand, SessionSurface};
