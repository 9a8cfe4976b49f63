//! # Transport & Session Module
//!
//! Single-track playback coordination for the streaming client.
//!
//! ## Overview
//!
//! This module handles:
//! - The transport state machine (idle/loading/playing/paused/stopped/error)
//! - Generation-token invalidation of stale async completions
//! - Next/previous resolution over the catalog ordering
//! - Binding to the OS media session surface (metadata out, commands in)

pub mod binder;
pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod sequencer;
pub mod session;
pub mod track;

pub use binder::SessionBinder;
pub use catalog::CatalogSource;
pub use config::TransportConfig;
pub use coordinator::PlaybackCoordinator;
pub use error::{Result, TransportError};
pub use session::{PlayerSnapshot, TransportStatus};
pub use track::Track;
