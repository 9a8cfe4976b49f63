//! Workspace placeholder crate.
//!
//! Host applications can depend on `playcore-workspace` and reach both member
//! crates through the re-exports below instead of wiring each crate
//! individually.

pub use bridge_traits;
pub use core_transport;
