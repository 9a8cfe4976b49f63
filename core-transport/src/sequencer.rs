//! Track sequencer.
//!
//! Pure next/previous resolution over an externally supplied catalog
//! ordering. Stateless; the coordinator feeds the result back into `play`.

use crate::track::Track;

/// Direction to move through the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Outcome of a sequencer resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Load and play a different track.
    Play(Track),
    /// The neighbor is the current track itself (single-entry catalog or a
    /// wraparound landing back on it). The caller must force a restart so
    /// the play toggle shortcut does not pause/resume instead.
    Restart(Track),
}

/// Resolve the next or previous track relative to `current`.
///
/// Rules, in order:
/// - Empty catalog: nothing to do.
/// - No current track, or current track not found in the catalog by URL:
///   fall back to the first entry for `Next`, the last for `Previous`.
/// - Otherwise step the index by one with wraparound. If the neighbor turns
///   out to be the current track again, ask for a restart instead.
pub fn resolve(current: Option<&Track>, catalog: &[Track], direction: Direction) -> Option<Advance> {
    if catalog.is_empty() {
        return None;
    }

    let fallback = || match direction {
        Direction::Next => Advance::Play(catalog[0].clone()),
        Direction::Previous => Advance::Play(catalog[catalog.len() - 1].clone()),
    };

    let Some(current) = current else {
        return Some(fallback());
    };

    let Some(index) = catalog.iter().position(|track| track.is_same(current)) else {
        return Some(fallback());
    };

    let len = catalog.len();
    let neighbor = match direction {
        Direction::Next => (index + 1) % len,
        Direction::Previous => (index + len - 1) % len,
    };

    if len == 1 || catalog[neighbor].is_same(current) {
        return Some(Advance::Restart(current.clone()));
    }

    Some(Advance::Play(catalog[neighbor].clone()))
}
