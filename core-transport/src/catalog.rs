//! Catalog ordering source.

use crate::track::Track;

/// Ordered track listing maintained by the external catalog service.
///
/// The transport core never owns this ordering; it only reads it to resolve
/// next/previous. The session binder consults it when an OS transport command
/// arrives, since the OS cannot pass a catalog along.
pub trait CatalogSource: Send + Sync {
    /// The current catalog ordering, first-to-last.
    fn ordered_tracks(&self) -> Vec<Track>;
}

impl CatalogSource for Vec<Track> {
    fn ordered_tracks(&self) -> Vec<Track> {
        self.clone()
    }
}

impl<T: CatalogSource> CatalogSource for std::sync::Arc<T> {
    fn ordered_tracks(&self) -> Vec<Track> {
        (**self).ordered_tracks()
    }
}
