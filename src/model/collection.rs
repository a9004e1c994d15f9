//! Named collections and the trait tying a document type to its collection.

use serde::{de::DeserializeOwned, Serialize};

/// A persisted collection. Each one is stored as a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    IncidentReports,
    NoShows,
    PerformanceBonuses,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::IncidentReports,
        Collection::NoShows,
        Collection::PerformanceBonuses,
    ];

    /// Storage key of the collection.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::IncidentReports => "incident_reports",
            Collection::NoShows => "no_show_data",
            Collection::PerformanceBonuses => "performance_bonus",
        }
    }
}

/// A whole-document record type owned by the record store.
///
/// `VERSION` is written next to the body on every save. Bump it when the serialized
/// shape changes incompatibly and teach `Default`/serde how to read the old one.
pub trait Document: Serialize + DeserializeOwned + Default + Send + Sync + 'static {
    const COLLECTION: Collection;
    const VERSION: i32;
}
