use thiserror::Error;

/// Failures of the record store.
///
/// Every variant is surfaced to users as a generic "storage unavailable" failure; the
/// detail is only ever logged.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database operation error from SeaORM.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Stored body could not be decoded into the collection's document type.
    ///
    /// The stored row is left untouched so the data can be recovered by hand.
    #[error("Stored document '{collection}' is corrupt: {source}")]
    Corrupt {
        /// Collection whose body failed to decode
        collection: &'static str,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Document could not be encoded for storage.
    #[error("Failed to encode document '{collection}': {source}")]
    Serialize {
        /// Collection being saved
        collection: &'static str,
        /// Underlying encode error
        #[source]
        source: serde_json::Error,
    },

    /// Stored document was written by a newer schema than this build understands.
    #[error("Stored document '{collection}' has version {found}, newest supported is {supported}")]
    UnsupportedVersion {
        /// Collection with the unknown version
        collection: &'static str,
        /// Version found in storage
        found: i32,
        /// Newest version this build can read
        supported: i32,
    },
}
