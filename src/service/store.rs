//! Record store: whole-document persistence for each collection.
//!
//! A collection is read and written as one typed document. Mutations go through
//! [`RecordStore::lock`], which holds the collection's mutex across the whole
//! load, mutate, save cycle so concurrent commands cannot lose each other's updates.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    data::document::DocumentRepository,
    error::storage::StorageError,
    model::collection::{Collection, Document},
};

/// Typed access to the stored collections.
///
/// Cheap to clone; clones share the database pool and the per-collection locks.
#[derive(Clone)]
pub struct RecordStore {
    db: DatabaseConnection,
    locks: Arc<HashMap<Collection, Arc<Mutex<()>>>>,
}

impl RecordStore {
    pub fn new(db: DatabaseConnection) -> Self {
        let locks = Collection::ALL
            .iter()
            .map(|c| (*c, Arc::new(Mutex::new(()))))
            .collect();

        Self {
            db,
            locks: Arc::new(locks),
        }
    }

    /// Loads a snapshot of a collection.
    ///
    /// A collection that has never been written is created empty and returned as the
    /// default document. The snapshot is not protected against concurrent writers;
    /// use [`RecordStore::lock`] to mutate.
    ///
    /// # Returns
    /// - `Ok(D)` - Decoded document
    /// - `Err(StorageError::Database)` - Row could not be read or created
    /// - `Err(StorageError::Corrupt)` - Stored body does not decode as `D`
    /// - `Err(StorageError::UnsupportedVersion)` - Stored body was written by a newer schema
    pub async fn load<D: Document>(&self) -> Result<D, StorageError> {
        let name = D::COLLECTION.name();
        let repo = DocumentRepository::new(&self.db);

        match repo.find(name).await? {
            Some(row) => decode::<D>(row),
            None => {
                let document = D::default();
                repo.create_if_missing(name, D::VERSION, encode(&document)?)
                    .await?;

                tracing::info!("Initialized empty collection {}", name);

                Ok(document)
            }
        }
    }

    /// Replaces a collection wholesale.
    ///
    /// A failed save means the mutation did not happen; callers must not report
    /// success after an error.
    pub async fn save<D: Document>(&self, document: &D) -> Result<(), StorageError> {
        let name = D::COLLECTION.name();

        DocumentRepository::new(&self.db)
            .upsert(name, D::VERSION, encode(document)?)
            .await?;

        Ok(())
    }

    /// Acquires exclusive access to a collection and loads it.
    ///
    /// Other `lock` callers for the same collection wait until the returned guard is
    /// committed or dropped. Dropping without [`DocumentGuard::commit`] discards the
    /// in-memory changes.
    pub async fn lock<D: Document>(&self) -> Result<DocumentGuard<D>, StorageError> {
        let lock = self.mutex(D::COLLECTION).lock_owned().await;
        let document = self.load::<D>().await?;

        Ok(DocumentGuard {
            store: self.clone(),
            document,
            _lock: lock,
        })
    }

    fn mutex(&self, collection: Collection) -> Arc<Mutex<()>> {
        self.locks
            .get(&collection)
            .cloned()
            .unwrap_or_else(|| Arc::new(Mutex::new(())))
    }
}

/// Exclusive, mutable view of a loaded collection.
pub struct DocumentGuard<D: Document> {
    store: RecordStore,
    document: D,
    _lock: OwnedMutexGuard<()>,
}

impl<D: Document> DocumentGuard<D> {
    /// Saves the document and releases the collection.
    pub async fn commit(self) -> Result<(), StorageError> {
        self.store.save(&self.document).await
    }
}

impl<D: Document> Deref for DocumentGuard<D> {
    type Target = D;

    fn deref(&self) -> &D {
        &self.document
    }
}

impl<D: Document> DerefMut for DocumentGuard<D> {
    fn deref_mut(&mut self) -> &mut D {
        &mut self.document
    }
}

fn decode<D: Document>(row: entity::document::Model) -> Result<D, StorageError> {
    let name = D::COLLECTION.name();

    if row.version > D::VERSION {
        return Err(StorageError::UnsupportedVersion {
            collection: name,
            found: row.version,
            supported: D::VERSION,
        });
    }

    serde_json::from_str(&row.body).map_err(|source| {
        tracing::warn!(
            target: "data_integrity",
            "Stored collection {} failed to decode, leaving it untouched: {}",
            name,
            source
        );
        StorageError::Corrupt {
            collection: name,
            source,
        }
    })
}

fn encode<D: Document>(document: &D) -> Result<String, StorageError> {
    serde_json::to_string(document).map_err(|source| StorageError::Serialize {
        collection: D::COLLECTION.name(),
        source,
    })
}
