//! Document factory for seeding stored collections.
//!
//! Repository and store tests use this to put arbitrary bodies in place, including
//! malformed JSON and versions the application does not understand.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating document rows with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::document::DocumentFactory;
///
/// let doc = DocumentFactory::new(&db)
///     .collection("incident_reports")
///     .body("{not json")
///     .build()
///     .await?;
/// ```
pub struct DocumentFactory<'a> {
    db: &'a DatabaseConnection,
    collection: String,
    version: i32,
    body: String,
}

impl<'a> DocumentFactory<'a> {
    /// Creates a new DocumentFactory with default values.
    ///
    /// Defaults:
    /// - collection: `"collection_{id}"` where id is auto-incremented
    /// - version: `1`
    /// - body: `"{}"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            collection: format!("collection_{}", next_id()),
            version: 1,
            body: "{}".to_string(),
        }
    }

    /// Sets the collection name (primary key).
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Sets the stored schema version.
    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Sets the raw body text, which is stored as-is without validation.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the body from a JSON value.
    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = value.to_string();
        self
    }

    /// Builds and inserts the document row.
    ///
    /// # Returns
    /// - `Ok(entity::document::Model)` - Created document row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::document::Model, DbErr> {
        entity::document::ActiveModel {
            collection: ActiveValue::Set(self.collection),
            version: ActiveValue::Set(self.version),
            body: ActiveValue::Set(self.body),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a document for `collection` holding `body` verbatim.
///
/// Shorthand for `DocumentFactory::new(db).collection(collection).body(body).build().await`.
pub async fn create_document(
    db: &DatabaseConnection,
    collection: &str,
    body: &str,
) -> Result<entity::document::Model, DbErr> {
    DocumentFactory::new(db)
        .collection(collection)
        .body(body)
        .build()
        .await
}
