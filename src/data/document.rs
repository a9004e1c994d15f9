//! Document repository for the collection table.
//!
//! Each record collection (incident reports, no-show data, bonus ledgers) is persisted
//! as one row holding the whole collection as JSON text. This repository only moves
//! rows in and out; decoding and versioning live in the record store.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

/// Repository providing database operations for stored documents.
pub struct DocumentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DocumentRepository<'a> {
    /// Creates a new DocumentRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `DocumentRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the stored document for a collection.
    ///
    /// # Arguments
    /// - `collection` - Collection name, the table's primary key
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Document row exists
    /// - `Ok(None)` - Collection has never been written
    /// - `Err(DbErr)` - Database error during query
    pub async fn find(
        &self,
        collection: &str,
    ) -> Result<Option<entity::document::Model>, DbErr> {
        entity::prelude::Document::find_by_id(collection.to_string())
            .one(self.db)
            .await
    }

    /// Creates the row for a collection unless one already exists.
    ///
    /// An existing row is left untouched, so two callers racing to initialize the
    /// same collection cannot overwrite each other.
    ///
    /// # Arguments
    /// - `collection` - Collection name
    /// - `version` - Schema version of `body`
    /// - `body` - Initial JSON text
    ///
    /// # Returns
    /// - `Ok(())` - Row exists after the call
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create_if_missing(
        &self,
        collection: &str,
        version: i32,
        body: String,
    ) -> Result<(), DbErr> {
        entity::prelude::Document::insert(entity::document::ActiveModel {
            collection: ActiveValue::Set(collection.to_string()),
            version: ActiveValue::Set(version),
            body: ActiveValue::Set(body),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::document::Column::Collection)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Replaces the stored document for a collection, creating it if needed.
    ///
    /// # Arguments
    /// - `collection` - Collection name
    /// - `version` - Schema version of `body`
    /// - `body` - Complete JSON text of the collection
    ///
    /// # Returns
    /// - `Ok(Model)` - The stored row
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert(
        &self,
        collection: &str,
        version: i32,
        body: String,
    ) -> Result<entity::document::Model, DbErr> {
        entity::prelude::Document::insert(entity::document::ActiveModel {
            collection: ActiveValue::Set(collection.to_string()),
            version: ActiveValue::Set(version),
            body: ActiveValue::Set(body),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::document::Column::Collection)
                .update_columns([
                    entity::document::Column::Version,
                    entity::document::Column::Body,
                    entity::document::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await
    }
}
