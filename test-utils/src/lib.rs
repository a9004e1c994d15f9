//! Staffdesk Test Utils
//!
//! Provides shared testing utilities for the staffdesk bot. This crate offers a builder
//! for creating test contexts backed by in-memory SQLite databases and factories for
//! seeding stored documents.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Helpers for inserting raw documents (including malformed ones)
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_store() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_document_table().build().await?;
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
