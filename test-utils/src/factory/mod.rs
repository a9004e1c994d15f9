//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let doc = factory::create_document(&db, "no_show_data", "{}").await?;
//! ```

pub mod document;
pub mod helpers;

pub use document::create_document;
