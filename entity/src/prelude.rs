//! `SeaORM` Entity prelude.

pub use super::document::Entity as Document;
