//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and stay free of domain logic; the
//! record store in [`crate::service::store`] turns rows into typed documents.

pub mod document;

#[cfg(test)]
mod test;
