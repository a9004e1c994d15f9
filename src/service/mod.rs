//! Service layer: the moderation workflows and the infrastructure they share.
//!
//! Workflows authorize the invoker, read or mutate collections through the
//! [`store::RecordStore`], and talk to Discord only through the ports in [`notify`].
//! Each returns a [`crate::error::workflow::WorkflowError`] the bot layer turns into
//! a reply.

pub mod auth;
pub mod ban;
pub mod bonus;
pub mod candidate;
pub mod commendation;
pub mod draft;
pub mod feedback;
pub mod incident;
pub mod no_show;
pub mod notify;
pub mod store;

#[cfg(test)]
mod test;
