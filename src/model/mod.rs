//! Domain models shared by the workflows, the record store, and the bot layer.
//!
//! Persisted types implement [`collection::Document`] and are stored whole; the rest
//! describe invocations and outbound notifications. Nothing here touches Discord types,
//! conversion happens in `bot/`.

pub mod bonus;
pub mod candidate;
pub mod collection;
pub mod feedback;
pub mod incident;
pub mod invoker;
pub mod moderation;
pub mod no_show;
pub mod notification;
