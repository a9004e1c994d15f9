//! Ports to the chat platform used by the workflows.
//!
//! The Discord implementation lives in `bot::notifier`; workflow tests use in-memory
//! fakes. Destinations are resolved to concrete channels by the implementation.

use serenity::async_trait;

use crate::{
    error::notification::NotificationError,
    model::{
        candidate::HistoryMessage,
        notification::{Destination, MessageRef, Notification},
    },
};

/// Outbound notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Posts to a configured destination and returns the posted message.
    async fn send(
        &self,
        destination: Destination,
        notification: Notification,
    ) -> Result<MessageRef, NotificationError>;

    /// Deletes a message previously posted to `destination`.
    ///
    /// Returns `NotificationError::NotFound` when the message no longer exists.
    async fn delete(&self, destination: Destination, message_id: u64)
        -> Result<(), NotificationError>;

    /// Sends a direct message to a member.
    ///
    /// Returns `NotificationError::Forbidden` when the member does not accept DMs.
    async fn direct(
        &self,
        user_id: u64,
        notification: Notification,
    ) -> Result<(), NotificationError>;
}

/// Read access to a destination's recent messages.
#[async_trait]
pub trait MessageHistory: Send + Sync {
    /// Up to `limit` most recent messages, newest first.
    async fn recent(
        &self,
        destination: Destination,
        limit: usize,
    ) -> Result<Vec<HistoryMessage>, NotificationError>;
}

/// Guild moderation actions.
#[async_trait]
pub trait GuildModerator: Send + Sync {
    async fn ban(&self, user_id: u64, reason: &str) -> Result<(), NotificationError>;
}
