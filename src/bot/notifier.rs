//! Discord implementation of the notification, history, and moderation ports.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serenity::{
    all::{
        ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage, GuildId, Message, MessageId,
        MessagePagination, Timestamp, UserId,
    },
    async_trait,
    http::Http,
};

use crate::{
    config::{Config, Destinations},
    error::notification::NotificationError,
    model::{
        candidate::HistoryMessage,
        notification::{Destination, Embed, MessageRef, Notification},
    },
    service::notify::{GuildModerator, MessageHistory, Notifier},
};

/// Discord caps a single history request at 100 messages.
const HISTORY_PAGE_SIZE: u8 = 100;

/// Discord caps audit log reasons at 512 characters.
const MAX_AUDIT_REASON: usize = 512;

pub struct DiscordNotifier {
    http: Arc<Http>,
    guild_id: GuildId,
    destinations: Destinations,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>, config: &Config) -> Self {
        Self {
            http,
            guild_id: GuildId::new(config.guild_id),
            destinations: config.destinations.clone(),
        }
    }

    fn channel(&self, destination: Destination) -> ChannelId {
        let id = match destination {
            Destination::ReportLog => self.destinations.report_log,
            Destination::StaffAlert => self.destinations.staff_alert,
            Destination::Commendations => self.destinations.commendations,
            Destination::ZeusFeedback => self.destinations.zeus_feedback,
        };

        ChannelId::new(id)
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(
        &self,
        destination: Destination,
        notification: Notification,
    ) -> Result<MessageRef, NotificationError> {
        let channel_id = self.channel(destination);
        let message = channel_id
            .send_message(&self.http, build_message(notification))
            .await?;

        Ok(MessageRef {
            channel_id: message.channel_id.get(),
            message_id: message.id.get(),
        })
    }

    async fn delete(
        &self,
        destination: Destination,
        message_id: u64,
    ) -> Result<(), NotificationError> {
        self.http
            .delete_message(self.channel(destination), MessageId::new(message_id), None)
            .await?;

        Ok(())
    }

    async fn direct(
        &self,
        user_id: u64,
        notification: Notification,
    ) -> Result<(), NotificationError> {
        let channel = UserId::new(user_id).create_dm_channel(&self.http).await?;
        channel
            .send_message(&self.http, build_message(notification))
            .await?;

        Ok(())
    }
}

#[async_trait]
impl MessageHistory for DiscordNotifier {
    /// Pages backwards through the channel, newest first, until `limit` messages are read
    /// or the channel is exhausted.
    async fn recent(
        &self,
        destination: Destination,
        limit: usize,
    ) -> Result<Vec<HistoryMessage>, NotificationError> {
        let channel_id = self.channel(destination);
        let mut history = Vec::with_capacity(limit);
        let mut before: Option<MessageId> = None;

        while history.len() < limit {
            let page_size = (limit - history.len()).min(HISTORY_PAGE_SIZE as usize) as u8;
            let page = self
                .http
                .get_messages(
                    channel_id,
                    before.map(MessagePagination::Before),
                    Some(page_size),
                )
                .await?;

            let Some(oldest) = page.last() else {
                break;
            };
            before = Some(oldest.id);
            let exhausted = page.len() < page_size as usize;

            history.extend(page.iter().map(history_message));

            if exhausted {
                break;
            }
        }

        Ok(history)
    }
}

#[async_trait]
impl GuildModerator for DiscordNotifier {
    async fn ban(&self, user_id: u64, reason: &str) -> Result<(), NotificationError> {
        let reason: String = reason.chars().take(MAX_AUDIT_REASON).collect();

        self.http
            .ban_user(self.guild_id, UserId::new(user_id), 0, Some(&reason))
            .await?;

        Ok(())
    }
}

fn history_message(message: &Message) -> HistoryMessage {
    HistoryMessage {
        id: message.id.get(),
        content: message.content.clone(),
        mention_ids: message.mentions.iter().map(|u| u.id.get()).collect(),
        created_at: DateTime::from_timestamp(message.timestamp.unix_timestamp(), 0)
            .unwrap_or_else(Utc::now),
    }
}

/// Converts a notification into a Discord message payload.
pub fn build_message(notification: Notification) -> CreateMessage {
    let mut message = CreateMessage::new();

    if let Some(content) = notification.content {
        message = message.content(content);
    }
    if let Some(embed) = notification.embed {
        message = message.embed(build_embed(embed));
    }

    message
}

/// Converts an embed into its Discord form. Fields are never inline.
pub fn build_embed(embed: Embed) -> CreateEmbed {
    let mut built = CreateEmbed::new().title(embed.title).color(embed.color);

    if let Some(description) = embed.description {
        built = built.description(description);
    }
    for field in embed.fields {
        built = built.field(field.name, field.value, false);
    }
    if let Some(footer) = embed.footer {
        built = built.footer(CreateEmbedFooter::new(footer));
    }
    if let Some(at) = embed.timestamp {
        match Timestamp::from_unix_timestamp(at.timestamp()) {
            Ok(timestamp) => built = built.timestamp(timestamp),
            Err(e) => tracing::warn!("Dropping embed timestamp {}: {}", at, e),
        }
    }

    built
}
