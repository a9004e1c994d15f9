//! Outbound notifications, described independently of Discord's builders.

use chrono::{DateTime, Utc};

use crate::util::text::truncate;

/// Discord's limits on embed field names and values, in characters.
pub const MAX_FIELD_NAME: usize = 256;
pub const MAX_FIELD_VALUE: usize = 1024;

/// Embed colors, matching Discord's palette.
pub mod color {
    pub const RED: u32 = 0xe74c3c;
    pub const ORANGE: u32 = 0xe67e22;
    pub const GREEN: u32 = 0x2ecc71;
    pub const BLUE: u32 = 0x3498db;
    pub const PURPLE: u32 = 0x9b59b6;
}

/// Configured endpoints a workflow can post to.
///
/// Mapped to concrete channel IDs by the notifier implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    ReportLog,
    StaffAlert,
    Commendations,
    ZeusFeedback,
}

/// Posted message reference, returned by a successful send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub channel_id: u64,
    pub message_id: u64,
}

impl MessageRef {
    /// Link that opens the message in the Discord client.
    pub fn jump_url(&self, guild_id: u64) -> String {
        format!(
            "https://discord.com/channels/{}/{}/{}",
            guild_id, self.channel_id, self.message_id
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Embed {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            color,
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a full-width field, cutting the name and value to Discord's limits.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name: String = name.into();
        let value: String = value.into();
        self.fields.push(EmbedField {
            name: truncate(&name, MAX_FIELD_NAME),
            value: truncate(&value, MAX_FIELD_VALUE),
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }

    /// Value of the first field called `name`.
    #[cfg(test)]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Text content and/or an embed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notification {
    pub content: Option<String>,
    pub embed: Option<Embed>,
}

impl Notification {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embed: None,
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embed: Some(embed),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}
