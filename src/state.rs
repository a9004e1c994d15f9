//! State shared by every command invocation.
//!
//! Built once in the framework setup hook, after the gateway connection exists, and
//! handed to poise as the framework's user data. Every field is cheap to clone.

use std::sync::Arc;

use serenity::http::Http;

use crate::{
    bot::notifier::DiscordNotifier,
    config::Config,
    service::{draft::DraftStore, store::RecordStore},
};

pub struct AppState {
    /// Channel, role, and threshold settings.
    pub config: Arc<Config>,

    /// Persisted collections (incident reports, no-shows, bonus ledgers).
    pub store: RecordStore,

    /// Incident report drafts kept after a rejected submission.
    ///
    /// Shared with the sweep job, which purges expired entries.
    pub drafts: DraftStore,

    /// Discord adapter implementing the notification, history, and moderation ports.
    pub discord: Arc<DiscordNotifier>,
}

impl AppState {
    /// Creates the application state.
    ///
    /// # Arguments
    /// - `config` - Loaded configuration
    /// - `store` - Record store over the connected database
    /// - `drafts` - Draft store, also held by the sweep job
    /// - `http` - Discord HTTP client of the running gateway client
    pub fn new(
        config: Arc<Config>,
        store: RecordStore,
        drafts: DraftStore,
        http: Arc<Http>,
    ) -> Self {
        let discord = Arc::new(DiscordNotifier::new(http, &config));

        Self {
            config,
            store,
            drafts,
            discord,
        }
    }
}
