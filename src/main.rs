mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use crate::{
    config::Config,
    error::AppError,
    scheduler::draft_sweep,
    service::{draft::DraftStore, store::RecordStore},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_logging()?;

    let config = Arc::new(Config::from_env()?);

    let db = startup::connect_to_database(&config).await?;
    let store = RecordStore::new(db);
    let drafts = DraftStore::new(config.draft_retention);

    let _scheduler = draft_sweep::start_scheduler(drafts.clone()).await?;

    tracing::info!("Starting staffdesk");

    if let Err(e) = bot::start::start_bot(config, store, drafts).await {
        tracing::error!("Discord bot error: {}", e);
        return Err(e);
    }

    Ok(())
}
