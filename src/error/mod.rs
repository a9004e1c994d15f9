//! Error types for the bot.
//!
//! `AppError` covers startup and infrastructure failures. Command handling uses
//! [`workflow::WorkflowError`], which wraps the storage and notification errors and
//! knows how to phrase itself for the invoking user.

pub mod config;
pub mod notification;
pub mod storage;
pub mod workflow;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level application error type.
///
/// Aggregates failures that can stop the process during startup or while running
/// background services.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Logging subscriber could not be installed.
    #[error("Failed to initialise logging: {0}")]
    LoggingErr(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
