//! Discord integration: the poise framework, slash commands, and the serenity adapters
//! behind the workflow ports.
//!
//! Commands translate interaction input into workflow calls and render the outcome.
//! All moderation rules live in [`crate::service`]; nothing here decides who may do
//! what beyond what Discord itself enforces (such as the ban permission).
//!
//! # Gateway Intents
//!
//! Only `GUILDS` is required. Slash commands arrive as interactions, and the invoking
//! member's roles come with each interaction, so no privileged intent is needed.

pub mod commands;
pub mod handler;
pub mod invoker;
pub mod notifier;
pub mod reply;
pub mod start;

use crate::{error::AppError, state::AppState};

pub type Context<'a> = poise::Context<'a, AppState, AppError>;
pub type ApplicationContext<'a> = poise::ApplicationContext<'a, AppState, AppError>;
pub type Command = poise::Command<AppState, AppError>;
