use std::sync::Arc;

use poise::{CreateReply, FrameworkError};
use serenity::all::{ClientBuilder, GatewayIntents, GuildId};

use crate::{
    bot::{commands, handler},
    config::Config,
    error::AppError,
    service::{draft::DraftStore, store::RecordStore},
    state::AppState,
};

/// Shown when a command fails in a way the workflow did not anticipate.
const GENERIC_FAILURE: &str = "Something went wrong while running this command. Please try again later.";

/// Starts the Discord bot and runs it until the gateway connection closes.
///
/// Commands are registered in the configured guild on startup, so changes to command
/// definitions show up immediately rather than after Discord's global propagation delay.
///
/// # Arguments
/// - `config` - Application configuration
/// - `store` - Record store over the connected database
/// - `drafts` - Incident report drafts, shared with the sweep job
///
/// # Returns
/// - `Ok(())` - Bot shut down cleanly
/// - `Err(AppError::DiscordErr)` - Client construction or the gateway connection failed
pub async fn start_bot(
    config: Arc<Config>,
    store: RecordStore,
    drafts: DraftStore,
) -> Result<(), AppError> {
    let intents = GatewayIntents::GUILDS;
    let token = config.discord_bot_token.clone();
    let guild_id = GuildId::new(config.guild_id);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handler::handle_event(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id)
                    .await?;

                tracing::info!(
                    "Registered {} commands in guild {}",
                    framework.options().commands.len(),
                    guild_id
                );

                Ok(AppState::new(config, store, drafts, ctx.http.clone()))
            })
        })
        .build();

    let mut client = ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}

/// Logs framework errors and gives the invoker a generic reply.
///
/// Workflow errors are answered inside the commands; anything reaching this hook is
/// unexpected, so the user only learns that something failed.
async fn on_error(error: FrameworkError<'_, AppState, AppError>) {
    match error {
        FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to set up the bot: {}", error);
        }
        FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Command '{}' failed: {}", ctx.command().name, error);

            let reply = CreateReply::default()
                .content(GENERIC_FAILURE)
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                tracing::error!("Failed to report command failure: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}
