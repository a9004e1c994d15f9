//! Ready event handler.
//!
//! Fired once per gateway connection after the initial handshake.

use serenity::all::{ActivityData, Context, Ready};

/// Logs the connection and sets the bot's activity.
///
/// # Arguments
/// - `ctx` - Discord context for setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(ctx: &Context, ready: &Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("the unit")));
}
