use serenity::all::{Context, FullEvent};

use crate::{error::AppError, state::AppState};

pub mod ready;

/// Dispatches gateway events the bot cares about.
///
/// Commands are routed by poise itself; this only sees the remaining events.
pub async fn handle_event(
    ctx: &Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, AppState, AppError>,
    _data: &AppState,
) -> Result<(), AppError> {
    if let FullEvent::Ready { data_about_bot } = event {
        ready::handle_ready(ctx, data_about_bot).await;
    }

    Ok(())
}
