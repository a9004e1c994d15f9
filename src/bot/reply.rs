//! Reply helpers shared by the commands.

use poise::CreateReply;

use crate::{
    bot::{notifier::build_embed, Context},
    error::{workflow::WorkflowError, AppError},
    model::notification::Embed,
};

pub use crate::util::text::truncate;

/// Discord's limit on an embed description.
pub const MAX_DESCRIPTION: usize = 4096;

/// Replies with text only the invoker can see.
pub async fn ephemeral(ctx: Context<'_>, content: impl Into<String>) -> Result<(), AppError> {
    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}

/// Replies with an embed only the invoker can see.
pub async fn ephemeral_embed(ctx: Context<'_>, embed: Embed) -> Result<(), AppError> {
    ctx.send(
        CreateReply::default()
            .embed(build_embed(embed))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Tells the invoker why their command failed.
///
/// Internal detail of storage and delivery failures is logged by
/// [`WorkflowError::user_message`] and never shown.
pub async fn failure(ctx: Context<'_>, error: &WorkflowError) -> Result<(), AppError> {
    tracing::debug!("Command '{}' rejected: {}", ctx.command().name, error);

    ephemeral(ctx, error.user_message()).await
}
