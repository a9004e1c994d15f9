use serenity::all::User;

use crate::{
    bot::{invoker::invoker, reply, Context},
    error::AppError,
    model::notification::{color, Embed},
    service::{
        bonus::BonusService,
        commendation::{Commendation, CommendationService},
    },
};

const LEADERBOARD_SIZE: usize = 10;

/// Commend a member for their performance
#[poise::command(slash_command, guild_only)]
pub async fn commend(
    ctx: Context<'_>,
    #[description = "Member to commend"] person: User,
    #[description = "Role they played in the operation"] role: String,
    #[description = "Why they deserve it"] reason: String,
) -> Result<(), AppError> {
    let caller = invoker(ctx).await;
    let data = ctx.data();
    let service = CommendationService::new(&data.config, &data.store, data.discord.as_ref());

    let commendation = Commendation {
        person_id: person.id.get(),
        role,
        reason,
    };

    match service.commend(&caller, commendation).await {
        Ok(_) => {
            reply::ephemeral(ctx, format!("Your commendation for <@{}> has been posted.", person.id))
                .await
        }
        Err(e) => reply::failure(ctx, &e).await,
    }
}

/// Show your total performance bonus
#[poise::command(slash_command, guild_only, rename = "performance-bonus")]
pub async fn performance_bonus(ctx: Context<'_>) -> Result<(), AppError> {
    let data = ctx.data();
    let service = BonusService::new(&data.config, &data.store);

    match service.total_for(ctx.author().id.get()).await {
        Ok(total) => {
            reply::ephemeral(ctx, format!("Your total Performance Bonus is {}.", total)).await
        }
        Err(e) => reply::failure(ctx, &e).await,
    }
}

/// Show the members with the highest performance bonus
#[poise::command(slash_command, guild_only, rename = "bonus-leaderboard")]
pub async fn bonus_leaderboard(ctx: Context<'_>) -> Result<(), AppError> {
    let data = ctx.data();
    let service = BonusService::new(&data.config, &data.store);

    let rows = match service.leaderboard(LEADERBOARD_SIZE).await {
        Ok(rows) => rows,
        Err(e) => return reply::failure(ctx, &e).await,
    };

    if rows.is_empty() {
        return reply::ephemeral(ctx, "No Performance Bonuses have been wired yet.").await;
    }

    let listing = rows
        .iter()
        .enumerate()
        .map(|(i, (member_id, total))| format!("**{}.** <@{}>: {}", i + 1, member_id, total))
        .collect::<Vec<_>>()
        .join("\n");

    let embed = Embed::new("Performance Bonus Leaderboard", color::GREEN).description(listing);

    reply::ephemeral_embed(ctx, embed).await
}
