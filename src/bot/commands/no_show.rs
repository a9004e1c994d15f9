use serenity::all::User;

use crate::{
    bot::{
        invoker::invoker,
        reply::{self, truncate, MAX_DESCRIPTION},
        Context,
    },
    error::AppError,
    model::notification::{color, Embed},
    service::no_show::{NoShowReport, NoShowService, NoShowStanding},
};

const LEADERBOARD_SIZE: usize = 10;

/// Report a member who missed an operation
#[poise::command(slash_command, guild_only, rename = "no-show-report")]
pub async fn no_show_report(
    ctx: Context<'_>,
    #[description = "Member who did not show up"] member: User,
    #[description = "Name of the missed operation"]
    #[rename = "operation-name"]
    operation_name: Option<String>,
    #[description = "Zeus who organized the operation"] zeus: Option<String>,
) -> Result<(), AppError> {
    let reporter = invoker(ctx).await;
    let data = ctx.data();
    let service = NoShowService::new(&data.config, &data.store, data.discord.as_ref());

    let report = NoShowReport {
        member_id: member.id.get(),
        operation_name,
        organizer: zeus,
    };

    match service.report_no_show(&reporter, report).await {
        Ok(outcome) => {
            let mut text = format!(
                "No-show recorded for <@{}>. They now have {} no-show(s).",
                member.id, outcome.count
            );
            if !outcome.member_notified {
                text.push_str(" They could not be notified by direct message.");
            }
            if outcome.escalated {
                text.push_str(" Staff have been alerted.");
            }
            reply::ephemeral(ctx, text).await
        }
        Err(e) => reply::failure(ctx, &e).await,
    }
}

/// Show the members with the most no-shows
#[poise::command(slash_command, guild_only, rename = "no-show-stats")]
pub async fn no_show_stats(ctx: Context<'_>) -> Result<(), AppError> {
    let caller = invoker(ctx).await;
    let data = ctx.data();
    let service = NoShowService::new(&data.config, &data.store, data.discord.as_ref());

    let standings = match service.leaderboard(&caller, LEADERBOARD_SIZE).await {
        Ok(standings) => standings,
        Err(e) => return reply::failure(ctx, &e).await,
    };

    if standings.is_empty() {
        return reply::ephemeral(ctx, "No no-shows have been recorded.").await;
    }

    let listing = standings
        .iter()
        .enumerate()
        .map(|(rank, standing)| render_standing(rank + 1, standing))
        .collect::<Vec<_>>()
        .join("\n\n");

    let embed = Embed::new("No-Show Leaderboard", color::ORANGE)
        .description(truncate(&listing, MAX_DESCRIPTION))
        .footer(format!("Top {} members by no-shows", standings.len()));

    reply::ephemeral_embed(ctx, embed).await
}

fn render_standing(rank: usize, standing: &NoShowStanding) -> String {
    let mut text = format!(
        "**{}.** <@{}> with {} no-show(s)",
        rank, standing.member_id, standing.count
    );

    for entry in &standing.records {
        text.push_str(&format!(
            "\n- {} on {}",
            entry.operation_name.as_deref().unwrap_or("Unspecified operation"),
            entry.date.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    text
}
