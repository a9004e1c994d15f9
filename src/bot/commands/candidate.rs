use serenity::all::User;

use crate::{
    bot::{invoker::invoker, reply, Context},
    error::AppError,
    service::candidate::CandidateService,
};

/// Count a candidate's operations and announce their progress
#[poise::command(slash_command, guild_only, rename = "track-a-candidate")]
pub async fn track_a_candidate(
    ctx: Context<'_>,
    #[description = "Candidate to track"] member: User,
) -> Result<(), AppError> {
    let caller = invoker(ctx).await;
    let data = ctx.data();
    let discord = data.discord.as_ref();
    let service = CandidateService::new(&data.config, discord, discord);

    match service.track_candidate(&caller, member.id.get()).await {
        Ok(report) if report.promoted => {
            reply::ephemeral(
                ctx,
                format!(
                    "<@{}> has completed {}/{} operations and has been announced for promotion.",
                    member.id, report.count, report.total
                ),
            )
            .await
        }
        Ok(report) => {
            reply::ephemeral(
                ctx,
                format!(
                    "<@{}> has completed {}/{} operations.",
                    member.id, report.count, report.total
                ),
            )
            .await
        }
        Err(e) => reply::failure(ctx, &e).await,
    }
}
