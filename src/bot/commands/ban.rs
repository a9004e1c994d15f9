use serenity::all::User;

use crate::{
    bot::{invoker::invoker, reply, Context},
    error::AppError,
    model::moderation::BanRequest,
    service::ban::BanService,
};

/// Ban a member after sending them the reason
#[poise::command(
    slash_command,
    guild_only,
    default_member_permissions = "BAN_MEMBERS",
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "Member to ban"] member: User,
    #[description = "Ban length in days"]
    #[min = 1]
    #[max = 36500]
    duration: i64,
    #[description = "Whether the ban can be appealed"] appealable: bool,
    #[description = "Reason for the ban"] reason: String,
) -> Result<(), AppError> {
    let moderator = invoker(ctx).await;
    let discord = ctx.data().discord.as_ref();
    let service = BanService::new(discord, discord);

    let request = BanRequest {
        member_id: member.id.get(),
        member_name: member.name.clone(),
        duration_days: duration,
        appealable,
        reason,
    };

    match service.ban_member(&moderator, request).await {
        Ok(unban_date) => {
            reply::ephemeral(
                ctx,
                format!(
                    "{} has been banned until {}.",
                    member.name,
                    unban_date.format("%Y-%m-%d %H:%M UTC")
                ),
            )
            .await
        }
        Err(e) => reply::failure(ctx, &e).await,
    }
}
