use crate::{bot::Context, model::invoker::Invoker};

/// Builds the [`Invoker`] for the current interaction.
///
/// Roles are read from the member data Discord sends with every interaction, so a role
/// change takes effect on the very next command. Outside a guild the invoker has no roles
/// and every role-gated workflow refuses them.
pub async fn invoker(ctx: Context<'_>) -> Invoker {
    let author = ctx.author();
    let channel_id = ctx.channel_id().get();

    match ctx.author_member().await {
        Some(member) => Invoker {
            user_id: author.id.get(),
            display_name: member.display_name().to_string(),
            role_ids: member.roles.iter().map(|r| r.get()).collect(),
            channel_id,
        },
        None => Invoker {
            user_id: author.id.get(),
            display_name: author.name.clone(),
            role_ids: Vec::new(),
            channel_id,
        },
    }
}
