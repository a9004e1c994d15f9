use serenity::all::User;

use crate::{
    bot::{invoker::invoker, reply, ApplicationContext, Context},
    error::{workflow::WorkflowError, AppError},
    model::feedback::ZitFeedback,
    service::feedback::FeedbackService,
};

#[derive(Debug, Default, poise::Modal)]
#[name = "Zeus in Training Feedback"]
struct ZitFeedbackModal {
    #[name = "Operation Name & Date"]
    #[placeholder = "Operation Anvil, 2024-03-01"]
    #[max_length = 256]
    operation: String,
    #[name = "Operation Details"]
    #[paragraph]
    #[max_length = 1024]
    details: String,
    #[name = "Things Done Well"]
    #[paragraph]
    #[max_length = 1024]
    done_well: String,
    #[name = "Points for Improvement"]
    #[paragraph]
    #[max_length = 1024]
    improvements: String,
}

/// Submit feedback on a Zeus in Training
#[poise::command(slash_command, guild_only, rename = "zit-feedback")]
pub async fn zit_feedback(
    ctx: ApplicationContext<'_>,
    #[description = "Zeus in Training the feedback is about"] member: User,
    #[description = "Do you recommend them for full Zeus tags?"] recommend: bool,
) -> Result<(), AppError> {
    let reply_ctx = Context::Application(ctx);
    let caller = invoker(reply_ctx).await;
    let data = reply_ctx.data();
    let service = FeedbackService::new(&data.config, data.discord.as_ref());

    if let Err(e) = service.check_access(&caller) {
        return reply::failure(reply_ctx, &e).await;
    }

    let Some(form) =
        poise::execute_modal::<_, _, ZitFeedbackModal>(ctx, None, Some(data.config.form_timeout))
            .await?
    else {
        return reply::failure(reply_ctx, &WorkflowError::Timeout).await;
    };

    let feedback = ZitFeedback {
        subject_id: member.id.get(),
        operation: form.operation,
        details: form.details,
        done_well: form.done_well,
        improvements: form.improvements,
        recommend,
    };

    match service.submit_zit_feedback(&caller, feedback).await {
        Ok(_) => reply::ephemeral(reply_ctx, "Your feedback has been submitted for review.").await,
        Err(e) => reply::failure(reply_ctx, &e).await,
    }
}
