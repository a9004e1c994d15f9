use crate::{
    bot::{
        invoker::invoker,
        reply::{self, truncate, MAX_DESCRIPTION},
        ApplicationContext, Context,
    },
    error::{workflow::WorkflowError, AppError},
    model::{
        incident::IncidentReportFields,
        notification::{color, Embed, MessageRef},
    },
    service::incident::IncidentReportService,
};

#[derive(Debug, Default, poise::Modal)]
#[name = "Incident Report"]
struct IncidentReportModal {
    #[name = "Incident Subject"]
    #[placeholder = "Name and Discord ID of the person involved"]
    #[max_length = 256]
    subject: String,
    #[name = "Incident Date"]
    #[placeholder = "YYYY-MM-DD"]
    #[max_length = 64]
    date: String,
    #[name = "Incident Details"]
    #[placeholder = "What happened?"]
    #[paragraph]
    #[max_length = 1024]
    details: String,
    #[name = "Incident Evidence"]
    #[placeholder = "Links to screenshots or clips (optional)"]
    #[paragraph]
    #[max_length = 1024]
    evidence: Option<String>,
    #[name = "Incident Outcome"]
    #[placeholder = "e.g. Verbal Warning, Written Warning, Kick"]
    #[max_length = 1024]
    outcome: String,
}

impl From<IncidentReportFields> for IncidentReportModal {
    fn from(fields: IncidentReportFields) -> Self {
        Self {
            subject: fields.subject,
            date: fields.date_text,
            details: fields.details,
            evidence: fields.evidence,
            outcome: fields.outcome,
        }
    }
}

impl From<IncidentReportModal> for IncidentReportFields {
    fn from(modal: IncidentReportModal) -> Self {
        Self {
            subject: modal.subject,
            date_text: modal.date,
            details: modal.details,
            evidence: modal.evidence,
            outcome: modal.outcome,
        }
    }
}

/// File an incident report
#[poise::command(slash_command, guild_only, rename = "incident-report")]
pub async fn incident_report(ctx: ApplicationContext<'_>) -> Result<(), AppError> {
    let reply_ctx = Context::Application(ctx);
    let handler = invoker(reply_ctx).await;
    let data = reply_ctx.data();
    let service = IncidentReportService::new(
        &data.config,
        &data.store,
        &data.drafts,
        data.discord.as_ref(),
    );

    if let Err(e) = service.check_access(&handler) {
        return reply::failure(reply_ctx, &e).await;
    }

    let defaults = service
        .draft_for(&handler)
        .await
        .map(IncidentReportModal::from);
    let Some(submitted) =
        poise::execute_modal(ctx, defaults, Some(data.config.form_timeout)).await?
    else {
        return reply::failure(reply_ctx, &WorkflowError::Timeout).await;
    };

    match service.file_report(&handler, submitted.into()).await {
        Ok(report_id) => {
            reply::ephemeral(
                reply_ctx,
                format!("{} has been filed and logged.", report_id.title()),
            )
            .await
        }
        Err(e) => reply::failure(reply_ctx, &e).await,
    }
}

/// Look up incident reports filed about a member
#[poise::command(slash_command, guild_only, rename = "user-report-file")]
pub async fn user_report_file(
    ctx: Context<'_>,
    #[description = "Discord ID or name to search for"] user: String,
) -> Result<(), AppError> {
    let caller = invoker(ctx).await;
    let data = ctx.data();
    let service = IncidentReportService::new(
        &data.config,
        &data.store,
        &data.drafts,
        data.discord.as_ref(),
    );

    let reports = match service.lookup_reports(&caller, &user).await {
        Ok(reports) => reports,
        Err(e) => return reply::failure(ctx, &e).await,
    };

    if reports.is_empty() {
        return reply::ephemeral(ctx, format!("No reports found for '{}'.", user.trim())).await;
    }

    let listing = reports
        .iter()
        .map(|r| {
            let link = MessageRef {
                channel_id: data.config.destinations.report_log,
                message_id: r.message_id,
            }
            .jump_url(data.config.guild_id);
            format!(
                "**{}** ({})\nSubject: {}\nOutcome: {}\n[View Report]({})",
                r.report_id.title(),
                r.date.format("%Y-%m-%d"),
                r.subject,
                r.outcome,
                link
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let embed = Embed::new(format!("Reports for {}", user.trim()), color::BLUE)
        .description(truncate(&listing, MAX_DESCRIPTION))
        .footer(format!("{} report(s) found", reports.len()));

    reply::ephemeral_embed(ctx, embed).await
}

/// Delete an incident report and its log entry
#[poise::command(slash_command, guild_only, rename = "delete-report")]
pub async fn delete_report(
    ctx: Context<'_>,
    #[description = "Report ID, e.g. Incident Report 0004"]
    #[rename = "report-id"]
    report_id: String,
) -> Result<(), AppError> {
    let caller = invoker(ctx).await;
    let data = ctx.data();
    let service = IncidentReportService::new(
        &data.config,
        &data.store,
        &data.drafts,
        data.discord.as_ref(),
    );

    match service.delete_report(&caller, &report_id).await {
        Ok(deleted) => {
            reply::ephemeral(ctx, format!("{} has been deleted.", deleted.title())).await
        }
        Err(e) => reply::failure(ctx, &e).await,
    }
}
