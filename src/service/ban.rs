//! Bans with advance notice to the banned member and a report log entry.

use chrono::{DateTime, Utc};

use crate::{
    error::workflow::{InvalidInput, WorkflowError},
    model::{
        invoker::Invoker,
        moderation::BanRequest,
        notification::{color, Destination, Embed, Notification},
    },
    service::notify::{GuildModerator, Notifier},
    util::validate::require_filled,
};

pub struct BanService<'a> {
    notifier: &'a dyn Notifier,
    moderator: &'a dyn GuildModerator,
}

impl<'a> BanService<'a> {
    pub fn new(notifier: &'a dyn Notifier, moderator: &'a dyn GuildModerator) -> Self {
        Self {
            notifier,
            moderator,
        }
    }

    /// Bans a member after telling them why.
    ///
    /// The ban permission itself is enforced by Discord on the command. The member is
    /// sent the ban notice first; if that fails nothing else happens. The report log
    /// entry after the ban is best-effort.
    ///
    /// # Arguments
    /// - `moderator` - Member issuing the ban
    /// - `request` - Target, duration, appeal status, and reason
    ///
    /// # Returns
    /// - `Ok(DateTime<Utc>)` - When the ban lapses
    /// - `Err(WorkflowError::InvalidInput)` - Duration out of range or blank reason
    /// - `Err(WorkflowError::NotificationDeliveryFailed)` - Notice could not be delivered or the ban failed
    pub async fn ban_member(
        &self,
        moderator: &Invoker,
        request: BanRequest,
    ) -> Result<DateTime<Utc>, WorkflowError> {
        let Some(unban_date) = request.unban_date(Utc::now()) else {
            return Err(InvalidInput::BanDuration(request.duration_days).into());
        };
        require_filled("reason for the ban", &request.reason)?;

        let reason = request.reason.trim();
        let duration = format!("{} days", request.duration_days);

        let notice = Embed::new("You Have Been Banned from Sigma Security Group", color::RED)
            .field("Reason", reason)
            .field("Duration", duration.clone())
            .field("Appeal Status", request.appeal_status())
            .field(
                "How to Appeal",
                "If your ban is appealable, contact the Director or Deputy Director.",
            )
            .footer(format!("Your ban was made by {}", moderator.display_name));

        if let Err(e) = self
            .notifier
            .direct(request.member_id, Notification::embed(notice))
            .await
        {
            tracing::warn!(
                "Could not DM ban notice to {} ({}), ban aborted: {}",
                request.member_name,
                request.member_id,
                e
            );
            return Err(e.into());
        }

        self.moderator.ban(request.member_id, reason).await?;

        tracing::info!(
            "{} ({}) banned by {} ({}) for {}",
            request.member_name,
            request.member_id,
            moderator.display_name,
            moderator.user_id,
            duration
        );

        let log = Embed::new("Member Banned", color::ORANGE)
            .field(
                "Member",
                format!("{} ({})", request.member_name, request.member_id),
            )
            .field(
                "Moderator",
                format!("{} ({})", moderator.display_name, moderator.user_id),
            )
            .field("Reason", reason)
            .field("Duration", duration)
            .field("Appealable", request.appeal_status())
            .footer(format!(
                "Unban Date: {}",
                unban_date.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        if let Err(e) = self
            .notifier
            .send(Destination::ReportLog, Notification::embed(log))
            .await
        {
            tracing::warn!("Failed to log ban of {}: {}", request.member_id, e);
        }

        Ok(unban_date)
    }
}
