//! Candidate progress tracking.
//!
//! Progress is never stored. Each request recounts the attendance announcements in
//! the commendations channel, then posts a new announcement. The de-duplication
//! window is the only guard against announcing the same operation twice.

use chrono::Utc;

use crate::{
    config::Config,
    error::workflow::WorkflowError,
    model::{
        candidate::{OperationTally, ProgressReport},
        invoker::Invoker,
        notification::{color, Destination, Embed, Notification},
    },
    service::{
        auth::authorize,
        notify::{MessageHistory, Notifier},
    },
};

pub struct CandidateService<'a> {
    config: &'a Config,
    history: &'a dyn MessageHistory,
    notifier: &'a dyn Notifier,
}

impl<'a> CandidateService<'a> {
    pub fn new(
        config: &'a Config,
        history: &'a dyn MessageHistory,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            config,
            history,
            notifier,
        }
    }

    /// Counts a candidate's attended operations and announces their progress.
    ///
    /// Scans the most recent commendations messages for ones that contain the
    /// attendance keyword and mention the candidate. If the newest match is inside the
    /// de-duplication window the request is rejected. Otherwise a promotion message
    /// tagging staff is posted once the count reaches the configured total, and a
    /// progress update otherwise.
    ///
    /// # Arguments
    /// - `invoker` - Staff, curator, Zeus, or Zeus in Training
    /// - `candidate_id` - Member being tracked
    ///
    /// # Returns
    /// - `Ok(ProgressReport)` - Count and whether the candidate was promoted
    /// - `Err(WorkflowError::Unauthorized)` - Invoker lacks every permitted role
    /// - `Err(WorkflowError::AlreadyTracked)` - Candidate was announced within the window
    /// - `Err(WorkflowError::NotificationDeliveryFailed)` - History read or announcement failed
    pub async fn track_candidate(
        &self,
        invoker: &Invoker,
        candidate_id: u64,
    ) -> Result<ProgressReport, WorkflowError> {
        let roles = &self.config.roles;
        authorize(
            invoker,
            &[
                roles.unit_staff,
                roles.curator,
                roles.zeus,
                roles.zeus_in_training,
            ],
        )?;

        let settings = &self.config.candidate;
        let history = self
            .history
            .recent(Destination::Commendations, settings.history_limit)
            .await?;
        let tally = OperationTally::from_history(&history, candidate_id, &settings.keyword);

        if let Some(most_recent) = tally.most_recent {
            if Utc::now() - most_recent < settings.dedup_window {
                tracing::debug!(
                    "Skip tracking {}: last announcement at {} is inside the window",
                    candidate_id,
                    most_recent
                );
                return Err(WorkflowError::AlreadyTracked);
            }
        }

        let total = self.config.thresholds.total_operations;
        let report = ProgressReport {
            member_id: candidate_id,
            count: tally.count,
            total,
            promoted: tally.count >= total,
        };

        self.notifier
            .send(
                Destination::Commendations,
                announcement(&report, &settings.keyword, roles.unit_staff),
            )
            .await?;

        tracing::info!(
            "Tracked candidate {} for {} ({}): {}/{}{}",
            candidate_id,
            invoker.display_name,
            invoker.user_id,
            report.count,
            report.total,
            if report.promoted { ", promoted" } else { "" }
        );

        Ok(report)
    }
}

/// Progress updates repeat the attendance keyword so they count toward the next tally.
///
/// The attendance being announced is not part of `report.count`; the text says so.
fn announcement(report: &ProgressReport, keyword: &str, staff_role: u64) -> Notification {
    let member = format!("<@{}>", report.member_id);

    if report.promoted {
        let embed = Embed::new("Candidate Progress Update", color::GREEN)
            .field("Candidate", member.clone())
            .field(
                "Progress",
                format!("{}/{} operations completed.", report.count, report.total),
            )
            .field("Status", "**Promoted to Sigma Associate**")
            .footer("Congratulations on your outstanding achievement!");

        Notification::embed(embed).with_content(format!(
            "{member}, after demonstrating valor, resilience, and unwavering dedication across \
             {count} successful deployments, you've proven yourself an asset to this unit.\n\n\
             Welcome to Sigma. Your journey has just begun.\n\n\
             {member}, it is now time for your assessment with <@&{staff_role}>.",
            member = member,
            count = report.count,
            staff_role = staff_role
        ))
    } else {
        let remaining = report.remaining();
        let embed = Embed::new("Candidate Progress Update", color::BLUE)
            .field("Candidate", member.clone())
            .field(
                "Progress",
                format!(
                    "{}/{} operations counted before this one.",
                    report.count, report.total
                ),
            )
            .field("Remaining Operations", format!("{} left.", remaining))
            .footer("Keep up the great work!");

        Notification::embed(embed).with_content(format!(
            "{} {}, which counts toward their next progress update. \
             They have {} operation(s) left before becoming a Sigma Associate.",
            member, keyword, remaining
        ))
    }
}
