//! No-show tracking: per-member absence counts with a one-time staff escalation.

use chrono::Utc;

use crate::{
    config::Config,
    error::workflow::WorkflowError,
    model::{
        invoker::Invoker,
        no_show::{NoShowData, NoShowEntry},
        notification::{color, Destination, Embed, Notification},
    },
    service::{auth::authorize, notify::Notifier, store::RecordStore},
};

/// A reported absence as submitted by staff.
#[derive(Debug, Clone)]
pub struct NoShowReport {
    pub member_id: u64,
    pub operation_name: Option<String>,
    /// Organizer of the operation (the Zeus).
    pub organizer: Option<String>,
}

/// What happened after a no-show was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoShowOutcome {
    /// Member's total after this report.
    pub count: u32,
    /// The member was told by direct message.
    pub member_notified: bool,
    /// This report reached the threshold and staff were escalated to.
    pub escalated: bool,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoShowStanding {
    pub member_id: u64,
    pub count: u32,
    pub records: Vec<NoShowEntry>,
}

pub struct NoShowService<'a> {
    config: &'a Config,
    store: &'a RecordStore,
    notifier: &'a dyn Notifier,
}

impl<'a> NoShowService<'a> {
    pub fn new(config: &'a Config, store: &'a RecordStore, notifier: &'a dyn Notifier) -> Self {
        Self {
            config,
            store,
            notifier,
        }
    }

    /// Records a no-show and notifies the member and staff.
    ///
    /// The record is persisted before any notification goes out. The member's DM and
    /// the staff alert are both best-effort; their failure is logged and does not undo
    /// the record. The escalation tagging the staff role fires only on the report that
    /// brings the count to the threshold, not on later ones.
    ///
    /// # Arguments
    /// - `reporter` - Staff, curator, or advisor filing the report
    /// - `report` - Absent member and operation details
    ///
    /// # Returns
    /// - `Ok(NoShowOutcome)` - New count and which notifications went out
    /// - `Err(WorkflowError::Unauthorized)` - Reporter lacks every permitted role
    /// - `Err(WorkflowError::StorageUnavailable)` - Record could not be stored
    pub async fn report_no_show(
        &self,
        reporter: &Invoker,
        report: NoShowReport,
    ) -> Result<NoShowOutcome, WorkflowError> {
        let roles = &self.config.roles;
        authorize(reporter, &[roles.unit_staff, roles.curator, roles.advisor])?;

        let operation_name = non_blank(report.operation_name);
        let organizer = non_blank(report.organizer);

        let mut data = self.store.lock::<NoShowData>().await?;
        let count = data.record_mut(report.member_id).push(NoShowEntry {
            operation_name: operation_name.clone(),
            date: Utc::now(),
            organizer: organizer.clone(),
            reporter_id: Some(reporter.user_id),
        });
        data.commit().await?;

        tracing::info!(
            "No-show recorded for {} by {} ({}), count now {}",
            report.member_id,
            reporter.display_name,
            reporter.user_id,
            count
        );

        let operation = operation_name.as_deref().unwrap_or("Unspecified operation");
        let organizer = organizer.as_deref().unwrap_or("Unknown");
        let member = format!("<@{}>", report.member_id);

        let dm = Embed::new("No-Show Report", color::RED)
            .description(format!(
                "You have been marked as a no-show for the operation **{}** organized by \
                 **{}**. Staff has been notified.",
                operation, organizer
            ))
            .footer("Please ensure you attend scheduled operations to avoid further actions.");
        let member_notified = match self
            .notifier
            .direct(report.member_id, Notification::embed(dm))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Could not DM no-show notice to {}: {}", report.member_id, e);
                false
            }
        };

        let summary = Embed::new("No-Show Report", color::ORANGE)
            .description(format!("{} has been reported as a no-show.", member))
            .field("Operation Name", operation)
            .field("Zeus", organizer)
            .field("Reported By", reporter.mention())
            .field("No-Show Count", count.to_string())
            .footer("Staff may take further action as necessary.");
        if let Err(e) = self
            .notifier
            .send(Destination::StaffAlert, Notification::embed(summary))
            .await
        {
            tracing::warn!("Failed to alert staff about no-show of {}: {}", report.member_id, e);
        }

        let escalated = count == self.config.thresholds.no_show;
        if escalated {
            let alert = Embed::new("Repeated No-Show Alert", color::RED)
                .description(format!(
                    "{} has missed **{} scheduled operations**. This requires immediate attention.",
                    member, count
                ))
                .footer("Please take the necessary actions to address this.");
            let notification =
                Notification::embed(alert).with_content(format!("<@&{}>", roles.unit_staff));

            if let Err(e) = self
                .notifier
                .send(Destination::StaffAlert, notification)
                .await
            {
                tracing::error!(
                    "Failed to escalate repeated no-shows of {}: {}",
                    report.member_id,
                    e
                );
            }
        }

        Ok(NoShowOutcome {
            count,
            member_notified,
            escalated,
        })
    }

    /// Members with the most no-shows, highest first.
    ///
    /// Ties are ordered by ascending member ID.
    ///
    /// # Arguments
    /// - `invoker` - Staff, curator, Zeus, or Zeus in Training
    /// - `limit` - Maximum number of rows
    ///
    /// # Returns
    /// - `Ok(Vec<NoShowStanding>)` - Rows, empty when nobody has a no-show
    /// - `Err(WorkflowError::Unauthorized)` - Invoker lacks every permitted role
    /// - `Err(WorkflowError::StorageUnavailable)` - Collection could not be read
    pub async fn leaderboard(
        &self,
        invoker: &Invoker,
        limit: usize,
    ) -> Result<Vec<NoShowStanding>, WorkflowError> {
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

        let data = self.store.load::<NoShowData>().await?;

        Ok(data
            .leaderboard()
            .into_iter()
            .take(limit)
            .map(|(member_id, record)| NoShowStanding {
                member_id,
                count: record.count(),
                records: record.records().to_vec(),
            })
            .collect())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
