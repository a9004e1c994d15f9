//! Incident report workflow: filing, lookup by subject, and deletion.
//!
//! Filing posts the report to the report log and stores the posted message ID with
//! the record, both under the collection lock, so a report never exists without its
//! log message (or the other way round) from the caller's point of view.

use chrono::Utc;

use crate::{
    config::Config,
    error::{notification::NotificationError, workflow::WorkflowError},
    model::{
        incident::{IncidentReport, IncidentReportFields, IncidentReports, ReportId, ReportSummary},
        invoker::Invoker,
        notification::{color, Destination, Embed, Notification},
    },
    service::{
        auth::{authorize, require_channel},
        draft::DraftStore,
        notify::Notifier,
        store::RecordStore,
    },
    util::{date::parse_date, validate::require_filled},
};

/// Service orchestrating the incident report lifecycle.
pub struct IncidentReportService<'a> {
    config: &'a Config,
    store: &'a RecordStore,
    drafts: &'a DraftStore,
    notifier: &'a dyn Notifier,
}

impl<'a> IncidentReportService<'a> {
    /// Creates a new IncidentReportService instance.
    ///
    /// # Arguments
    /// - `config` - Destinations and role IDs
    /// - `store` - Record store holding the report collection
    /// - `drafts` - Per-user drafts of rejected submissions
    /// - `notifier` - Outbound notification port
    ///
    /// # Returns
    /// - `IncidentReportService` - New service instance
    pub fn new(
        config: &'a Config,
        store: &'a RecordStore,
        drafts: &'a DraftStore,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            config,
            store,
            drafts,
            notifier,
        }
    }

    /// Checks that `invoker` may file or delete reports from where they are.
    ///
    /// Commands call this before opening the report form so a member without access
    /// is turned away before typing anything.
    pub fn check_access(&self, invoker: &Invoker) -> Result<(), WorkflowError> {
        authorize(invoker, &[self.config.roles.unit_staff])?;
        require_channel(invoker, self.config.destinations.staff_alert)
    }

    /// Draft left by the handler's last rejected submission, if still retained.
    pub async fn draft_for(&self, handler: &Invoker) -> Option<IncidentReportFields> {
        self.drafts.get(handler.user_id).await
    }

    /// Files a new incident report.
    ///
    /// Validates the submission, allocates the next report ID, posts the report to the
    /// report log, and persists the record with the posted message ID. A staff alert
    /// linking to the report follows on a best-effort basis. Whenever the submission
    /// is rejected or cannot be completed, the fields are kept as a draft for the
    /// handler so the next form opens pre-filled; a successful filing clears it.
    ///
    /// # Arguments
    /// - `handler` - Staff member filing the report
    /// - `fields` - Submitted form values
    ///
    /// # Returns
    /// - `Ok(ReportId)` - ID of the filed report
    /// - `Err(WorkflowError::Unauthorized)` - Handler lacks the staff role
    /// - `Err(WorkflowError::WrongChannel)` - Not invoked from the staff channel
    /// - `Err(WorkflowError::InvalidInput)` - Unreadable date or blank required field
    /// - `Err(WorkflowError::NotificationDeliveryFailed)` - Report log post failed; nothing stored
    /// - `Err(WorkflowError::StorageUnavailable)` - Record could not be stored; the log post is withdrawn
    pub async fn file_report(
        &self,
        handler: &Invoker,
        fields: IncidentReportFields,
    ) -> Result<ReportId, WorkflowError> {
        self.check_access(handler)?;

        match self.try_file(handler, &fields).await {
            Ok(report_id) => {
                self.drafts.discard(handler.user_id).await;
                Ok(report_id)
            }
            Err(e) => {
                self.drafts.save(handler.user_id, fields).await;
                Err(e)
            }
        }
    }

    async fn try_file(
        &self,
        handler: &Invoker,
        fields: &IncidentReportFields,
    ) -> Result<ReportId, WorkflowError> {
        require_filled("subject for the incident", &fields.subject)?;
        require_filled("description of the incident", &fields.details)?;
        require_filled("outcome for the incident", &fields.outcome)?;

        let now = Utc::now();
        let date = parse_date(&fields.date_text, now)?;

        let mut reports = self.store.lock::<IncidentReports>().await?;
        let report_id = reports.next_id();

        let evidence = fields
            .evidence
            .as_ref()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        let embed = Embed::new(report_id.title(), color::RED)
            .field("Incident Subject", fields.subject.trim())
            .field("Incident Handler", handler.mention())
            .field("Incident Date", date.format("%Y-%m-%d").to_string())
            .field("Incident Details", fields.details.trim())
            .field(
                "Incident Evidence",
                evidence.as_deref().unwrap_or("No evidence provided"),
            )
            .field("Incident Outcome", fields.outcome.trim())
            .timestamp(now);

        let posted = self
            .notifier
            .send(Destination::ReportLog, Notification::embed(embed))
            .await?;

        reports.push(IncidentReport {
            report_id,
            subject: fields.subject.trim().to_string(),
            handler_id: handler.user_id,
            handler_name: handler.display_name.clone(),
            date,
            details: fields.details.trim().to_string(),
            evidence,
            outcome: fields.outcome.trim().to_string(),
            message_id: posted.message_id,
            filed_at: now,
        });

        if let Err(e) = reports.commit().await {
            if let Err(cleanup) = self
                .notifier
                .delete(Destination::ReportLog, posted.message_id)
                .await
            {
                tracing::error!(
                    "Failed to withdraw report log message {} for unsaved {}: {}",
                    posted.message_id,
                    report_id.title(),
                    cleanup
                );
            }
            return Err(e.into());
        }

        tracing::info!(
            "{} filed by {} ({})",
            report_id.title(),
            handler.display_name,
            handler.user_id
        );

        let alert = Notification::text(format!(
            "New incident report filed by {}: [View Report]({})",
            handler.mention(),
            posted.jump_url(self.config.guild_id)
        ));
        if let Err(e) = self.notifier.send(Destination::StaffAlert, alert).await {
            tracing::warn!("Failed to alert staff about {}: {}", report_id.title(), e);
        }

        Ok(report_id)
    }

    /// Finds reports whose subject contains `subject`.
    ///
    /// # Arguments
    /// - `invoker` - Staff member running the lookup
    /// - `subject` - Name or Discord ID to search for, matched case-insensitively
    ///
    /// # Returns
    /// - `Ok(Vec<ReportSummary>)` - Matching reports in filing order, possibly empty
    /// - `Err(WorkflowError::Unauthorized)` - Invoker lacks the staff role
    /// - `Err(WorkflowError::InvalidInput)` - Blank search text
    /// - `Err(WorkflowError::StorageUnavailable)` - Collection could not be read
    pub async fn lookup_reports(
        &self,
        invoker: &Invoker,
        subject: &str,
    ) -> Result<Vec<ReportSummary>, WorkflowError> {
        authorize(invoker, &[self.config.roles.unit_staff])?;
        require_filled("Discord ID or name to search for", subject)?;

        let reports = self.store.load::<IncidentReports>().await?;

        Ok(reports.matching(subject))
    }

    /// Deletes a report and its report log message.
    ///
    /// A log message that is already gone does not block the deletion. Any other
    /// failure to delete it leaves the record in place. Remaining reports keep their
    /// IDs.
    ///
    /// # Arguments
    /// - `invoker` - Staff member deleting the report
    /// - `report_ref` - Free-form report reference such as `Incident Report 0004` or `4`
    ///
    /// # Returns
    /// - `Ok(ReportId)` - ID of the deleted report
    /// - `Err(WorkflowError::Unauthorized)` - Invoker lacks the staff role
    /// - `Err(WorkflowError::WrongChannel)` - Not invoked from the staff channel
    /// - `Err(WorkflowError::InvalidInput)` - Reference contains no usable number
    /// - `Err(WorkflowError::NotFound)` - No report with that ID
    /// - `Err(WorkflowError::NotificationDeliveryFailed)` - Log message could not be deleted
    /// - `Err(WorkflowError::StorageUnavailable)` - Collection could not be read or written
    pub async fn delete_report(
        &self,
        invoker: &Invoker,
        report_ref: &str,
    ) -> Result<ReportId, WorkflowError> {
        self.check_access(invoker)?;

        let report_id: ReportId = report_ref.parse()?;

        let mut reports = self.store.lock::<IncidentReports>().await?;
        let message_id = reports
            .find(report_id)
            .map(|r| r.message_id)
            .ok_or_else(|| {
                WorkflowError::NotFound(format!("Report ID {} does not exist.", report_ref.trim()))
            })?;

        match self
            .notifier
            .delete(Destination::ReportLog, message_id)
            .await
        {
            Ok(()) => {}
            Err(NotificationError::NotFound) => {
                tracing::warn!(
                    "Report log message {} for {} was already gone",
                    message_id,
                    report_id.title()
                );
            }
            Err(e) => return Err(e.into()),
        }

        reports.remove(report_id);
        reports.commit().await?;

        tracing::info!(
            "{} deleted by {} ({})",
            report_id.title(),
            invoker.display_name,
            invoker.user_id
        );

        Ok(report_id)
    }
}
