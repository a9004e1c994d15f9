//! Commendations: public recognition posted to the commendations channel, paid out
//! through the performance bonus ledger.

use crate::{
    config::Config,
    error::workflow::WorkflowError,
    model::{
        bonus::Cents,
        invoker::Invoker,
        notification::{Destination, MessageRef, Notification},
    },
    service::{bonus::BonusService, notify::Notifier, store::RecordStore},
    util::validate::require_filled,
};

/// A commendation as submitted.
#[derive(Debug, Clone)]
pub struct Commendation {
    pub person_id: u64,
    /// Role the person played in the operation.
    pub role: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommendationOutcome {
    /// Bonus wired to the commended person, zero when they hit the daily limit.
    pub bonus: Cents,
    pub message: MessageRef,
}

pub struct CommendationService<'a> {
    config: &'a Config,
    store: &'a RecordStore,
    notifier: &'a dyn Notifier,
}

impl<'a> CommendationService<'a> {
    pub fn new(config: &'a Config, store: &'a RecordStore, notifier: &'a dyn Notifier) -> Self {
        Self {
            config,
            store,
            notifier,
        }
    }

    /// Commends a member and awards them a performance bonus.
    ///
    /// Open to every member. The bonus is recorded before the commendation is posted;
    /// a failed post leaves the bonus in place and is reported as a delivery failure.
    ///
    /// # Arguments
    /// - `invoker` - Member giving the commendation
    /// - `commendation` - Commended person, their role, and the reason
    ///
    /// # Returns
    /// - `Ok(CommendationOutcome)` - Awarded bonus and the posted message
    /// - `Err(WorkflowError::InvalidInput)` - Blank role or reason
    /// - `Err(WorkflowError::StorageUnavailable)` - Bonus ledger could not be updated
    /// - `Err(WorkflowError::NotificationDeliveryFailed)` - Commendation could not be posted
    pub async fn commend(
        &self,
        invoker: &Invoker,
        commendation: Commendation,
    ) -> Result<CommendationOutcome, WorkflowError> {
        require_filled("role", &commendation.role)?;
        require_filled("reason", &commendation.reason)?;

        tracing::info!(
            "Commendation by {} ({}) for {} as '{}'",
            invoker.display_name,
            invoker.user_id,
            commendation.person_id,
            commendation.role.trim()
        );

        let bonus = BonusService::new(self.config, self.store)
            .award_bonus(commendation.person_id)
            .await?;

        let payout = if bonus.is_zero() {
            format!(
                "No Performance Bonus was wired this time, the limit of {} per day has been reached.",
                self.config.thresholds.bonus_daily_limit
            )
        } else {
            format!(
                "The Performance Bonus of {} has been wired to your account.",
                bonus
            )
        };

        let message = self
            .notifier
            .send(
                Destination::Commendations,
                Notification::text(format!(
                    "**Commended: **<@{}>\n**By: **{}\n**Role: **{}\n**Reason: **{}\n{}",
                    commendation.person_id,
                    invoker.mention(),
                    commendation.role.trim(),
                    commendation.reason.trim(),
                    payout
                )),
            )
            .await?;

        Ok(CommendationOutcome { bonus, message })
    }
}
