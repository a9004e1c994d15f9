//! Zeus in Training feedback, forwarded to curators for review.

use crate::{
    config::Config,
    error::workflow::WorkflowError,
    model::{
        feedback::ZitFeedback,
        invoker::Invoker,
        notification::{color, Destination, Embed, MessageRef, Notification},
    },
    service::{auth::authorize, notify::Notifier},
    util::validate::require_filled,
};

pub struct FeedbackService<'a> {
    config: &'a Config,
    notifier: &'a dyn Notifier,
}

impl<'a> FeedbackService<'a> {
    pub fn new(config: &'a Config, notifier: &'a dyn Notifier) -> Self {
        Self { config, notifier }
    }

    /// Checks that `invoker` may submit feedback, before the form is shown.
    pub fn check_access(&self, invoker: &Invoker) -> Result<(), WorkflowError> {
        let roles = &self.config.roles;
        authorize(invoker, &[roles.curator, roles.zeus])
    }

    /// Posts feedback on a Zeus in Training to the feedback channel, tagging curators.
    ///
    /// # Returns
    /// - `Ok(MessageRef)` - The posted feedback
    /// - `Err(WorkflowError::Unauthorized)` - Invoker is neither curator nor Zeus
    /// - `Err(WorkflowError::InvalidInput)` - A form field was blank
    /// - `Err(WorkflowError::NotificationDeliveryFailed)` - Feedback could not be posted
    pub async fn submit_zit_feedback(
        &self,
        invoker: &Invoker,
        feedback: ZitFeedback,
    ) -> Result<MessageRef, WorkflowError> {
        self.check_access(invoker)?;

        require_filled("operation name and date", &feedback.operation)?;
        require_filled("description of the operation", &feedback.details)?;
        require_filled("list of things done well", &feedback.done_well)?;
        require_filled("list of points for improvement", &feedback.improvements)?;

        let embed = Embed::new("**Zeus in Training Feedback Submission**", color::PURPLE)
            .description(format!(
                "Feedback for <@{}> submitted by {}",
                feedback.subject_id,
                invoker.mention()
            ))
            .field("Operation Name & Date", feedback.operation.trim())
            .field("Operation Details", feedback.details.trim())
            .field("Things Done Well", feedback.done_well.trim())
            .field("Points for Improvement", feedback.improvements.trim())
            .field(
                "Recommendation for Full Zeus Tags",
                if feedback.recommend { "**Yes**" } else { "**No**" },
            );

        let notification = Notification::embed(embed).with_content(format!(
            "<@&{}>, this feedback is awaiting your review.",
            self.config.roles.curator
        ));

        let message = self
            .notifier
            .send(Destination::ZeusFeedback, notification)
            .await?;

        tracing::info!(
            "ZiT feedback for {} submitted by {} ({})",
            feedback.subject_id,
            invoker.display_name,
            invoker.user_id
        );

        Ok(message)
    }
}
