use thiserror::Error;

use super::{notification::NotificationError, storage::StorageError};
use crate::model::moderation::MAX_BAN_DAYS;

/// User-correctable input problems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// Incident date could not be read as a calendar date.
    #[error("Unrecognised date '{0}'")]
    Date(String),

    /// Report identifier contains no usable number.
    #[error("Unrecognised report ID '{0}'")]
    ReportId(String),

    /// Ban duration outside `1..=MAX_BAN_DAYS`.
    #[error("Ban duration must be between 1 and 36500 days, got {0}")]
    BanDuration(i64),

    /// A required free-text field was blank.
    #[error("Field '{0}' must not be blank")]
    Blank(&'static str),
}

/// Outcome taxonomy shared by every workflow.
///
/// Authorization and input errors are meant for the invoking user. Storage and
/// notification errors carry internal detail that is logged by
/// [`WorkflowError::user_message`] and replaced with a generic message.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Invoker holds none of the roles the operation requires.
    #[error("Invoker lacks one of the required roles {required:?}")]
    Unauthorized {
        /// Role IDs, any one of which would have been sufficient
        required: Vec<u64>,
    },

    /// Operation invoked outside its designated channel.
    #[error("Command used in channel {actual}, expected {expected}")]
    WrongChannel {
        /// Channel the operation is restricted to
        expected: u64,
        /// Channel it was invoked from
        actual: u64,
    },

    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// Referenced record does not exist.
    ///
    /// # Fields
    /// - Message describing what was not found, shown to the user
    #[error("{0}")]
    NotFound(String),

    /// Candidate was already tracked for the most recent operation.
    #[error("Candidate already tracked within the de-duplication window")]
    AlreadyTracked,

    #[error(transparent)]
    StorageUnavailable(#[from] StorageError),

    #[error(transparent)]
    NotificationDeliveryFailed(#[from] NotificationError),

    /// A form awaiting user input was not submitted in time.
    #[error("Timed out waiting for form submission")]
    Timeout,
}

impl WorkflowError {
    /// Returns the text shown to the invoking user.
    ///
    /// Storage and delivery failures are logged with full detail here and replaced with
    /// a generic message, so internal paths and error chains never reach the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized { required } => {
                let roles = required
                    .iter()
                    .map(|id| format!("<@&{}>", id))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "You must have one of the following roles to use this command: {}",
                    roles
                )
            }
            Self::WrongChannel { expected, .. } => format!(
                "You can only use this command in the designated staff channel <#{}>.",
                expected
            ),
            Self::InvalidInput(InvalidInput::Date(_)) => "Invalid date format. Please use YYYY-MM-DD. \
                 Your answers have been kept, run the command again to continue."
                .to_string(),
            Self::InvalidInput(InvalidInput::ReportId(_)) => {
                "Invalid report ID format. Please use `Incident Report ####`.".to_string()
            }
            Self::InvalidInput(InvalidInput::BanDuration(_)) => {
                format!("Duration must be between 1 and {} days.", MAX_BAN_DAYS)
            }
            Self::InvalidInput(InvalidInput::Blank(field)) => {
                format!("You must provide a {}.", field)
            }
            Self::NotFound(msg) => msg.clone(),
            Self::AlreadyTracked => "Error code CCT-0004: Member has already been tracked for \
                 this operation. Please try again later."
                .to_string(),
            Self::StorageUnavailable(err) => {
                tracing::error!("Storage failure: {}", err);
                "An error occurred while saving your request. Please try again later.".to_string()
            }
            Self::NotificationDeliveryFailed(err) => {
                tracing::error!("Notification delivery failure: {}", err);
                "Could not deliver the message. Please try again later.".to_string()
            }
            Self::Timeout => {
                "The form timed out before it was submitted. Nothing was saved.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that role requirements are rendered as mentions.
    ///
    /// Expected: every required role appears as `<@&id>`
    #[test]
    fn unauthorized_names_required_roles() {
        let err = WorkflowError::Unauthorized {
            required: vec![11, 22],
        };

        let msg = err.user_message();

        assert!(msg.contains("<@&11>"));
        assert!(msg.contains("<@&22>"));
    }

    /// Tests that storage detail does not leak into the user message.
    ///
    /// Expected: generic text without the collection name
    #[test]
    fn storage_failure_is_generic() {
        let err = WorkflowError::StorageUnavailable(StorageError::UnsupportedVersion {
            collection: "incident_reports",
            found: 9,
            supported: 1,
        });

        let msg = err.user_message();

        assert!(!msg.contains("incident_reports"));
        assert!(msg.contains("try again later"));
    }
}
