//! Authorization gate run at the start of every workflow.
//!
//! Checks use the roles carried by the [`Invoker`], which the bot layer fetches from
//! Discord on each invocation. Nothing is cached between calls.

use crate::{error::workflow::WorkflowError, model::invoker::Invoker};

/// Requires the invoker to hold at least one of `required`.
///
/// # Arguments
/// - `invoker` - Member running the command
/// - `required` - Role IDs, any one of which grants access
///
/// # Returns
/// - `Ok(())` - Invoker holds a required role
/// - `Err(WorkflowError::Unauthorized)` - Invoker holds none; the error names every role
pub fn authorize(invoker: &Invoker, required: &[u64]) -> Result<(), WorkflowError> {
    if invoker.has_any_role(required) {
        return Ok(());
    }

    tracing::debug!(
        "Denied {} ({}), required one of {:?}",
        invoker.display_name,
        invoker.user_id,
        required
    );

    Err(WorkflowError::Unauthorized {
        required: required.to_vec(),
    })
}

/// Requires the command to have been invoked from `expected`.
pub fn require_channel(invoker: &Invoker, expected: u64) -> Result<(), WorkflowError> {
    if invoker.channel_id == expected {
        Ok(())
    } else {
        Err(WorkflowError::WrongChannel {
            expected,
            actual: invoker.channel_id,
        })
    }
}
