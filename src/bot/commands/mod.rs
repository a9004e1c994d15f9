//! Slash commands.
//!
//! Each command builds an [`Invoker`](crate::model::invoker::Invoker) from the
//! interaction, calls one workflow, and replies. Workflow errors are answered here
//! with their user message; only Discord API failures propagate to `on_error`.

use crate::bot::Command;

pub mod ban;
pub mod candidate;
pub mod commend;
pub mod feedback;
pub mod incident;
pub mod no_show;

/// Every command the bot registers.
pub fn all() -> Vec<Command> {
    vec![
        incident::incident_report(),
        incident::user_report_file(),
        incident::delete_report(),
        no_show::no_show_report(),
        no_show::no_show_stats(),
        candidate::track_a_candidate(),
        commend::commend(),
        commend::performance_bonus(),
        commend::bonus_leaderboard(),
        feedback::zit_feedback(),
        ban::ban(),
    ]
}
