//! Candidate progress, derived from the announcement channel history.

use chrono::{DateTime, Utc};

/// A message read back from a channel's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMessage {
    pub id: u64,
    pub content: String,
    /// Users mentioned by the message.
    pub mention_ids: Vec<u64>,
    pub created_at: DateTime<Utc>,
}

/// Qualifying announcements found for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperationTally {
    pub count: u32,
    pub most_recent: Option<DateTime<Utc>>,
}

impl OperationTally {
    /// Counts messages that contain `keyword` (case-insensitive) and mention `member_id`.
    ///
    /// Pure over the history slice; the order of `history` does not matter.
    pub fn from_history(history: &[HistoryMessage], member_id: u64, keyword: &str) -> Self {
        let keyword = keyword.to_lowercase();

        history
            .iter()
            .filter(|m| m.mention_ids.contains(&member_id))
            .filter(|m| m.content.to_lowercase().contains(&keyword))
            .fold(Self::default(), |tally, m| Self {
                count: tally.count + 1,
                most_recent: Some(match tally.most_recent {
                    Some(t) if t >= m.created_at => t,
                    _ => m.created_at,
                }),
            })
    }
}

/// Result of a tracking request, after the announcement has been posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub member_id: u64,
    /// Qualifying operations counted.
    pub count: u32,
    /// Operations required for promotion.
    pub total: u32,
    pub promoted: bool,
}

impl ProgressReport {
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.count)
    }
}
