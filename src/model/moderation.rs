use chrono::{DateTime, Duration, Utc};

/// Longest ban a moderator may issue, in days.
pub const MAX_BAN_DAYS: i64 = 36_500;

/// A ban request as issued by a moderator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanRequest {
    pub member_id: u64,
    pub member_name: String,
    /// Ban length in days, between one and [`MAX_BAN_DAYS`].
    pub duration_days: i64,
    pub appealable: bool,
    pub reason: String,
}

impl BanRequest {
    /// Date the ban lapses when issued at `now`.
    ///
    /// Returns `None` when the duration is outside `1..=MAX_BAN_DAYS`.
    pub fn unban_date(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if !(1..=MAX_BAN_DAYS).contains(&self.duration_days) {
            return None;
        }

        Duration::try_days(self.duration_days).and_then(|length| now.checked_add_signed(length))
    }

    pub fn appeal_status(&self) -> &'static str {
        if self.appealable {
            "Yes"
        } else {
            "No"
        }
    }
}
