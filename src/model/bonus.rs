//! Performance bonus ledger.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::collection::{Collection, Document};

/// Money amount in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub u64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Renders as dollars with thousands separators, e.g. `$1,234.56`.
impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = (self.0 / 100).to_string();
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, c) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "${}.{:02}", grouped, self.0 % 100)
    }
}

/// Bonuses received by one member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusLedger {
    /// Sum of every non-zero award. Never decreases.
    pub total: Cents,
    /// Award times inside the rate-limit window, oldest first.
    #[serde(default)]
    pub timestamps: Vec<DateTime<Utc>>,
}

impl BonusLedger {
    /// Drops award times that fell out of the window ending at `now`.
    pub fn prune(&mut self, now: DateTime<Utc>, window: Duration) {
        self.timestamps.retain(|t| now - *t < window);
    }

    /// Awards counted against the limit at `now`.
    pub fn recent(&self, now: DateTime<Utc>, window: Duration) -> usize {
        self.timestamps.iter().filter(|t| now - **t < window).count()
    }

    pub fn record(&mut self, amount: Cents, at: DateTime<Utc>) {
        self.total = Cents(self.total.0 + amount.0);
        self.timestamps.push(at);
    }
}

/// Ledgers keyed by recipient member ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BonusLedgers {
    members: BTreeMap<u64, BonusLedger>,
}

impl Document for BonusLedgers {
    const COLLECTION: Collection = Collection::PerformanceBonuses;
    const VERSION: i32 = 1;
}

impl BonusLedgers {
    pub fn ledger_mut(&mut self, member_id: u64) -> &mut BonusLedger {
        self.members.entry(member_id).or_default()
    }

    pub fn total_for(&self, member_id: u64) -> Cents {
        self.members
            .get(&member_id)
            .map(|l| l.total)
            .unwrap_or(Cents::ZERO)
    }

    /// Recipients ordered by descending total; ties by ascending member ID.
    pub fn leaderboard(&self) -> Vec<(u64, Cents)> {
        let mut rows: Vec<(u64, Cents)> = self
            .members
            .iter()
            .filter(|(_, l)| !l.total.is_zero())
            .map(|(id, l)| (*id, l.total))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }
}
