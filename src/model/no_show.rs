//! No-show tracking records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collection::{Collection, Document};

/// One reported absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoShowEntry {
    #[serde(default)]
    pub operation_name: Option<String>,
    pub date: DateTime<Utc>,
    /// Organizer of the missed operation (the Zeus).
    #[serde(default, alias = "zeus")]
    pub organizer: Option<String>,
    #[serde(default)]
    pub reporter_id: Option<u64>,
}

/// All absences reported for one member.
///
/// `count` always equals the number of entries. A stored record that disagrees is
/// repaired on load and logged as a data-integrity warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredNoShowRecord")]
pub struct NoShowRecord {
    count: u32,
    records: Vec<NoShowEntry>,
}

impl NoShowRecord {
    /// Appends an entry and returns the new count.
    pub fn push(&mut self, entry: NoShowEntry) -> u32 {
        self.records.push(entry);
        self.count = self.records.len() as u32;
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn records(&self) -> &[NoShowEntry] {
        &self.records
    }
}

#[derive(Deserialize)]
struct StoredNoShowRecord {
    #[serde(default)]
    count: u32,
    #[serde(default)]
    records: Vec<NoShowEntry>,
}

impl From<StoredNoShowRecord> for NoShowRecord {
    fn from(stored: StoredNoShowRecord) -> Self {
        let actual = stored.records.len() as u32;
        if stored.count != actual {
            tracing::warn!(
                target: "data_integrity",
                "No-show record count {} disagrees with {} stored entries, using entries",
                stored.count,
                actual
            );
        }

        Self {
            count: actual,
            records: stored.records,
        }
    }
}

/// No-show records keyed by member ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoShowData {
    members: BTreeMap<u64, NoShowRecord>,
}

impl Document for NoShowData {
    const COLLECTION: Collection = Collection::NoShows;
    const VERSION: i32 = 1;
}

impl NoShowData {
    /// Record for `member_id`, created empty on first use.
    pub fn record_mut(&mut self, member_id: u64) -> &mut NoShowRecord {
        self.members.entry(member_id).or_default()
    }

    #[cfg(test)]
    pub fn get(&self, member_id: u64) -> Option<&NoShowRecord> {
        self.members.get(&member_id)
    }

    /// Members ordered by descending count.
    ///
    /// Ties keep ascending member ID order, which is the map's natural order.
    pub fn leaderboard(&self) -> Vec<(u64, &NoShowRecord)> {
        let mut rows: Vec<(u64, &NoShowRecord)> =
            self.members.iter().map(|(id, r)| (*id, r)).collect();
        rows.sort_by(|a, b| b.1.count().cmp(&a.1.count()));
        rows
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
