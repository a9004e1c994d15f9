//! Incident report records and the form fields they are built from.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::workflow::InvalidInput;

use super::collection::{Collection, Document};

/// Identifier of an incident report.
///
/// Allocated as `max(existing) + 1`. IDs are never reused while the highest report
/// exists, and deleting a report leaves a gap rather than renumbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub u32);

impl ReportId {
    /// Title used for the report-log message, e.g. `Incident Report 0004`.
    pub fn title(&self) -> String {
        format!("Incident Report {}", self)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Accepts free-form references like `Incident Report 0004`, `#4` or `4`.
///
/// All digits in the input are joined and read as one number; zero is rejected.
impl FromStr for ReportId {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();

        match digits.parse::<u32>() {
            Ok(id) if id > 0 => Ok(ReportId(id)),
            _ => Err(InvalidInput::ReportId(s.to_string())),
        }
    }
}

/// Raw values of a submitted incident report form.
///
/// Also the shape kept as a draft when a submission fails validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentReportFields {
    /// Person reported, name plus Discord ID, unvalidated.
    pub subject: String,
    /// Date as typed by the handler.
    pub date_text: String,
    pub details: String,
    pub evidence: Option<String>,
    pub outcome: String,
}

/// A filed incident report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentReport {
    pub report_id: ReportId,
    pub subject: String,
    pub handler_id: u64,
    pub handler_name: String,
    pub date: NaiveDate,
    pub details: String,
    #[serde(default)]
    pub evidence: Option<String>,
    pub outcome: String,
    /// Report-log message posted for this report.
    pub message_id: u64,
    pub filed_at: DateTime<Utc>,
}

/// Every filed report, in filing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentReports {
    reports: Vec<IncidentReport>,
}

impl Document for IncidentReports {
    const COLLECTION: Collection = Collection::IncidentReports;
    const VERSION: i32 = 1;
}

impl IncidentReports {
    /// Next ID to allocate: one past the highest existing ID, or 1 when empty.
    pub fn next_id(&self) -> ReportId {
        let max = self.reports.iter().map(|r| r.report_id.0).max().unwrap_or(0);
        ReportId(max + 1)
    }

    pub fn push(&mut self, report: IncidentReport) {
        self.reports.push(report);
    }

    pub fn find(&self, id: ReportId) -> Option<&IncidentReport> {
        self.reports.iter().find(|r| r.report_id == id)
    }

    /// Removes and returns the report with `id`, leaving other IDs untouched.
    pub fn remove(&mut self, id: ReportId) -> Option<IncidentReport> {
        let index = self.reports.iter().position(|r| r.report_id == id)?;
        Some(self.reports.remove(index))
    }

    /// Reports whose subject contains `needle`, case-insensitively, in filing order.
    pub fn matching(&self, needle: &str) -> Vec<ReportSummary> {
        let needle = needle.trim().to_lowercase();

        self.reports
            .iter()
            .filter(|r| r.subject.to_lowercase().contains(&needle))
            .map(ReportSummary::from)
            .collect()
    }

    #[cfg(test)]
    pub fn ids(&self) -> Vec<ReportId> {
        self.reports.iter().map(|r| r.report_id).collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Lookup result for a single report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub report_id: ReportId,
    pub subject: String,
    pub date: NaiveDate,
    pub outcome: String,
    pub message_id: u64,
}

impl From<&IncidentReport> for ReportSummary {
    fn from(report: &IncidentReport) -> Self {
        Self {
            report_id: report.report_id,
            subject: report.subject.clone(),
            date: report.date,
            outcome: report.outcome.clone(),
            message_id: report.message_id,
        }
    }
}
