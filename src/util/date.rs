//! Permissive parsing of dates typed into free-text form fields.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::error::workflow::InvalidInput;

/// Date-only layouts tried in order. Month-first wins when both readings are valid.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%A %B %d %Y",
    "%a %b %d %Y",
    "%Y%m%d",
];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M",
];

/// Reads a calendar date from loosely formatted user input.
///
/// Accepts ISO dates, slash/dash/dot separated dates, spelled-out months with or
/// without ordinal suffixes (`March 3rd, 2024`), RFC 3339 timestamps, and the words
/// `today` and `yesterday` relative to `now`.
///
/// # Arguments
/// - `input` - Text as typed by the user
/// - `now` - Reference time for relative words
///
/// # Returns
/// - `Ok(NaiveDate)` - The date that was read
/// - `Err(InvalidInput::Date)` - No supported layout matched
pub fn parse_date(input: &str, now: DateTime<Utc>) -> Result<NaiveDate, InvalidInput> {
    let trimmed = input.trim();

    match trimmed.to_lowercase().as_str() {
        "today" => return Ok(now.date_naive()),
        "yesterday" => return Ok((now - Duration::days(1)).date_naive()),
        _ => {}
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(at.date_naive());
    }

    let normalized = normalize(trimmed);

    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(&normalized, f).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(&normalized, f).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| InvalidInput::Date(input.to_string()))
}

/// Drops commas, collapses whitespace, and strips ordinal suffixes from day numbers.
fn normalize(input: &str) -> String {
    input
        .replace(',', " ")
        .split_whitespace()
        .map(strip_ordinal)
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_ordinal(word: &str) -> &str {
    let lower = word.to_ascii_lowercase();
    for suffix in ["st", "nd", "rd", "th"] {
        if lower.ends_with(suffix) {
            let head = &word[..word.len() - suffix.len()];
            if !head.is_empty() && head.chars().all(|c| c.is_ascii_digit()) {
                return head;
            }
        }
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Tests the common spellings staff type into the date field.
    ///
    /// Expected: each parses to 2024-03-05
    #[test]
    fn parses_common_spellings() {
        for input in [
            "2024-03-05",
            "2024/03/05",
            "03/05/2024",
            "March 5, 2024",
            "March 5th, 2024",
            "Mar 5 2024",
            "5 March 2024",
            "5th Mar 2024",
            "  2024-03-05 ",
            "2024-03-05 18:30",
            "2024-03-05T18:30:00Z",
            "20240305",
        ] {
            assert_eq!(parse_date(input, now()), Ok(ymd(2024, 3, 5)), "{}", input);
        }
    }

    /// Tests that a day above 12 is read day-first when month-first is impossible.
    ///
    /// Expected: 2024-03-25
    #[test]
    fn falls_back_to_day_first() {
        assert_eq!(parse_date("25/03/2024", now()), Ok(ymd(2024, 3, 25)));
        assert_eq!(parse_date("25.03.2024", now()), Ok(ymd(2024, 3, 25)));
    }

    /// Tests relative words.
    ///
    /// Expected: today and yesterday relative to the reference time
    #[test]
    fn parses_relative_words() {
        assert_eq!(parse_date("Today", now()), Ok(ymd(2024, 3, 10)));
        assert_eq!(parse_date("yesterday", now()), Ok(ymd(2024, 3, 9)));
    }

    /// Tests rejecting text that is not a date.
    ///
    /// Expected: Err(InvalidInput::Date) carrying the original text
    #[test]
    fn rejects_garbage() {
        for input in ["", "last tuesday-ish", "2024-13-45", "soon"] {
            assert_eq!(
                parse_date(input, now()),
                Err(InvalidInput::Date(input.to_string()))
            );
        }
    }
}
