use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};

use crate::error::TypeError;

/// Date format used for warranty dates, e.g. `2020-Jan-01`.
pub const WARRANTY_DATE_FORMAT: &str = "%Y-%b-%d";

/// Format an audit timestamp (RFC 3339, millisecond precision, UTC).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Compute the warranty end date: one calendar year after `start`, date only.
///
/// `start` must be in [`WARRANTY_DATE_FORMAT`]. A start on Feb 29 rolls over
/// to Mar 1 of the following year.
///
/// ```
/// use arl_types::warranty_end_date;
///
/// assert_eq!(warranty_end_date("2020-Jan-01").unwrap(), "2021-Jan-01");
/// ```
pub fn warranty_end_date(start: &str) -> Result<String, TypeError> {
    let invalid = || TypeError::InvalidDate {
        value: start.to_string(),
        format: WARRANTY_DATE_FORMAT,
    };
    let start_date = NaiveDate::parse_from_str(start, WARRANTY_DATE_FORMAT)
        .map_err(|_| invalid())?;
    let next_year = start_date.year() + 1;
    let end = start_date
        .with_year(next_year)
        .or_else(|| NaiveDate::from_ymd_opt(next_year, 3, 1))
        .ok_or_else(invalid)?;
    Ok(end.format(WARRANTY_DATE_FORMAT).to_string())
}
