//! Input parsing and timestamp formatting helpers.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::AppError;

/// Date formats accepted by the `created_date` command option.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", // 2024-01-15
    "%d/%m/%Y", // 15/01/2024
    "%d-%m-%Y", // 15-01-2024
    "%Y/%m/%d", // 2024/01/15
    "%d.%m.%Y", // 15.01.2024
    "%d %m %Y", // 15 01 2024
];

/// Timestamp format used for spreadsheet cells.
pub const SHEET_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a user-supplied creation date.
///
/// Tries each supported format in turn. The time of day is taken from `now`
/// in the configured timezone, matching how a backdated item keeps its
/// position within the day. Dates after today (in `tz`) are rejected.
///
/// # Arguments
/// - `input` - Raw date string from the command option
/// - `tz` - Configured display timezone
/// - `now` - Current instant, injected for testability
///
/// # Returns
/// - `Ok(DateTime<Utc>)` - Parsed creation instant
/// - `Err(AppError::BadRequest)` - Unrecognized format or future date
pub fn parse_created_date(input: &str, tz: Tz, now: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
    let trimmed = input.trim();

    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| AppError::BadRequest(format!("Unrecognized date format: '{}'", trimmed)))?;

    let local_now = now.with_timezone(&tz);

    if date > local_now.date_naive() {
        return Err(AppError::BadRequest(format!(
            "Creation date may not be in the future: {}",
            date
        )));
    }

    let local = tz
        .from_local_datetime(&date.and_time(local_now.time()))
        .earliest()
        .ok_or_else(|| {
            AppError::BadRequest(format!("Date '{}' is not valid in timezone {}", date, tz))
        })?;

    Ok(local.with_timezone(&Utc))
}

/// Splits, trims, and dedupes a comma-separated participant list,
/// preserving first-seen order.
pub fn sanitize_participants(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for name in raw.split(',') {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }

    names
}

/// Formats a UTC instant for a spreadsheet cell in the configured timezone.
pub fn format_sheet_datetime(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format(SHEET_DATETIME_FORMAT).to_string()
}

/// Formats only the date portion in the configured timezone.
pub fn format_date(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%Y-%m-%d").to_string()
}

/// Parses a spreadsheet timestamp cell, interpreting the naive value in `tz`.
pub fn parse_sheet_datetime(raw: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let naive = chrono::NaiveDateTime::parse_from_str(raw.trim(), SHEET_DATETIME_FORMAT).ok()?;
    Some(tz.from_local_datetime(&naive).earliest()?.with_timezone(&Utc))
}
