use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use std::time::SystemTime;

use crate::error::{PunchcardError, Result};

/// Parse a cutoff argument: RFC3339, `YYYY-MM-DD` (end of that day), or a
/// natural-language duration such as `2 weeks ago` or `90d`.
pub fn parse_cutoff(input: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(23, 59, 59) {
            return Ok(Utc.from_utc_datetime(&datetime).fixed_offset());
        }
    }

    if let Some(duration) = parse_natural_duration(input) {
        let now = SystemTime::now();
        let target = now
            .checked_sub(duration)
            .ok_or_else(|| PunchcardError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        return Ok(DateTime::<Utc>::from(target).fixed_offset());
    }

    Err(PunchcardError::InvalidDate(format!(
        "Invalid cutoff '{input}': expected RFC3339, YYYY-MM-DD, or a duration like '2 weeks ago'"
    )))
}

fn parse_natural_duration(input: &str) -> Option<std::time::Duration> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_suffix("ago").unwrap_or(trimmed).trim();
    let trimmed = trimmed.strip_prefix('-').unwrap_or(trimmed);
    humantime::parse_duration(trimmed).ok()
}

/// Parse a log timezone column (`+0800`, `-08:00`, `Z`) into a fixed offset.
pub fn parse_offset(tz: &str) -> Option<FixedOffset> {
    let tz = tz.trim();
    if tz.is_empty() || tz == "Z" || tz == "z" {
        return FixedOffset::east_opt(0);
    }

    let compact: String = tz.chars().filter(|c| *c != ':').collect();
    if compact.len() != 5 {
        return None;
    }
    let (sign, digits) = compact.split_at(1);
    let hours: i32 = digits[0..2].parse().ok()?;
    let minutes: i32 = digits[2..4].parse().ok()?;
    let seconds = hours * 3600 + minutes * 60;

    match sign {
        "+" => FixedOffset::east_opt(seconds),
        "-" => FixedOffset::west_opt(seconds),
        _ => None,
    }
}

/// Axis label for an hour-of-day tick.
pub fn hour_label(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// One-decimal percentage with trailing zeros trimmed: 33.3%, 25%.
pub fn format_percent(percent: f64) -> String {
    let s = format!("{percent:.1}");
    let s = s.strip_suffix(".0").unwrap_or(&s);
    format!("{s}%")
}
