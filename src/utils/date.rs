use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Trading dates are written as YYYY-MM-DD
pub const TRADE_DATE_FORMAT: &str = "%Y-%m-%d";

fn trade_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"))
}

/// Parse a trading date string (YYYY-MM-DD)
///
/// The string has to match the zero-padded pattern exactly, so `2024-1-5`
/// is rejected even though chrono alone would accept it.
pub fn parse_trade_date(date_str: &str) -> anyhow::Result<NaiveDate> {
    if !trade_date_pattern().is_match(date_str) {
        anyhow::bail!("invalid date '{}', expected YYYY-MM-DD", date_str);
    }
    let date = NaiveDate::parse_from_str(date_str, TRADE_DATE_FORMAT)
        .map_err(|e| anyhow::anyhow!("invalid date '{}': {}", date_str, e))?;
    Ok(date)
}

/// Format a date as YYYY-MM-DD
pub fn format_trade_date(date: NaiveDate) -> String {
    date.format(TRADE_DATE_FORMAT).to_string()
}

/// Instant of `hour`:00 local time on `date`, expressed in UTC
pub fn end_of_day(date: NaiveDate, hour: u32) -> anyhow::Result<DateTime<Utc>> {
    let naive = date
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("invalid close hour {}", hour))?;
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| anyhow::anyhow!("{} does not exist in the local time zone", naive))?;
    Ok(local.with_timezone(&Utc))
}

/// Calendar date of an instant in the local time zone
pub fn local_date(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Check if date falls within [start, end], both ends inclusive
pub fn is_date_in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

/// Format duration for logging
pub fn format_duration(duration_ms: f64) -> String {
    if duration_ms < 1000.0 {
        format!("{:.1}ms", duration_ms)
    } else if duration_ms < 60000.0 {
        format!("{:.1}s", duration_ms / 1000.0)
    } else {
        let minutes = (duration_ms / 60000.0).floor();
        let seconds = (duration_ms % 60000.0) / 1000.0;
        format!("{}m{:.1}s", minutes, seconds)
    }
}
