use chrono::{DateTime, Local, NaiveDate, ParseError, Utc};

/// Parses an RFC 3339 timestamp, e.g. a share expiry typed in the REPL, into a `DateTime<Utc>`.
pub fn parse_rfc3339_string(s: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Describes how long ago `date` was, seen from `today`.
///
/// Same calendar day is "Today", the previous one "Yesterday", up to six days back
/// "N days ago", anything older (or in the future) the ISO date.
//
// // 以自然日计算相对时间：当天、昨天、N 天前，更早则显示日期。
pub fn format_relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let days = today.signed_duration_since(date).num_days();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}

/// [`format_relative_date`] for a service timestamp, in the local time zone.
pub fn format_last_accessed(at: DateTime<Utc>) -> String {
    let today = Local::now().date_naive();
    format_relative_date(at.with_timezone(&Local).date_naive(), today)
}
