//! Publication date formatting

use chrono::DateTime;

/// Display pattern for publication dates
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Feed timestamp pattern once the weekday prefix is removed
const FEED_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Reformat an RFC 822 style feed timestamp as `YYYY-MM-DD HH:MM`.
///
/// The wall-clock time is kept in the timestamp's own offset. Anything that
/// does not match `"%a, %d %b %Y %H:%M:%S %z"` is returned unchanged. A
/// trailing `Z` is accepted as `+0000`.
///
/// The weekday name is checked for spelling only: feeds regularly publish a
/// weekday that disagrees with the date, and those timestamps still format.
///
/// ```
/// use news_translate::dates::format_date;
///
/// assert_eq!(format_date("Mon, 01 Jan 2024 09:00:00 +0000"), "2024-01-01 09:00");
/// assert_eq!(format_date("garbage"), "garbage");
/// ```
pub fn format_date(raw: &str) -> String {
    match parse_feed_timestamp(raw) {
        Some(formatted) => formatted,
        None => {
            tracing::debug!(raw, "date did not match feed format, passing through");
            raw.to_string()
        }
    }
}

fn parse_feed_timestamp(raw: &str) -> Option<String> {
    let (weekday, rest) = raw.split_once(", ")?;
    if !WEEKDAYS.iter().any(|day| day.eq_ignore_ascii_case(weekday)) {
        return None;
    }

    // chrono's %z has no "Z" shorthand for UTC
    let normalized;
    let rest = match rest.strip_suffix(" Z") {
        Some(head) => {
            normalized = format!("{} +0000", head);
            normalized.as_str()
        }
        None => rest,
    };

    DateTime::parse_from_str(rest, FEED_FORMAT)
        .ok()
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
}
