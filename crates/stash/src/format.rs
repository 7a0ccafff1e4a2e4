//! Human readable labels for timestamps and chart axes.

use super::*;

/// Maximum number of characters kept by [`axis_label`].
pub const AXIS_LABEL_LEN: usize = 5;

/// Describes how long ago `at` was, relative to `now`.
///
/// Produces `"just now"`, `"12m ago"`, `"5h ago"` or `"3d ago"`, and falls back to
/// a short date such as `"19 Oct"` once the item is a week old. Timestamps in the
/// future count as "just now".
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use stash::format::time_ago;
///
/// let now = Utc::now();
/// assert_eq!(time_ago(now - Duration::minutes(90), now), "1h ago");
/// ```
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let minutes = (now - at).num_minutes();
  if minutes < 1 {
    return "just now".to_string();
  }
  if minutes < 60 {
    return format!("{minutes}m ago");
  }
  let hours = minutes / 60;
  if hours < 24 {
    return format!("{hours}h ago");
  }
  let days = hours / 24;
  if days < 7 {
    format!("{days}d ago")
  } else {
    at.format("%-d %b").to_string()
  }
}

/// Like [`time_ago`], but for a timestamp the backend may have left out.
pub fn time_ago_opt(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
  at.map(|at| time_ago(at, now)).unwrap_or_else(|| "unknown".to_string())
}

/// Full date and time, e.g. `"05 Mar 2024, 10:20 AM"`.
pub fn format_timestamp(at: DateTime<Utc>) -> String { at.format("%d %b %Y, %I:%M %p").to_string() }

/// Shortens a series name for a chart axis: the first [`AXIS_LABEL_LEN`]
/// characters, uppercased.
pub fn axis_label(name: &str) -> String {
  name.chars().take(AXIS_LABEL_LEN).collect::<String>().to_uppercase()
}

/// Truncates `text` to at most `max_len` characters, marking the cut with `…`.
pub fn truncate(text: &str, max_len: usize) -> String {
  if text.chars().count() <= max_len {
    return text.to_string();
  }
  let kept: String = text.chars().take(max_len.saturating_sub(1)).collect();
  format!("{}…", kept.trim_end())
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;

  #[test]
  fn test_time_ago_buckets() {
    let now = Utc.with_ymd_and_hms(2024, 10, 19, 12, 0, 0).unwrap();
    assert_eq!(time_ago(now - Duration::seconds(30), now), "just now");
    assert_eq!(time_ago(now + Duration::minutes(5), now), "just now");
    assert_eq!(time_ago(now - Duration::minutes(59), now), "59m ago");
    assert_eq!(time_ago(now - Duration::hours(23), now), "23h ago");
    assert_eq!(time_ago(now - Duration::days(6), now), "6d ago");
    assert_eq!(time_ago(now - Duration::days(7), now), "12 Oct");
    assert_eq!(time_ago_opt(None, now), "unknown");
  }

  #[test]
  fn test_format_timestamp() {
    let at = Utc.with_ymd_and_hms(2024, 3, 5, 22, 7, 0).unwrap();
    assert_eq!(format_timestamp(at), "05 Mar 2024, 10:07 PM");
  }

  #[test]
  fn test_axis_label() {
    assert_eq!(axis_label("entertainment"), "ENTER");
    assert_eq!(axis_label("food"), "FOOD");
  }

  #[test]
  fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a rather long title", 8), "a rathe…");
  }
}
