//! Pure display-formatting helpers shared by every surface.

use chrono::{DateTime, Utc};

/// `Sat, Jun 14, 6:30 PM`
pub fn format_date(at: DateTime<Utc>) -> String {
  at.format("%a, %b %-d, %-I:%M %p").to_string()
}

/// `Jun 14, 2025`
pub fn format_date_short(at: DateTime<Utc>) -> String {
  at.format("%b %-d, %Y").to_string()
}

/// `6:30 PM - 9:00 PM`
pub fn format_time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
  format!(
    "{} - {}",
    start.format("%-I:%M %p"),
    end.format("%-I:%M %p")
  )
}
