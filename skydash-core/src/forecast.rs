use chrono::Timelike;

use crate::model::HourlyRecord;

/// Maximum number of hourly entries shown in the strip.
pub const WINDOW_LEN: usize = 6;

/// Select the slice of today's hours to display.
///
/// The window starts at the first record whose hour-of-day is at or past
/// `current_hour`. When the current time is already past the last recorded
/// hour, the window deliberately falls back to the start of the day rather
/// than rendering empty. At most [`WINDOW_LEN`] entries; fewer when the
/// day's data runs out.
pub fn select_window(hours: &[HourlyRecord], current_hour: u32) -> &[HourlyRecord] {
    let start = hours
        .iter()
        .position(|h| h.datetime.hour() >= current_hour)
        .unwrap_or(0);

    let end = (start + WINDOW_LEN).min(hours.len());
    &hours[start..end]
}
