use std::fmt;
use std::sync::LazyLock;
use regex::Regex;
use thiserror::Error;

use super::types::SlotHour;

/// Sheet times look like "9:00:00 AM" or "12:30:00 pm"
static SHEET_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2}):(\d{2}):(\d{2})\s*(AM|PM)$").expect("sheet time pattern is valid")
});

/// Why a preference cell could not be read as a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeLabelError {
    #[error("empty time string")]
    Empty,
    #[error("time does not match H:MM:SS AM|PM")]
    Format,
    #[error("hour must be between 1 and 12")]
    Hour,
}

/// A parsed 24-hour time, minute kept exactly as written in the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLabel {
    pub hour: u8,
    pub minute: u8,
}

impl TimeLabel {
    /// The bucket this label names. Only labels on the hour name a bucket.
    pub fn slot(self) -> Option<SlotHour> {
        if self.minute == 0 {
            SlotHour::new(self.hour)
        } else {
            None
        }
    }
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Parses a 12-hour sheet time ("2:30:00 PM") into a 24-hour label ("14:30")
pub fn parse_time_label(time_str: &str) -> Result<TimeLabel, TimeLabelError> {
    if time_str.is_empty() {
        return Err(TimeLabelError::Empty);
    }

    let caps = SHEET_TIME.captures(time_str).ok_or(TimeLabelError::Format)?;

    // Both groups are pure digits of bounded length, parsing cannot overflow u8
    let hour: u8 = caps[1].parse().map_err(|_| TimeLabelError::Format)?;
    let minute: u8 = caps[2].parse().map_err(|_| TimeLabelError::Format)?;

    if !(1..=12).contains(&hour) {
        return Err(TimeLabelError::Hour);
    }

    let is_pm = caps[4].eq_ignore_ascii_case("PM");
    let hour = match (is_pm, hour) {
        (true, h) if h != 12 => h + 12,
        (false, 12) => 0,
        (_, h) => h,
    };

    Ok(TimeLabel { hour, minute })
}
