//! Clock time handling for timetable rows.
//!
//! Service documents carry times as "HH:MM" strings. Fixed segment times are
//! passed through untouched; shuttle windows are parsed and normalized with
//! [`ClockTime`] before they reach a timetable row.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with minute precision.
///
/// # Examples
///
/// ```
/// use timetable_server::domain::ClockTime;
///
/// let time = ClockTime::parse_hhmm("7:30").unwrap();
/// assert_eq!(time.to_string(), "07:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a time from hour and minute components.
    ///
    /// Returns `None` if the hour is above 23 or the minute above 59.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// The hour may be written with one or two digits; the minute must have
    /// exactly two.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    /// assert!(ClockTime::parse_hhmm("9:05").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("0930").is_err());
    /// assert!(ClockTime::parse_hhmm("7:3").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let (hour_part, minute_part) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        if hour_part.is_empty() || hour_part.len() > 2 {
            return Err(TimeError::new("hour must be one or two digits"));
        }
        if minute_part.len() != 2 {
            return Err(TimeError::new("minute must be two digits"));
        }

        let hour = parse_digits(hour_part.as_bytes())
            .ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_digits(minute_part.as_bytes())
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse a run of ASCII digit bytes into a u32.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        let digit = (b as char).to_digit(10)?;
        Some(acc * 10 + digit)
    })
}
