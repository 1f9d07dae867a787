//! Time of day with minute resolution.
//!
//! All club times live within a single day, so a time is stored as minutes
//! since midnight and compared as an integer.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

// Two-digit hours only; chrono alone would accept `9:00`.
static HM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2}):([0-9]{2})$").unwrap());

/// A time of day (`HH:MM`), ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Builds a time from hours and minutes, rejecting out-of-range values.
    pub fn from_hm(hours: u32, minutes: u32) -> Result<Self, ValidationError> {
        let time = NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(|| {
            ValidationError::InvalidTime {
                value: format!("{hours:02}:{minutes:02}"),
            }
        })?;
        Ok(Self::from_naive(time))
    }

    // hour() <= 23 and minute() <= 59, so the value always fits
    #[allow(clippy::cast_possible_truncation)]
    fn from_naive(time: NaiveTime) -> Self {
        Self((time.hour() * MINUTES_PER_HOUR + time.minute()) as u16)
    }

    /// Minutes elapsed since midnight.
    pub const fn minutes(self) -> u32 {
        self.0 as u32
    }

    /// Minutes from `self` until `end`, or `None` if `end` is earlier.
    pub const fn minutes_until(self, end: Self) -> Option<u32> {
        if end.0 < self.0 {
            None
        } else {
            Some((end.0 - self.0) as u32)
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hm(self.minutes()))
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime {
            value: s.to_string(),
        };
        let caps = HM_RE.captures(s).ok_or_else(invalid)?;
        let hours = caps[1].parse().map_err(|_| invalid())?;
        let minutes = caps[2].parse().map_err(|_| invalid())?;
        Self::from_hm(hours, minutes).map_err(|_| invalid())
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Formats a minute count as zero-padded `HH:MM`.
///
/// Used both for times of day and for accumulated durations.
pub fn format_hm(total_minutes: u32) -> String {
    format!(
        "{:02}:{:02}",
        total_minutes / MINUTES_PER_HOUR,
        total_minutes % MINUTES_PER_HOUR
    )
}
