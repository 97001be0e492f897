use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Wall-clock time of day, stored as minutes after midnight.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd)]
#[serde(try_from = "String", into = "String")]
pub struct Time(pub u64);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unrecognised wall-clock time: {0:?}")]
pub struct TimeParseError(pub String);

impl Time {
    const FORMATS: [&'static str; 3] = ["%I:%M %p", "%I:%M%p", "%H:%M"];

    pub fn hm(hour: u64, minute: u64) -> Time {
        Time(hour * 60 + minute)
    }

    pub fn hour(&self) -> u64 {
        (self.0 / 60) % 24
    }
}

impl FromStr for Time {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
            .map(|t| Time::hm(t.hour() as u64, t.minute() as u64))
            .ok_or_else(|| TimeParseError(s.to_string()))
    }
}

impl TryFrom<String> for Time {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Time> for String {
    fn from(value: Time) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.0 % 60)
    }
}

/// Renders a minute count the way the results list shows it, e.g. `5h 15m`.
pub fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
