//! Time and duration formatting for the session table.
//!
//! Every field produced here has a fixed maximum width known in advance
//! (see [`TimeFormat::width`] and [`MAX_FIELD_LEN`]); longer output is
//! truncated rather than allowed to spill into the next column.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::record::USEC_PER_SEC;

/// Upper bound on the length of any formatted time or duration field.
pub const MAX_FIELD_LEN: usize = 32;

/// How a single instant is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// Nothing at all.
    NoTime,
    /// `Fri Mar 15 13:45`
    Short,
    /// `13:45`, the logout column of the short style.
    HourMinute,
    /// `Fri Mar 15 13:45:30 2024`
    Full,
    /// `2024-03-15T13:45:30+0000`
    Iso,
    /// `2024-03-15 13:45:30`
    Compact,
    /// Seconds since the epoch.
    Raw,
}

impl TimeFormat {
    /// Column width used for alignment in text mode.
    pub fn width(self) -> usize {
        match self {
            TimeFormat::NoTime => 0,
            TimeFormat::Short => 16,
            TimeFormat::HourMinute => 5,
            TimeFormat::Full => 24,
            TimeFormat::Iso => 25,
            TimeFormat::Compact => 19,
            TimeFormat::Raw => 10,
        }
    }

    fn pattern(self) -> Option<&'static str> {
        match self {
            TimeFormat::Short => Some("%a %b %e %H:%M"),
            TimeFormat::HourMinute => Some("%H:%M"),
            TimeFormat::Full => Some("%a %b %e %H:%M:%S %Y"),
            TimeFormat::Iso => Some("%Y-%m-%dT%H:%M:%S%z"),
            TimeFormat::Compact => Some("%Y-%m-%d %H:%M:%S"),
            TimeFormat::NoTime | TimeFormat::Raw => None,
        }
    }
}

/// A user-selectable `--time-format`: a login format plus a logout format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeStyle {
    NoTime,
    Short,
    Full,
    Iso,
    Compact,
    Raw,
}

impl TimeStyle {
    /// `(login, logout)` formats for this style.
    pub fn formats(self) -> (TimeFormat, TimeFormat) {
        match self {
            TimeStyle::NoTime => (TimeFormat::NoTime, TimeFormat::NoTime),
            TimeStyle::Short => (TimeFormat::Short, TimeFormat::HourMinute),
            TimeStyle::Full => (TimeFormat::Full, TimeFormat::Full),
            TimeStyle::Iso => (TimeFormat::Iso, TimeFormat::Iso),
            TimeStyle::Compact => (TimeFormat::Compact, TimeFormat::Compact),
            TimeStyle::Raw => (TimeFormat::Raw, TimeFormat::Raw),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeStyle::NoTime => "notime",
            TimeStyle::Short => "short",
            TimeStyle::Full => "full",
            TimeStyle::Iso => "iso",
            TimeStyle::Compact => "compact",
            TimeStyle::Raw => "raw",
        }
    }
}

impl FromStr for TimeStyle {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notime" => Ok(TimeStyle::NoTime),
            "short" => Ok(TimeStyle::Short),
            "full" => Ok(TimeStyle::Full),
            "iso" => Ok(TimeStyle::Iso),
            "compact" => Ok(TimeStyle::Compact),
            "raw" => Ok(TimeStyle::Raw),
            other => Err(FormatError::UnknownStyle(other.to_string())),
        }
    }
}

/// Renders instants in one time zone.
#[derive(Debug, Clone)]
pub struct TimeFormatter<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz> TimeFormatter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Format `usec` (microseconds since the epoch) with `fmt`.
    pub fn format(&self, fmt: TimeFormat, usec: u64) -> String {
        let secs = i64::try_from(usec / USEC_PER_SEC).unwrap_or(i64::MAX);
        let text = match (fmt, fmt.pattern()) {
            (TimeFormat::NoTime, _) => return String::new(),
            (TimeFormat::Raw, _) | (_, None) => secs.to_string(),
            (_, Some(pattern)) => match DateTime::from_timestamp(secs, 0) {
                Some(utc) => utc.with_timezone(&self.tz).format(pattern).to_string(),
                None => secs.to_string(),
            },
        };
        bounded(text)
    }
}

/// Marker placed in front of a session length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthStatus {
    /// Ended by its own logout (or a clamp to the next boot).
    Closed,
    /// Still open, measured up to now.
    Open,
    /// Ended by a crash, measured up to the next boot.
    Crashed,
}

impl LengthStatus {
    pub fn prefix(self) -> char {
        match self {
            LengthStatus::Closed => ' ',
            LengthStatus::Open => '.',
            LengthStatus::Crashed => '?',
        }
    }
}

/// Format the interval `start..stop` as `prefix(D+HH:MM:SS)`.
///
/// The day part is dropped when zero and the hour part is printed as `00`
/// when it is zero too. `legacy` drops the seconds field. A `stop` before
/// `start` renders as a zero length.
pub fn format_length(start: u64, stop: u64, status: LengthStatus, legacy: bool) -> String {
    let secs = stop.saturating_sub(start) / USEC_PER_SEC;
    let days = secs / 86_400;
    let hours = (secs / 3_600) % 24;
    let mins = (secs / 60) % 60;
    let secs = secs % 60;
    let prefix = status.prefix();

    let text = match (legacy, days, hours) {
        (false, 0, 0) => format!("{prefix}(00:{mins:02}:{secs:02})"),
        (false, 0, _) => format!("{prefix}({hours:02}:{mins:02}:{secs:02})"),
        (false, _, _) => format!("{prefix}({days}+{hours:02}:{mins:02}:{secs:02})"),
        (true, 0, 0) => format!("{prefix}(00:{mins:02})"),
        (true, 0, _) => format!("{prefix}({hours:02}:{mins:02})"),
        (true, _, _) => format!("{prefix}({days}+{hours:02}:{mins:02})"),
    };
    bounded(text)
}

fn bounded(mut text: String) -> String {
    if text.len() > MAX_FIELD_LEN {
        let mut cut = MAX_FIELD_LEN;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}
