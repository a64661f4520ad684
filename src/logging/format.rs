//! Record prefix and line terminator formatting
//!
//! Pure functions, called once per record so every sink a record reaches
//! gets the same prefix string.

use super::Severity;
use crate::constants::{
    BANNER_SEPARATOR, BANNER_TEXT, BANNER_WIDTH, DATE_FORMAT, DATE_TIME_FORMAT,
    FIELD_SEPARATOR, TIME_FORMAT,
};
use chrono::{DateTime, Local};
use std::ops::BitOr;

/// Prefix fields to emit, as a small bit set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format(u8);

impl Format {
    pub const NONE: Format = Format(0);
    pub const DATE: Format = Format(0b0000_0001);
    pub const TIME: Format = Format(0b0000_0010);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn from_bits(bits: u8) -> Format {
        Format(bits & (Self::DATE.0 | Self::TIME.0))
    }

    pub const fn contains(self, other: Format) -> bool {
        self.0 & other.0 == other.0
    }

    /// Build from the two config switches
    pub fn from_flags(date: bool, time: bool) -> Format {
        let mut format = Format::NONE;
        if date {
            format = format | Format::DATE;
        }
        if time {
            format = format | Format::TIME;
        }
        format
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::DATE | Format::TIME
    }
}

impl BitOr for Format {
    type Output = Format;

    fn bitor(self, rhs: Format) -> Format {
        Format(self.0 | rhs.0)
    }
}

/// Timestamp part of the prefix, including its trailing separator
pub fn timestamp(format: Format, now: &DateTime<Local>) -> String {
    let layout = match (format.contains(Format::DATE), format.contains(Format::TIME)) {
        (true, true) => DATE_TIME_FORMAT,
        (true, false) => DATE_FORMAT,
        (false, true) => TIME_FORMAT,
        (false, false) => return String::new(),
    };
    format!("{}{}", now.format(layout), FIELD_SEPARATOR)
}

/// Full record prefix: optional date, optional time, severity label
pub fn prefix(format: Format, severity: Severity, now: &DateTime<Local>) -> String {
    let mut out = timestamp(format, now);
    out.push_str(severity.label());
    out
}

/// Prefix stamped with the current local time
pub fn prefix_now(format: Format, severity: Severity) -> String {
    prefix(format, severity, &Local::now())
}

/// Platform line terminator
#[inline]
pub fn line_end() -> &'static str {
    if cfg!(windows) {
        "\r\n"
    } else {
        "\n"
    }
}

/// Banner fragments: separator line, then "<date-time> : Logging Started"
pub fn banner(now: &DateTime<Local>) -> Vec<String> {
    let separator: String = std::iter::repeat(BANNER_SEPARATOR)
        .take(BANNER_WIDTH)
        .collect();
    vec![
        separator,
        line_end().to_string(),
        timestamp(Format::DATE | Format::TIME, now),
        BANNER_TEXT.to_string(),
        line_end().to_string(),
    ]
}
