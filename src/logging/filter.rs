//! Severity thresholds
//!
//! A threshold is the least urgent severity a sink still emits.

use super::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sink threshold; `Off` suppresses the sink entirely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelFilter {
    Off,
    Error,
    Warning,
    Info,
    #[default]
    Trace,
}

impl LevelFilter {
    /// Check if a record of `severity` passes this threshold
    #[inline]
    pub fn allows(self, severity: Severity) -> bool {
        match self.max_severity() {
            Some(max) => severity <= max,
            None => false,
        }
    }

    /// Least urgent severity still emitted, `None` when suppressed
    pub fn max_severity(self) -> Option<Severity> {
        match self {
            LevelFilter::Off => None,
            LevelFilter::Error => Some(Severity::Error),
            LevelFilter::Warning => Some(Severity::Warning),
            LevelFilter::Info => Some(Severity::Info),
            LevelFilter::Trace => Some(Severity::Trace),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LevelFilter::Off => "off",
            LevelFilter::Error => "error",
            LevelFilter::Warning => "warning",
            LevelFilter::Info => "info",
            LevelFilter::Trace => "trace",
        }
    }
}

impl From<Severity> for LevelFilter {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => LevelFilter::Error,
            Severity::Warning => LevelFilter::Warning,
            Severity::Info => LevelFilter::Info,
            Severity::Trace => LevelFilter::Trace,
        }
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" | "-1" => Ok(LevelFilter::Off),
            other => other
                .parse::<Severity>()
                .map(LevelFilter::from)
                .map_err(|_| format!("unknown level '{}'", other)),
        }
    }
}
