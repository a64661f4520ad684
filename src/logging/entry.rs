//! Log entry types
//!
//! Core types for representing severities and buffered records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message severity, most urgent first (lower value = more urgent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error = 0,
    Warning = 1,
    Info = 2,
    Trace = 3,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Trace,
    ];

    /// Fixed-width label written after the timestamp
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "ERROR   : ",
            Severity::Warning => "WARNING : ",
            Severity::Info => "INFO    : ",
            Severity::Trace => "TRACE   : ",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Trace => "trace",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "0" => Ok(Severity::Error),
            "warning" | "warn" | "1" => Ok(Severity::Warning),
            "info" | "2" => Ok(Severity::Info),
            "trace" | "3" => Ok(Severity::Trace),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// What a buffered record is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Caller message, routed to console and file
    Message,
    /// "Logging Started" banner, routed to the file only
    Banner,
}

/// Record captured while the registry is still buffering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecord {
    pub severity: Severity,
    pub kind: RecordKind,
    /// Prefix, caller values and line end, already rendered
    pub fragments: Vec<String>,
    /// Registry-wide call order, used when buffers are merged
    pub seq: u64,
}

impl PendingRecord {
    pub fn message(severity: Severity, fragments: Vec<String>) -> Self {
        Self {
            severity,
            kind: RecordKind::Message,
            fragments,
            seq: 0,
        }
    }

    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = seq;
        self
    }

    pub fn banner(fragments: Vec<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind: RecordKind::Banner,
            fragments,
            seq: 0,
        }
    }

    pub fn is_banner(&self) -> bool {
        self.kind == RecordKind::Banner
    }

    /// Fragments joined into the exact text that reaches a sink
    pub fn text(&self) -> String {
        self.fragments.concat()
    }
}
