//! Emission pipeline
//!
//! Turns a caller's ordered list of `Display` values into the ordered text
//! fragments the registry writes or buffers. Holds no state and never filters.

use super::format::{self, Format};
use super::Severity;
use std::fmt::Display;

/// A rendered record: prefix, one fragment per value, line end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub fragments: Vec<String>,
}

impl Message {
    /// Render `values` in order with the current local time
    pub fn render(format: Format, severity: Severity, values: &[&dyn Display]) -> Self {
        Self::with_prefix(format::prefix_now(format, severity), severity, values)
    }

    /// Render `values` after an already computed prefix
    pub fn with_prefix(prefix: String, severity: Severity, values: &[&dyn Display]) -> Self {
        let mut fragments = Vec::with_capacity(values.len() + 2);
        fragments.push(prefix);
        fragments.extend(values.iter().map(|v| v.to_string()));
        fragments.push(format::line_end().to_string());
        Self {
            severity,
            fragments,
        }
    }

    /// Exact text a sink receives
    pub fn text(&self) -> String {
        self.fragments.concat()
    }
}

/// Log values to an alias: `log_to!(registry, Severity::Info, "net", "rx ", n, " bytes")`
///
/// Expands to `Ok(())` without touching the registry when the crate is built
/// with the `disable` feature.
#[macro_export]
macro_rules! log_to {
    ($registry:expr, $severity:expr, $alias:expr, $($value:expr),+ $(,)?) => {
        if $crate::constants::LOGGING_ENABLED {
            $registry.log(
                $severity,
                $alias,
                &[$(&$value as &dyn ::std::fmt::Display),+],
            )
        } else {
            ::std::result::Result::<(), $crate::LogError>::Ok(())
        }
    };
}

/// Log values to the default alias
#[macro_export]
macro_rules! log_default {
    ($registry:expr, $severity:expr, $($value:expr),+ $(,)?) => {
        $crate::log_to!($registry, $severity, $crate::constants::DEFAULT_ALIAS, $($value),+)
    };
}

/// Log values straight to a file path, opening it on first use
#[macro_export]
macro_rules! log_file {
    ($registry:expr, $severity:expr, $path:expr, $($value:expr),+ $(,)?) => {
        if $crate::constants::LOGGING_ENABLED {
            $registry.log_f(
                $severity,
                $path,
                &[$(&$value as &dyn ::std::fmt::Display),+],
            )
        } else {
            ::std::result::Result::<(), $crate::LogError>::Ok(())
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($registry:expr, $alias:expr, $($value:expr),+ $(,)?) => {
        $crate::log_to!($registry, $crate::logging::Severity::Error, $alias, $($value),+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($registry:expr, $alias:expr, $($value:expr),+ $(,)?) => {
        $crate::log_to!($registry, $crate::logging::Severity::Warning, $alias, $($value),+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($registry:expr, $alias:expr, $($value:expr),+ $(,)?) => {
        $crate::log_to!($registry, $crate::logging::Severity::Info, $alias, $($value),+)
    };
}

#[macro_export]
macro_rules! log_trace {
    ($registry:expr, $alias:expr, $($value:expr),+ $(,)?) => {
        $crate::log_to!($registry, $crate::logging::Severity::Trace, $alias, $($value),+)
    };
}

/// Error on the default alias
#[macro_export]
macro_rules! log_d_error {
    ($registry:expr, $($value:expr),+ $(,)?) => {
        $crate::log_default!($registry, $crate::logging::Severity::Error, $($value),+)
    };
}

#[macro_export]
macro_rules! log_d_warning {
    ($registry:expr, $($value:expr),+ $(,)?) => {
        $crate::log_default!($registry, $crate::logging::Severity::Warning, $($value),+)
    };
}

#[macro_export]
macro_rules! log_d_info {
    ($registry:expr, $($value:expr),+ $(,)?) => {
        $crate::log_default!($registry, $crate::logging::Severity::Info, $($value),+)
    };
}

#[macro_export]
macro_rules! log_d_trace {
    ($registry:expr, $($value:expr),+ $(,)?) => {
        $crate::log_default!($registry, $crate::logging::Severity::Trace, $($value),+)
    };
}
