//! Mars Logging - multi-destination logger
//!
//! Routes leveled messages to the console and to files addressed by alias
//! or path. Everything logged before [`Registry::init`] is buffered per
//! destination and replayed in order once the registry goes live.
//!
//! ```no_run
//! use mars_log::{log_default, LevelFilter, Registry, Severity};
//!
//! let log = Registry::new();
//! log_default!(log, Severity::Trace, "before init").unwrap();
//! log.set_output_file("net.log", "net", true).unwrap();
//! log.set_log_level(LevelFilter::Warning, LevelFilter::Trace);
//! log.init("log.txt", true).unwrap();
//! mars_log::log_info!(log, "net", "rx ", 128, " bytes").unwrap();
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

pub use error::{LogError, Result};
pub use logging::{Format, LevelFilter, Registry, RegistrySnapshot, Severity};
