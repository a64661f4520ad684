//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use clap::Parser;
use mars_log::{LevelFilter, Severity};
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Route messages through the multi-destination logger
#[derive(Parser, Debug)]
#[command(name = "mars-log")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output for the logger itself
    #[arg(short, long)]
    pub verbose: bool,

    /// TOML config applied before anything else
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File attached to the default alias on init (overrides config)
    #[arg(long, value_name = "FILE")]
    pub default_file: Option<PathBuf>,

    /// Truncate files instead of appending
    #[arg(long)]
    pub truncate: bool,

    /// Console threshold: off, error, warning, info, trace
    #[arg(long, value_name = "LEVEL")]
    pub console_level: Option<LevelFilter>,

    /// File threshold: off, error, warning, info, trace
    #[arg(long, value_name = "LEVEL")]
    pub file_level: Option<LevelFilter>,

    /// Extra output as ALIAS=PATH (repeatable)
    #[arg(long = "output", value_name = "ALIAS=PATH", value_parser = parse_output)]
    pub outputs: Vec<(String, PathBuf)>,

    /// Alias the messages are logged to
    #[arg(long, default_value = mars_log::constants::DEFAULT_ALIAS)]
    pub alias: String,

    /// Severity of the messages
    #[arg(long, default_value = "info")]
    pub severity: Severity,

    /// Print the registry state as JSON when done
    #[arg(long)]
    pub dump: bool,

    /// Message fragments, logged as one record
    pub message: Vec<String>,
}

fn parse_output(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((alias, path)) if !alias.is_empty() && !path.is_empty() => {
            Ok((alias.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected ALIAS=PATH, got '{}'", s)),
    }
}

// =============================================================================
// Tests
// =============================================================================
