//! mars-log - drive the multi-destination logger from the command line
//!
//! Usage:
//!   mars-log hello world                      Log to the default alias and log.txt
//!   mars-log --output net=net.log --alias net rx ok
//!   mars-log --config log.toml --dump msg     Apply a config, print the registry state

mod cli;

use clap::Parser;
use cli::Cli;
use mars_log::config::{self, LogConfig, OutputConfig};
use mars_log::{logging, Registry, Result};
use std::fmt::Display;
use std::process::ExitCode;
use tracing::{debug, warn};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mars-log: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    debug!("Effective config: {:?}", config);

    let registry = Registry::new();
    config.apply(&registry)?;

    // Words are separate fragments joined by single spaces
    let words: Vec<&dyn Display> = cli
        .message
        .iter()
        .enumerate()
        .flat_map(|(i, word)| {
            let sep: Option<&dyn Display> = if i > 0 { Some(&" ") } else { None };
            sep.into_iter().chain(std::iter::once(word as &dyn Display))
        })
        .collect();

    // Logged once while buffering and once live, so both paths show up
    if !words.is_empty() {
        registry.log(cli.severity, &cli.alias, &words)?;
    }
    registry.init(&config.init.default_file, config.init.append)?;
    if !words.is_empty() {
        registry.log(cli.severity, &cli.alias, &words)?;
    }
    registry.flush()?;

    if cli.dump {
        match serde_json::to_string_pretty(&registry.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!("Cannot serialize registry snapshot: {}", e),
        }
    }

    Ok(())
}

/// Config file (if any) with command-line overrides on top
fn build_config(cli: &Cli) -> Result<LogConfig> {
    let mut config = match &cli.config {
        Some(path) => config::load(path)?,
        None => LogConfig::default(),
    };

    if let Some(level) = cli.console_level {
        config.levels.console = level;
    }
    if let Some(level) = cli.file_level {
        config.levels.file = level;
    }
    if let Some(path) = &cli.default_file {
        config.init.default_file = path.clone();
    }
    if cli.truncate {
        config.init.append = false;
    }
    for (alias, path) in &cli.outputs {
        config.outputs.push(OutputConfig {
            alias: alias.clone(),
            path: path.clone(),
            append: !cli.truncate,
            level: None,
        });
    }

    Ok(config)
}
