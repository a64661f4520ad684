//! Configuration management
//!
//! Declarative logger setup loaded from a TOML file. Applying a config goes
//! through the same calls a program would make by hand; `init` stays explicit.

use crate::constants::DEFAULT_LOG_FILE;
use crate::error::{LogError, Result};
use crate::logging::{Format, LevelFilter, Registry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// =============================================================================
// Logger Configuration
// =============================================================================

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    pub levels: LevelsConfig,
    pub format: FormatConfig,
    pub init: InitConfig,
    /// Extra alias → file bindings, applied in order
    pub outputs: Vec<OutputConfig>,
}

/// Global thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelsConfig {
    /// Console threshold ("off" suppresses the console)
    pub console: LevelFilter,
    /// File threshold used when an output has no override
    pub file: LevelFilter,
}

/// Prefix fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub date: bool,
    pub time: bool,
}

/// Arguments for `init`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitConfig {
    /// File attached to the default alias
    pub default_file: PathBuf,
    /// Append to an existing file instead of truncating it
    pub append: bool,
}

/// One alias bound to a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub alias: String,
    pub path: PathBuf,
    #[serde(default = "default_append")]
    pub append: bool,
    /// Per-file override of `levels.file`
    #[serde(default)]
    pub level: Option<LevelFilter>,
}

fn default_append() -> bool {
    true
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            console: LevelFilter::default(),
            file: LevelFilter::default(),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            date: true,
            time: true,
        }
    }
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            default_file: PathBuf::from(DEFAULT_LOG_FILE),
            append: true,
        }
    }
}

impl FormatConfig {
    pub fn to_format(&self) -> Format {
        Format::from_flags(self.date, self.time)
    }
}

impl LogConfig {
    /// Apply levels, format and outputs to `registry`
    ///
    /// Every output is attempted; the first failure is returned.
    pub fn apply(&self, registry: &Registry) -> Result<()> {
        registry.set_log_level(self.levels.console, self.levels.file);
        registry.set_format(self.format.to_format());

        let mut result = Ok(());
        for output in &self.outputs {
            match registry.set_output_file(&output.path, &output.alias, output.append) {
                Ok(()) => {
                    if let Some(level) = output.level {
                        registry.set_log_level_for_file(level, &output.alias);
                    }
                    debug!("Configured output '{}' -> {}", output.alias, output.path.display());
                }
                Err(e) => {
                    warn!("Skipping output '{}': {}", output.alias, e);
                    result = result.and(Err(e));
                }
            }
        }
        result
    }

    /// Apply the config, then `init` with its default file
    pub fn apply_and_init(&self, registry: &Registry) -> Result<()> {
        let applied = self.apply(registry);
        let initialized = registry.init(&self.init.default_file, self.init.append);
        applied.and(initialized)
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Parse config text; `origin` only labels errors
pub fn parse(content: &str, origin: &Path) -> Result<LogConfig> {
    toml::from_str(content).map_err(|e| LogError::ConfigParse {
        path: origin.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load config from a TOML file
pub fn load(path: &Path) -> Result<LogConfig> {
    let content = fs::read_to_string(path).map_err(|e| LogError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content, path)
}

/// Load config, falling back to defaults when the file is missing or invalid
pub fn load_or_default(path: &Path) -> LogConfig {
    match load(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            LogConfig::default()
        }
    }
}

/// Serialize a config back to TOML
pub fn to_toml(config: &LogConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| LogError::ConfigParse {
        path: PathBuf::from("<memory>"),
        reason: e.to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
