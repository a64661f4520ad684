//! Library-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Compile-time switches
// =============================================================================

/// False when built with the `disable` feature; logging macros become no-ops
pub const LOGGING_ENABLED: bool = !cfg!(feature = "disable");

/// False when built with `no-console`; nothing reaches the console
pub const CONSOLE_ENABLED: bool = !cfg!(feature = "no-console");

/// False when built with `no-file`; nothing reaches any file
pub const FILE_ENABLED: bool = !cfg!(feature = "no-file");

// =============================================================================
// Routing
// =============================================================================

/// Alias of the destination that exists from registry construction on
pub const DEFAULT_ALIAS: &str = "default";

/// Default file used by `init` when the caller has no preference
pub const DEFAULT_LOG_FILE: &str = "log.txt";

// =============================================================================
// Banner
// =============================================================================

/// Width of the separator line written before "Logging Started"
pub const BANNER_WIDTH: usize = 60;

/// Character repeated to build the separator line
pub const BANNER_SEPARATOR: char = '=';

/// Text following the timestamp on the banner's second line
pub const BANNER_TEXT: &str = "Logging Started";

// =============================================================================
// Prefix
// =============================================================================

/// Timestamp layout when both date and time are enabled
pub const DATE_TIME_FORMAT: &str = "%d.%m.%Y-%H:%M:%S";

/// Timestamp layout for date only
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Timestamp layout for time only
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Separator between prefix fields
pub const FIELD_SEPARATOR: &str = " : ";
