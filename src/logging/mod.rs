//! Multi-destination logging
//!
//! Centralizes all log-related types and utilities:
//! - `Severity`, `LevelFilter` - Record urgency and sink thresholds
//! - `Registry` - Alias/path routing with pre-init buffering
//! - `format` / `emit` - Prefix rendering and the fragment pipeline

pub mod destination;
pub mod emit;
pub mod entry;
pub mod file;
pub mod filter;
pub mod format;
pub mod registry;

pub use destination::DestinationSnapshot;
pub use emit::Message;
pub use entry::{PendingRecord, RecordKind, Severity};
pub use filter::LevelFilter;
pub use format::Format;
pub use registry::{Mode, Registry, RegistrySnapshot};

/// Initialize internal tracing for the logger's own diagnostics
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}
