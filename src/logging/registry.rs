//! Destination registry
//!
//! Maps aliases and file paths to destinations, applies console and file
//! thresholds, and buffers every record until `init` switches the registry
//! live.
//!
//! # Locking
//!
//! One mutex guards all state. Public methods take it exactly once and call
//! unlocked helpers on the inner state; `init` reuses the unlocked
//! `set_output_file` instead of re-entering the lock. Prefix and value
//! rendering happens before the lock is taken.

use super::destination::{Destination, DestinationSnapshot};
use super::emit::Message;
use super::format::{self, Format};
use super::{file, LevelFilter, PendingRecord, RecordKind, Severity};
use crate::constants::{CONSOLE_ENABLED, DEFAULT_ALIAS, FILE_ENABLED};
use crate::error::{LogError, Result};
use chrono::Local;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::{debug, warn};

/// Lifecycle of the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Records go to per-destination pending buffers
    Buffering,
    /// Records go straight to console and files
    Live,
}

/// Process-wide logger state; share it by reference or `Arc`
pub struct Registry {
    inner: Mutex<Inner>,
    /// Prefix flags, read without the lock while rendering
    format: AtomicU8,
}

struct Inner {
    destinations: Vec<Destination>,
    /// Records logged against an unknown alias while buffering
    unrouted: Vec<PendingRecord>,
    console: Box<dyn Write + Send>,
    console_level: LevelFilter,
    file_level: LevelFilter,
    mode: Mode,
    /// Call order stamped on buffered records
    next_seq: u64,
}

impl Registry {
    /// Registry writing console output to stderr
    pub fn new() -> Self {
        Self::with_console(Box::new(io::stderr()))
    }

    /// Registry writing console output to `console`
    pub fn with_console(console: Box<dyn Write + Send>) -> Self {
        let mut default = Destination::console_only(DEFAULT_ALIAS);
        default.queue_banner(PendingRecord::banner(format::banner(&Local::now())));

        Self {
            inner: Mutex::new(Inner {
                destinations: vec![default],
                unrouted: Vec::new(),
                console,
                console_level: LevelFilter::default(),
                file_level: LevelFilter::default(),
                mode: Mode::Buffering,
                next_seq: 0,
            }),
            format: AtomicU8::new(Format::default().bits()),
        }
    }

    // === Configuration ===

    /// Attach `alias` to the file at `path`
    ///
    /// If another destination already owns `path`, the alias moves there and
    /// no file is opened. Otherwise the alias's destination is reopened on
    /// `path`, or a new destination is created. Every newly opened file gets
    /// the startup banner, never echoed to the console.
    pub fn set_output_file(&self, path: impl AsRef<Path>, alias: &str, append: bool) -> Result<()> {
        self.inner
            .lock()
            .set_output_file(path.as_ref(), alias, append)
    }

    /// Set the global console and file thresholds
    pub fn set_log_level(&self, console: LevelFilter, file: LevelFilter) {
        let mut inner = self.inner.lock();
        inner.console_level = console;
        inner.file_level = file;
    }

    /// Override the file threshold for one alias, returns false if it does not resolve
    pub fn set_log_level_for_file(&self, level: LevelFilter, alias: &str) -> bool {
        self.inner.lock().set_destination_level(alias, Some(level))
    }

    /// Drop a per-alias override so the global file threshold applies again
    pub fn clear_log_level_for_file(&self, alias: &str) -> bool {
        self.inner.lock().set_destination_level(alias, None)
    }

    /// Choose which timestamp parts prefix every later record
    pub fn set_format(&self, format: Format) {
        self.format.store(format.bits(), Ordering::Relaxed);
    }

    /// Prefix flags currently in effect
    pub fn format(&self) -> Format {
        Format::from_bits(self.format.load(Ordering::Relaxed))
    }

    // === Lifecycle ===

    /// Open `default_file` for the default alias, go live, and replay every
    /// buffered record in order
    ///
    /// The registry goes live even if the default file cannot be opened; the
    /// open error is still returned. Calling `init` twice is an error.
    pub fn init(&self, default_file: impl AsRef<Path>, append: bool) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.mode == Mode::Live {
            return Err(LogError::AlreadyInitialized);
        }

        let opened = inner.set_output_file(default_file.as_ref(), DEFAULT_ALIAS, append);
        if let Err(e) = &opened {
            warn!("Default log file unavailable: {}", e);
        }

        inner.mode = Mode::Live;
        let drained = inner.drain();
        opened.and(drained)
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.lock().mode == Mode::Live
    }

    // === Emission ===

    /// Log `values` to the destination named by `alias`
    ///
    /// An alias that resolves nowhere still reaches the console.
    pub fn log(&self, severity: Severity, alias: &str, values: &[&dyn Display]) -> Result<()> {
        if alias.is_empty() {
            return Err(LogError::InvalidArgument { field: "alias" });
        }
        if values.is_empty() {
            return Err(LogError::InvalidArgument { field: "values" });
        }

        let message = Message::render(self.format(), severity, values);

        let mut inner = self.inner.lock();
        let index = inner.search_output(alias);
        inner.dispatch(index, message)
    }

    /// Log `values` to the file at `path`, opening it on first use
    pub fn log_f(
        &self,
        severity: Severity,
        path: impl AsRef<Path>,
        values: &[&dyn Display],
    ) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(LogError::InvalidArgument { field: "path" });
        }
        if values.is_empty() {
            return Err(LogError::InvalidArgument { field: "values" });
        }

        let message = Message::render(self.format(), severity, values);

        let mut inner = self.inner.lock();
        let index = match inner.search_file(path) {
            Some(i) => i,
            None => inner.open_destination(path, None, true)?,
        };
        inner.dispatch(Some(index), message)
    }

    /// Flush the console and every open file
    pub fn flush(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        let mut result = inner.console.flush().map_err(|e| LogError::Write {
            target: "console".to_string(),
            source: e,
        });
        for dest in inner.destinations.iter_mut() {
            if let Err(e) = dest.flush() {
                result = result.and(Err(LogError::Write {
                    target: dest.describe(),
                    source: e,
                }));
            }
        }
        result
    }

    // === Lookup ===

    /// Index of the destination reached by `alias`
    pub fn search_output(&self, alias: &str) -> Option<usize> {
        self.inner.lock().search_output(alias)
    }

    /// Index of the destination writing to exactly `path`
    pub fn search_file(&self, path: impl AsRef<Path>) -> Option<usize> {
        self.inner.lock().search_file(path.as_ref())
    }

    /// Point-in-time copy of the routing table and buffer sizes
    pub fn snapshot(&self) -> RegistrySnapshot {
        let inner = self.inner.lock();
        RegistrySnapshot {
            mode: inner.mode,
            console_level: inner.console_level,
            file_level: inner.file_level,
            destinations: inner.destinations.iter().map(Destination::snapshot).collect(),
            unrouted: inner.unrouted.len(),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn search_output(&self, alias: &str) -> Option<usize> {
        self.destinations.iter().position(|d| d.has_alias(alias))
    }

    fn search_file(&self, path: &Path) -> Option<usize> {
        self.destinations.iter().position(|d| d.path() == Some(path))
    }

    fn set_destination_level(&mut self, alias: &str, level: Option<LevelFilter>) -> bool {
        match self.search_output(alias) {
            Some(i) => {
                self.destinations[i].set_level(level);
                true
            }
            None => false,
        }
    }

    fn set_output_file(&mut self, path: &Path, alias: &str, append: bool) -> Result<()> {
        if alias.is_empty() {
            return Err(LogError::InvalidArgument { field: "alias" });
        }
        if path.as_os_str().is_empty() {
            return Err(LogError::InvalidArgument { field: "path" });
        }

        let by_alias = self.search_output(alias);
        let by_path = self.search_file(path);

        match (by_path, by_alias) {
            (Some(owner), current) if current != Some(owner) => {
                let mut carried = Vec::new();
                for dest in self.destinations.iter_mut() {
                    // A destination without a file would replay to the console only
                    if dest.remove_alias(alias) && dest.path().is_none() {
                        carried.extend(dest.take_messages());
                    }
                }
                if !carried.is_empty() {
                    debug!("Carrying {} buffered records with alias '{}'", carried.len(), alias);
                }
                self.destinations[owner].absorb_messages(carried);
                self.destinations[owner].add_alias(alias);
                debug!("Alias '{}' moved to {}", alias, path.display());
                Ok(())
            }
            (Some(_), _) => Ok(()),
            (None, Some(index)) => {
                let handle = open(path, append)?;
                self.retire_banner(index);
                self.destinations[index].attach_file(path, handle);
                debug!("Alias '{}' reopened on {}", alias, path.display());
                self.write_banner(index)
            }
            (None, None) => self.open_destination(path, Some(alias), append).map(|_| ()),
        }
    }

    /// Open `path` as a new destination and give it its banner
    fn open_destination(&mut self, path: &Path, alias: Option<&str>, append: bool) -> Result<usize> {
        let handle = open(path, append)?;
        self.destinations
            .push(Destination::with_file(path, handle, alias));
        let index = self.destinations.len() - 1;
        debug!("Opened log file {}", path.display());
        self.write_banner(index)?;
        Ok(index)
    }

    /// Banner for a freshly opened file: queued while buffering, file-only when live
    fn write_banner(&mut self, index: usize) -> Result<()> {
        let banner = PendingRecord::banner(format::banner(&Local::now()));
        match self.mode {
            Mode::Buffering => {
                self.destinations[index].queue_banner(banner);
                Ok(())
            }
            Mode::Live => self.route_live(Some(index), &banner),
        }
    }

    /// Write a still-queued banner into the file about to be replaced
    ///
    /// Without this the outgoing file would be created but stay empty.
    fn retire_banner(&mut self, index: usize) {
        if self.mode != Mode::Buffering {
            return;
        }
        let file_level = self.file_level;
        let dest = &mut self.destinations[index];
        if !dest.is_open() {
            return;
        }
        let Some(banner) = dest.take_banner() else {
            return;
        };
        if FILE_ENABLED && dest.effective_level(file_level).allows(banner.severity) {
            if let Err(e) = dest.write(&banner.fragments).and_then(|_| dest.flush()) {
                warn!("Cannot write banner to {}: {}", dest.describe(), e);
            }
        }
    }

    fn dispatch(&mut self, index: Option<usize>, message: Message) -> Result<()> {
        let record =
            PendingRecord::message(message.severity, message.fragments).with_seq(self.next_seq);
        self.next_seq += 1;
        match self.mode {
            Mode::Buffering => {
                match index {
                    Some(i) => self.destinations[i].push_pending(record),
                    None => self.unrouted.push(record),
                }
                Ok(())
            }
            Mode::Live => self.route_live(index, &record),
        }
    }

    /// Write one record to every sink whose threshold it passes
    ///
    /// Both sinks are attempted; the first failure is returned.
    fn route_live(&mut self, index: Option<usize>, record: &PendingRecord) -> Result<()> {
        let mut result = Ok(());
        let file_level = self.file_level;

        let to_console = CONSOLE_ENABLED
            && record.kind == RecordKind::Message
            && self.console_level.allows(record.severity);
        if to_console {
            let written = file::write_fragments(&mut self.console, &record.fragments)
                .and_then(|_| self.console.flush());
            if let Err(e) = written {
                result = Err(LogError::Write {
                    target: "console".to_string(),
                    source: e,
                });
            }
        }

        if let Some(dest) = index
            .filter(|_| FILE_ENABLED)
            .and_then(|i| self.destinations.get_mut(i))
        {
            if dest.effective_level(file_level).allows(record.severity) {
                if let Err(e) = dest.write(&record.fragments) {
                    result = result.and(Err(LogError::Write {
                        target: dest.describe(),
                        source: e,
                    }));
                }
            }
        }

        result
    }

    /// Replay every pending record, destinations in order, records in order
    fn drain(&mut self) -> Result<()> {
        let mut result = Ok(());
        let mut replayed = 0usize;

        for index in 0..self.destinations.len() {
            for record in self.destinations[index].take_pending() {
                result = result.and(self.route_live(Some(index), &record));
                replayed += 1;
            }
        }
        for record in std::mem::take(&mut self.unrouted) {
            result = result.and(self.route_live(None, &record));
            replayed += 1;
        }

        debug!("Replayed {} buffered records", replayed);
        result
    }
}

fn open(path: &Path, append: bool) -> Result<std::fs::File> {
    file::open_log_file(path, append).map_err(|e| {
        warn!("Cannot open log file {}: {}", path.display(), e);
        LogError::FileOpen {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// Serializable view of the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    pub mode: Mode,
    pub console_level: LevelFilter,
    pub file_level: LevelFilter,
    pub destinations: Vec<DestinationSnapshot>,
    pub unrouted: usize,
}

impl RegistrySnapshot {
    pub fn destination_for(&self, alias: &str) -> Option<&DestinationSnapshot> {
        self.destinations
            .iter()
            .find(|d| d.aliases.iter().any(|a| a == alias))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Console that records everything written to it
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn unique_temp_dir(tag: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "mars-log-registry-{}-{}-{}",
            tag,
            std::process::id(),
            ts
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn registry() -> (Registry, Capture) {
        let console = Capture::default();
        let reg = Registry::with_console(Box::new(console.clone()));
        reg.set_format(Format::NONE);
        (reg, console)
    }

    #[test]
    fn test_default_alias_exists_before_init() {
        let (reg, _) = registry();
        assert_eq!(reg.search_output(DEFAULT_ALIAS), Some(0));
        assert!(!reg.is_initialized());

        let snap = reg.snapshot();
        assert_eq!(snap.mode, Mode::Buffering);
        assert_eq!(snap.destinations[0].pending, 1);
        assert!(snap.destinations[0].path.is_none());
    }

    #[test]
    fn test_set_output_file_rejects_empty_arguments() {
        let (reg, _) = registry();
        assert!(matches!(
            reg.set_output_file("a.log", "", true),
            Err(LogError::InvalidArgument { field: "alias" })
        ));
        assert!(matches!(
            reg.set_output_file("", "x", true),
            Err(LogError::InvalidArgument { field: "path" })
        ));
        assert_eq!(reg.snapshot().destinations.len(), 1);
    }

    #[test]
    fn test_unopenable_file_leaves_state_untouched() {
        let dir = unique_temp_dir("unopenable");
        let (reg, _) = registry();

        let err = reg.set_output_file(&dir, "x", true).unwrap_err();
        assert!(matches!(err, LogError::FileOpen { .. }));
        assert_eq!(reg.search_output("x"), None);
        assert_eq!(reg.snapshot().destinations.len(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_shared_path_shares_destination() {
        let dir = unique_temp_dir("shared");
        let path = dir.join("a.txt");
        let (reg, _) = registry();

        reg.set_output_file(&path, "x", true).unwrap();
        reg.set_output_file(&path, "y", true).unwrap();

        assert_eq!(reg.search_output("x"), reg.search_output("y"));
        assert_eq!(reg.search_file(&path), reg.search_output("x"));
        assert_eq!(reg.snapshot().destinations.len(), 2);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_redirect_alias_to_owned_path_moves_it() {
        let dir = unique_temp_dir("redirect");
        let a = dir.join("a.txt");
        let b = dir.join("b.txt");
        let (reg, _) = registry();

        reg.set_output_file(&a, "x", true).unwrap();
        reg.set_output_file(&b, "y", true).unwrap();
        reg.set_output_file(&b, "x", true).unwrap();

        let snap = reg.snapshot();
        let owner_a = &snap.destinations[reg.search_file(&a).unwrap()];
        let owner_b = &snap.destinations[reg.search_file(&b).unwrap()];
        assert!(owner_a.aliases.is_empty());
        assert_eq!(owner_b.aliases, vec!["y", "x"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_reopen_alias_on_new_path() {
        let dir = unique_temp_dir("reopen");
        let a = dir.join("a.txt");
        let b = dir.join("b.txt");
        let (reg, _) = registry();
        reg.init(dir.join("default.txt"), true).unwrap();

        reg.set_output_file(&a, "x", true).unwrap();
        let index = reg.search_output("x");
        reg.set_output_file(&b, "x", true).unwrap();

        assert_eq!(reg.search_output("x"), index);
        assert_eq!(reg.search_file(&a), None);
        assert_eq!(reg.search_file(&b), index);

        reg.log(Severity::Info, "x", &[&"moved"]).unwrap();
        let b_text = fs::read_to_string(&b).unwrap();
        assert!(b_text.contains("Logging Started"));
        assert_eq!(b_text.lines().last(), Some("INFO    : moved"));
        assert!(!fs::read_to_string(&a).unwrap().contains("moved"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failed_reopen_keeps_previous_file() {
        let dir = unique_temp_dir("reopen-fail");
        let a = dir.join("a.txt");
        let (reg, _) = registry();
        reg.set_output_file(&a, "x", true).unwrap();

        let err = reg.set_output_file(&dir, "x", true).unwrap_err();
        assert!(matches!(err, LogError::FileOpen { .. }));
        assert_eq!(reg.search_file(&a), reg.search_output("x"));
        assert_eq!(reg.search_file(&dir), None);

        reg.init(dir.join("log.txt"), true).unwrap();
        reg.log(Severity::Info, "x", &[&"still here"]).unwrap();

        let text = fs::read_to_string(&a).unwrap();
        assert_eq!(text.matches("Logging Started").count(), 1);
        assert_eq!(text.lines().last(), Some("INFO    : still here"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_reopen_before_init_writes_banner_to_old_file() {
        let dir = unique_temp_dir("reopen-buffered");
        let a = dir.join("a.txt");
        let b = dir.join("b.txt");
        let (reg, _) = registry();

        reg.set_output_file(&a, "x", true).unwrap();
        reg.set_output_file(&b, "x", true).unwrap();
        reg.log(Severity::Info, "x", &[&"after"]).unwrap();
        reg.init(dir.join("log.txt"), true).unwrap();

        let a_text = fs::read_to_string(&a).unwrap();
        assert_eq!(a_text.matches("Logging Started").count(), 1);
        assert!(!a_text.contains("after"));

        let b_text = fs::read_to_string(&b).unwrap();
        assert_eq!(b_text.matches("Logging Started").count(), 1);
        assert_eq!(b_text.lines().last(), Some("INFO    : after"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_default_moved_onto_open_file_carries_buffered_records() {
        let dir = unique_temp_dir("default-moved");
        let path = dir.join("log.txt");
        let (reg, console) = registry();

        reg.set_output_file(&path, "net", true).unwrap();
        reg.log(Severity::Info, DEFAULT_ALIAS, &[&"hi"]).unwrap();
        reg.log(Severity::Info, "net", &[&"net-msg"]).unwrap();
        reg.init(&path, true).unwrap();

        assert_eq!(reg.search_output(DEFAULT_ALIAS), reg.search_file(&path));
        let snap = reg.snapshot();
        assert!(snap.destinations[0].aliases.is_empty());

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(text.matches("Logging Started").count(), 1);
        assert_eq!(lines[2..], ["INFO    : hi", "INFO    : net-msg"]);
        assert_eq!(console.text(), "INFO    : hi\nINFO    : net-msg\n");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_buffered_records_replay_on_init() {
        let dir = unique_temp_dir("replay");
        let path = dir.join("log.txt");
        let (reg, console) = registry();

        reg.log(Severity::Info, DEFAULT_ALIAS, &[&"hi"]).unwrap();
        assert!(console.text().is_empty());
        assert!(!path.exists());

        reg.init(&path, true).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "=".repeat(60));
        assert!(lines[1].ends_with("Logging Started"));
        assert_eq!(lines[2], "INFO    : hi");

        assert_eq!(console.text(), "INFO    : hi\n");
        assert_eq!(reg.snapshot().destinations[0].pending, 0);
    }

    #[test]
    fn test_second_init_is_rejected() {
        let dir = unique_temp_dir("twice");
        let (reg, _) = registry();
        reg.init(dir.join("log.txt"), true).unwrap();
        assert!(matches!(
            reg.init(dir.join("other.txt"), true),
            Err(LogError::AlreadyInitialized)
        ));
        assert_eq!(reg.search_file(dir.join("other.txt")), None);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_init_goes_live_even_when_default_file_fails() {
        let dir = unique_temp_dir("initfail");
        let (reg, console) = registry();
        reg.log(Severity::Error, DEFAULT_ALIAS, &[&"early"]).unwrap();

        assert!(matches!(reg.init(&dir, true), Err(LogError::FileOpen { .. })));
        assert!(reg.is_initialized());
        assert_eq!(console.text(), "ERROR   : early\n");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_threshold_gating() {
        let dir = unique_temp_dir("gating");
        let path = dir.join("log.txt");
        let (reg, console) = registry();
        reg.set_log_level(LevelFilter::Warning, LevelFilter::Trace);
        reg.init(&path, false).unwrap();

        reg.log(Severity::Trace, DEFAULT_ALIAS, &[&"quiet"]).unwrap();
        reg.log(Severity::Error, DEFAULT_ALIAS, &[&"loud"]).unwrap();

        assert_eq!(console.text(), "ERROR   : loud\n");
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("TRACE   : quiet"));
        assert!(text.contains("ERROR   : loud"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_per_file_override() {
        let dir = unique_temp_dir("override");
        let quiet = dir.join("quiet.txt");
        let (reg, _) = registry();
        reg.set_log_level(LevelFilter::Off, LevelFilter::Trace);
        reg.set_output_file(&quiet, "quiet", true).unwrap();
        assert!(reg.set_log_level_for_file(LevelFilter::Error, "quiet"));
        assert!(!reg.set_log_level_for_file(LevelFilter::Error, "missing"));
        reg.init(dir.join("log.txt"), true).unwrap();

        reg.log(Severity::Info, "quiet", &[&"dropped"]).unwrap();
        reg.log(Severity::Error, "quiet", &[&"kept"]).unwrap();
        assert!(reg.clear_log_level_for_file("quiet"));
        reg.log(Severity::Trace, "quiet", &[&"again"]).unwrap();

        let text = fs::read_to_string(&quiet).unwrap();
        assert!(!text.contains("dropped"));
        assert!(text.contains("kept"));
        assert!(text.contains("again"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unknown_alias_reaches_console_only() {
        let dir = unique_temp_dir("unknown");
        let (reg, console) = registry();
        reg.log(Severity::Warning, "nobody", &[&"before"]).unwrap();
        assert_eq!(reg.snapshot().unrouted, 1);

        reg.init(dir.join("log.txt"), true).unwrap();
        reg.log(Severity::Warning, "nobody", &[&"after"]).unwrap();

        assert_eq!(console.text(), "WARNING : before\nWARNING : after\n");
        let text = fs::read_to_string(dir.join("log.txt")).unwrap();
        assert!(!text.contains("before"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_log_rejects_empty_values_and_alias() {
        let (reg, _) = registry();
        assert!(matches!(
            reg.log(Severity::Info, DEFAULT_ALIAS, &[]),
            Err(LogError::InvalidArgument { field: "values" })
        ));
        assert!(matches!(
            reg.log(Severity::Info, "", &[&1]),
            Err(LogError::InvalidArgument { field: "alias" })
        ));
        assert_eq!(reg.snapshot().destinations[0].pending, 1);
    }

    #[test]
    fn test_log_f_opens_once() {
        let dir = unique_temp_dir("logf");
        let path = dir.join("foo.txt");
        let (reg, _) = registry();
        reg.init(dir.join("log.txt"), true).unwrap();

        reg.log_f(Severity::Error, &path, &[&"x"]).unwrap();
        reg.log_f(Severity::Error, &path, &[&"x"]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("Logging Started").count(), 1);
        assert_eq!(text.lines().filter(|l| *l == "ERROR   : x").count(), 2);
        let index = reg.search_file(&path).unwrap();
        assert!(reg.snapshot().destinations[index].aliases.is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[cfg(feature = "no-console")]
    #[test]
    fn test_no_console_build_keeps_files() {
        let dir = unique_temp_dir("no-console");
        let path = dir.join("log.txt");
        let (reg, console) = registry();
        reg.init(&path, true).unwrap();

        reg.log(Severity::Error, DEFAULT_ALIAS, &[&"quiet"]).unwrap();

        assert!(console.text().is_empty());
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().last(), Some("ERROR   : quiet"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[cfg(feature = "no-file")]
    #[test]
    fn test_no_file_build_keeps_console() {
        let dir = unique_temp_dir("no-file");
        let path = dir.join("log.txt");
        let (reg, console) = registry();
        reg.init(&path, true).unwrap();

        reg.log(Severity::Error, DEFAULT_ALIAS, &[&"shown"]).unwrap();

        assert_eq!(console.text(), "ERROR   : shown\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_format_applies_to_prefix() {
        let dir = unique_temp_dir("format");
        let (reg, console) = registry();
        reg.set_format(Format::DATE);
        assert_eq!(reg.format(), Format::DATE);
        reg.init(dir.join("log.txt"), true).unwrap();

        reg.log(Severity::Info, DEFAULT_ALIAS, &[&"dated"]).unwrap();
        let expected_date = Local::now().format("%d.%m.%Y").to_string();
        assert!(console.text().starts_with(&expected_date));
        let _ = fs::remove_dir_all(&dir);
    }
}
