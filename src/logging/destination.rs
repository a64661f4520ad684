//! A single output destination: one physical file plus the aliases that reach it.

use super::{file, LevelFilter, PendingRecord};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Named sink owned by the registry for the process lifetime
#[derive(Debug)]
pub struct Destination {
    aliases: Vec<String>,
    path: Option<PathBuf>,
    file: Option<File>,
    /// Per-destination override of the global file threshold
    level: Option<LevelFilter>,
    pending: Vec<PendingRecord>,
}

impl Destination {
    /// Destination without a file yet (the default alias at startup)
    pub fn console_only(alias: &str) -> Self {
        Self {
            aliases: vec![alias.to_string()],
            path: None,
            file: None,
            level: None,
            pending: Vec::new(),
        }
    }

    /// Destination around an already opened file
    pub fn with_file(path: &Path, handle: File, alias: Option<&str>) -> Self {
        Self {
            aliases: alias.map(|a| vec![a.to_string()]).unwrap_or_default(),
            path: Some(path.to_path_buf()),
            file: Some(handle),
            level: None,
            pending: Vec::new(),
        }
    }

    // === Aliases ===

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }

    pub fn add_alias(&mut self, alias: &str) {
        if !self.has_alias(alias) {
            self.aliases.push(alias.to_string());
        }
    }

    /// Remove every occurrence of `alias`, returns whether one was present
    pub fn remove_alias(&mut self, alias: &str) -> bool {
        let before = self.aliases.len();
        self.aliases.retain(|a| a != alias);
        self.aliases.len() != before
    }

    // === File ===

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Point the destination at a new file; the previous handle is closed first
    pub fn attach_file(&mut self, path: &Path, handle: File) {
        self.file = None;
        self.path = Some(path.to_path_buf());
        self.file = Some(handle);
    }

    /// Write a record to the file, a no-op when no file is open
    pub fn write(&mut self, fragments: &[String]) -> io::Result<()> {
        match self.file.as_mut() {
            Some(f) => file::write_fragments(f, fragments),
            None => Ok(()),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(f) => io::Write::flush(f),
            None => Ok(()),
        }
    }

    /// Human-readable target for error messages
    pub fn describe(&self) -> String {
        match (&self.path, self.aliases.first()) {
            (Some(p), _) => p.display().to_string(),
            (None, Some(a)) => format!("alias '{}'", a),
            (None, None) => "unnamed destination".to_string(),
        }
    }

    // === Thresholds ===

    pub fn level(&self) -> Option<LevelFilter> {
        self.level
    }

    pub fn set_level(&mut self, level: Option<LevelFilter>) {
        self.level = level;
    }

    /// Override if set, global file threshold otherwise
    pub fn effective_level(&self, global: LevelFilter) -> LevelFilter {
        self.level.unwrap_or(global)
    }

    // === Pending buffer ===

    pub fn push_pending(&mut self, record: PendingRecord) {
        self.pending.push(record);
    }

    /// Queue the banner in front of everything else, once
    pub fn queue_banner(&mut self, record: PendingRecord) -> bool {
        if self.pending.iter().any(PendingRecord::is_banner) {
            return false;
        }
        self.pending.insert(0, record);
        true
    }

    /// Remove the queued banner, if any
    pub fn take_banner(&mut self) -> Option<PendingRecord> {
        let index = self.pending.iter().position(PendingRecord::is_banner)?;
        Some(self.pending.remove(index))
    }

    /// Hand over the queued messages, keeping the banner in place
    pub fn take_messages(&mut self) -> Vec<PendingRecord> {
        let (banners, messages) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(PendingRecord::is_banner);
        self.pending = banners;
        messages
    }

    /// Merge records from another destination, keeping call order
    pub fn absorb_messages(&mut self, records: Vec<PendingRecord>) {
        if records.is_empty() {
            return;
        }
        let banner = self.take_banner();
        self.pending.extend(records);
        self.pending.sort_by_key(|r| r.seq);
        if let Some(banner) = banner {
            self.pending.insert(0, banner);
        }
    }

    pub fn pending(&self) -> &[PendingRecord] {
        &self.pending
    }

    /// Hand over every pending record, leaving the buffer empty
    pub fn take_pending(&mut self) -> Vec<PendingRecord> {
        std::mem::take(&mut self.pending)
    }

    pub fn snapshot(&self) -> DestinationSnapshot {
        DestinationSnapshot {
            aliases: self.aliases.clone(),
            path: self.path.clone(),
            open: self.is_open(),
            level: self.level,
            pending: self.pending.len(),
        }
    }
}

/// Serializable view of a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationSnapshot {
    pub aliases: Vec<String>,
    pub path: Option<PathBuf>,
    pub open: bool,
    pub level: Option<LevelFilter>,
    pub pending: usize,
}
