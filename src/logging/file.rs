//! File sink helpers.
//!
//! Files are opened either appending or truncating, and each record is
//! written with a single `write_all` so a record never splits across calls.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Open `path` for logging, creating missing parent directories
pub fn open_log_file(path: &Path, append: bool) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    if append {
        open_append(path)
    } else {
        open_truncate(path)
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn open_truncate(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

/// Write one record's fragments as a single chunk
pub fn write_fragments<W: Write + ?Sized>(writer: &mut W, fragments: &[String]) -> io::Result<()> {
    writer.write_all(fragments.concat().as_bytes())
}
