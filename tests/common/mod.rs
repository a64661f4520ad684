//! Shared helpers for integration tests

#![allow(dead_code)]

use mars_log::{Format, Registry};
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Console that records everything written to it
#[derive(Clone, Default)]
pub struct CaptureConsole(Arc<Mutex<Vec<u8>>>);

impl CaptureConsole {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for CaptureConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Temp directory removed on drop
pub struct TempDir {
    pub path: PathBuf,
}

impl TempDir {
    pub fn new(tag: &str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "mars-log-it-{}-{}-{}-{}",
            tag,
            std::process::id(),
            ts,
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Registry with a captured console and label-only prefixes
pub fn registry() -> (Registry, CaptureConsole) {
    let console = CaptureConsole::default();
    let reg = Registry::with_console(Box::new(console.clone()));
    reg.set_format(Format::NONE);
    (reg, console)
}

/// File lines after the two banner lines
pub fn body_lines(path: &std::path::Path) -> Vec<String> {
    let text = fs::read_to_string(path).unwrap();
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    assert!(lines.len() >= 2, "missing banner in {}", path.display());
    assert!(lines[1].ends_with("Logging Started"));
    lines[2..].to_vec()
}
