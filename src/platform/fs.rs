// BootDiff - platform/fs.rs
//
// Filesystem helpers. Every input file is read whole and closed before
// returning; nothing here keeps a handle open.

use chrono::{DateTime, Local};
use std::io;
use std::path::Path;

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion. Debug logs from
/// firmware frequently carry stray bytes from a noisy serial line.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes).into_owned();
    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        "File read"
    );
    Ok(content)
}

/// Last modification time of `path` in local time, if the platform reports one.
pub fn modified_time(path: &Path) -> Option<DateTime<Local>> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Local>::from)
        .ok()
}

/// Size of `path` in bytes.
pub fn file_size(path: &Path) -> io::Result<u64> {
    std::fs::metadata(path).map(|m| m.len())
}

/// Write `content` to `path`, replacing any existing file.
pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    std::fs::write(path, content)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "File written");
    Ok(())
}
