// BootDiff - app/loader.rs
//
// Loads the pass and fail logs. Any failure here is fatal and happens
// before any diff work starts.

use crate::core::model::LogFile;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::InputError;
use std::io;
use std::path::Path;

/// Read a log file fully into memory.
pub fn load_log(path: &Path) -> Result<LogFile, InputError> {
    let content = fs::read_file_lossy(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => InputError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let log = LogFile::from_content(path, &content, fs::modified_time(path));

    let preview: String = log
        .lines
        .first()
        .map(|l| l.chars().take(constants::DEBUG_MAX_LINE_PREVIEW).collect())
        .unwrap_or_default();
    tracing::debug!(
        path = %path.display(),
        lines = log.line_count(),
        first_line = %preview,
        "Log loaded"
    );

    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pass.log");
        std::fs::write(&path, "line one\nline two\n").unwrap();

        let log = load_log(&path).unwrap();
        assert_eq!(log.name, "pass.log");
        assert_eq!(log.lines, vec!["line one", "line two"]);
        assert!(log.modified.is_some());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_log(&dir.path().join("missing.log"));
        assert!(matches!(result, Err(InputError::NotFound { .. })));
        assert!(result.unwrap_err().to_string().contains("cannot read file"));
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_log(dir.path());
        assert!(matches!(result, Err(InputError::Unreadable { .. })));
    }
}
