// BootDiff - core/export.rs
//
// JSON export of a triage run summary.
// Core layer: writes to any Write trait object.

use crate::core::model::TriageSummary;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export the run summary as a pretty-printed JSON object.
///
/// `export_path` is used for error messages only.
pub fn export_json<W: Write>(
    summary: &TriageSummary,
    mut writer: W,
    export_path: &Path,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, summary).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writeln!(writer)
        .and_then(|_| writer.flush())
        .map_err(|e| ExportError::Io {
            path: export_path.to_path_buf(),
            source: e,
        })
}
