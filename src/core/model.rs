// BootDiff - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Log file (input)
// =============================================================================

/// One of the two logs being compared, loaded whole into memory.
///
/// Lines are stored without their terminators so that a `\r\n` log and a
/// `\n` log of the same run compare equal.
#[derive(Debug, Clone)]
pub struct LogFile {
    /// Path the file was loaded from.
    pub path: PathBuf,

    /// Display name (file name only) used in diff headers.
    pub name: String,

    /// File content split into lines.
    pub lines: Vec<String>,

    /// Last modification time, shown in the HTML report header.
    pub modified: Option<DateTime<Local>>,
}

impl LogFile {
    /// Build a `LogFile` from already-read text.
    pub fn from_content(path: &Path, content: &str, modified: Option<DateTime<Local>>) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            path: path.to_path_buf(),
            name,
            lines: content.lines().map(str::to_owned).collect(),
            modified,
        }
    }

    /// Number of lines in the file.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

// =============================================================================
// Deduction
// =============================================================================

/// Occurrence count for one catalog candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentCount {
    pub component: String,
    pub count: usize,
}

/// Outcome of attributing a diff to a component.
///
/// `counts` is in catalog order and always covers every candidate.
/// `component` is `None` when no candidate occurred at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeductionResult {
    pub counts: Vec<ComponentCount>,
    pub component: Option<String>,
}

// =============================================================================
// Identity
// =============================================================================

/// Result of scanning one log for an identity marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "line", rename_all = "snake_case")]
pub enum Identity {
    /// First line containing the marker, verbatim.
    Found(String),
    /// No line contains the marker.
    NotFound,
}

impl Identity {
    /// The matched line, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Identity::Found(line) => Some(line),
            Identity::NotFound => None,
        }
    }
}

/// Comparison of one identity between the pass and fail logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityVerdict {
    /// Both logs carry the same identity line.
    Identical,
    /// Both logs carry an identity line and they differ.
    Mismatch,
    /// At least one log has no identity line; nothing can be concluded.
    Inconclusive,
}

impl IdentityVerdict {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            IdentityVerdict::Identical => "identical",
            IdentityVerdict::Mismatch => "mismatch",
            IdentityVerdict::Inconclusive => "not found",
        }
    }
}

impl std::fmt::Display for IdentityVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which identity a check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    /// Firmware build identity (e.g. "BIOS ID").
    Build,
    /// Board/hardware identity (e.g. "Board ID").
    Board,
}

impl IdentityKind {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            IdentityKind::Build => "Build identity",
            IdentityKind::Board => "Board identity",
        }
    }
}

/// Full record of one identity comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityCheck {
    pub kind: IdentityKind,
    pub marker: String,
    pub pass: Identity,
    pub fail: Identity,
    pub verdict: IdentityVerdict,
}

// =============================================================================
// Run summary
// =============================================================================

/// Everything a plain-mode run concluded, for JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct TriageSummary {
    pub pass_file: String,
    pub fail_file: String,
    pub catalog_id: String,
    /// Lines in the rendered unified diff, headers included.
    pub diff_lines: usize,
    /// Lines only in the fail log.
    pub added_lines: usize,
    /// Lines only in the pass log.
    pub removed_lines: usize,
    pub window_lines: usize,
    /// `None` when the whole diff was empty.
    pub whole: Option<DeductionResult>,
    /// `None` when the window could not be produced or was empty.
    pub windowed: Option<DeductionResult>,
    pub identities: Vec<IdentityCheck>,
    pub generated_at: DateTime<Local>,
}
