// BootDiff - core/differ.rs
//
// Unified diff of two line sequences, built and rendered by the `similar`
// crate (Myers). This module only feeds it terminator-free lines, picks the
// file banner, and tallies added/removed lines for the run summary.
// Core layer: pure logic, no I/O.

use crate::util::constants;
use similar::{Algorithm, ChangeTag, TextDiff};

/// File banner written above the first hunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffHeaders {
    pub old_label: String,
    pub new_label: String,
    /// Appended after a tab when non-empty.
    pub old_timestamp: String,
    pub new_timestamp: String,
}

impl DiffHeaders {
    /// Headers carrying only the two labels, with empty timestamp fields.
    pub fn labels(old_label: &str, new_label: &str) -> Self {
        Self {
            old_label: old_label.to_string(),
            new_label: new_label.to_string(),
            ..Default::default()
        }
    }

    fn banner(label: &str, timestamp: &str) -> String {
        if timestamp.is_empty() {
            label.to_string()
        } else {
            format!("{label}\t{timestamp}")
        }
    }
}

/// Options controlling unified diff construction.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Unchanged lines kept around each change. Capped at
    /// `MAX_CONTEXT_LINES`.
    pub context_lines: usize,
    /// `None` suppresses the `---`/`+++` banner entirely.
    pub headers: Option<DiffHeaders>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            context_lines: constants::DEFAULT_CONTEXT_LINES,
            headers: None,
        }
    }
}

/// A rendered unified diff plus its line tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineDiff {
    /// Unified diff text; empty when the inputs are identical.
    pub text: String,
    /// Lines only in the new (fail) input.
    pub added: usize,
    /// Lines only in the old (pass) input.
    pub removed: usize,
}

impl LineDiff {
    /// True if the two inputs were identical line-for-line.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Diff `old` against `new` and render the result as unified diff text.
pub fn unified_diff(old: &[String], new: &[String], options: &DiffOptions) -> LineDiff {
    let old_lines: Vec<&str> = old.iter().map(String::as_str).collect();
    let new_lines: Vec<&str> = new.iter().map(String::as_str).collect();

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(&old_lines, &new_lines);

    let (mut added, mut removed) = (0usize, 0usize);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => removed += 1,
            ChangeTag::Equal => {}
        }
    }

    // similar doubles the radius when grouping hunks
    let context = options.context_lines.min(constants::MAX_CONTEXT_LINES);

    let mut udiff = diff.unified_diff();
    udiff.context_radius(context);
    if let Some(ref h) = options.headers {
        udiff.header(
            &DiffHeaders::banner(&h.old_label, &h.old_timestamp),
            &DiffHeaders::banner(&h.new_label, &h.new_timestamp),
        );
    }
    let text = udiff.to_string();

    tracing::debug!(
        old_lines = old.len(),
        new_lines = new.len(),
        added,
        removed,
        context,
        "Unified diff computed"
    );

    LineDiff {
        text,
        added,
        removed,
    }
}

/// Convenience: diff and keep only the rendered text.
pub fn unified_diff_text(old: &[String], new: &[String], options: &DiffOptions) -> String {
    unified_diff(old, new, options).text
}
