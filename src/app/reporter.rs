// BootDiff - app/reporter.rs
//
// Report sink. The orchestration emits typed events; the sink decides how
// they look. The console sink writes human-readable text to any writer
// (stdout in the binary, a Vec<u8> in tests); the recording sink keeps the
// events for assertions.

use crate::core::model::{ComponentCount, Identity, IdentityCheck, IdentityVerdict};
use crate::util::constants;
use std::io::{self, Write};
use std::path::PathBuf;

const RULE: &str = "---------------------------";

/// One observable step of a triage run.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    /// Tool banner, emitted once at the start of a run.
    Banner,
    /// Start of a report section.
    Section(String),
    /// Non-fatal usage message (empty diff, bad window size, ...).
    Notice(String),
    /// Per-candidate counts, in catalog order.
    CountTable(Vec<ComponentCount>),
    /// Deduced component, or `None` when nothing in the catalog occurred.
    Deduction(Option<String>),
    /// Raw diff text (the targeted window).
    DiffText(String),
    /// Outcome of one identity comparison.
    Identity(IdentityCheck),
    /// A report file was written.
    Written { what: &'static str, path: PathBuf },
}

/// Receives report events from the orchestration.
pub trait Reporter {
    fn report(&mut self, event: ReportEvent) -> io::Result<()>;
}

// =============================================================================
// Console
// =============================================================================

/// Renders events as plain text.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_counts(&mut self, counts: &[ComponentCount]) -> io::Result<()> {
        let width = counts.iter().map(|c| c.component.len()).max().unwrap_or(0);
        for c in counts {
            writeln!(self.out, "{:<width$}  counts: {}", c.component, c.count)?;
        }
        Ok(())
    }

    fn write_identity(&mut self, check: &IdentityCheck) -> io::Result<()> {
        let verdict = match check.verdict {
            IdentityVerdict::Identical => "identical".to_string(),
            IdentityVerdict::Mismatch => {
                "MISMATCH - logs are not comparable; wrong component, reject the report"
                    .to_string()
            }
            IdentityVerdict::Inconclusive => {
                let side = match (&check.pass, &check.fail) {
                    (Identity::NotFound, Identity::NotFound) => "either log",
                    (Identity::NotFound, _) => "pass log",
                    _ => "fail log",
                };
                format!("not found in {side} (inconclusive)")
            }
        };
        writeln!(
            self.out,
            "{} ('{}'): {verdict}",
            check.kind.label(),
            check.marker
        )?;
        writeln!(self.out, "  pass: {}", check.pass.value().unwrap_or("<not found>"))?;
        writeln!(self.out, "  fail: {}", check.fail.value().unwrap_or("<not found>"))?;
        Ok(())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, event: ReportEvent) -> io::Result<()> {
        match event {
            ReportEvent::Banner => {
                let title = format!(
                    "{} v{} - log analyzer diff tool",
                    constants::APP_NAME,
                    constants::APP_VERSION
                );
                let bar = "=".repeat(title.len());
                writeln!(self.out, "{bar}\n{title}\n{bar}")?;
            }
            ReportEvent::Section(title) => {
                writeln!(self.out, "{RULE}\n{title}\n{RULE}")?;
            }
            ReportEvent::Notice(msg) => writeln!(self.out, "{msg}")?,
            ReportEvent::CountTable(counts) => self.write_counts(&counts)?,
            ReportEvent::Deduction(Some(component)) => {
                writeln!(self.out, "\nDeduced issue component: {component}")?;
            }
            ReportEvent::Deduction(None) => {
                writeln!(self.out, "\nUnable to deduce any issue in the list")?;
            }
            ReportEvent::DiffText(text) => write!(self.out, "{text}")?,
            ReportEvent::Identity(check) => self.write_identity(&check)?,
            ReportEvent::Written { what, path } => {
                writeln!(self.out, "{what} written to {}", path.display())?;
            }
        }
        self.out.flush()
    }
}

// =============================================================================
// Recording
// =============================================================================

/// Keeps every event in order. Used by tests and by callers embedding the
/// library that want structured output.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices, in order.
    pub fn notices(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Notice(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All deductions, in order.
    pub fn deductions(&self) -> Vec<Option<&str>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Deduction(c) => Some(c.as_deref()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: ReportEvent) -> io::Result<()> {
        self.events.push(event);
        Ok(())
    }
}
