// BootDiff - app/triage.rs
//
// Orchestrates one run: load both logs, then either write the HTML
// side-by-side report, or diff, deduce over the whole diff, window the
// tail, deduce again over the window, and compare identities.
//
// Usage errors from windowing and deduction are reported as notices and
// the run continues; only input/export failures abort.

use crate::app::loader;
use crate::app::reporter::{ReportEvent, Reporter};
use crate::core::catalog::{CatalogProfile, ComponentCatalog};
use crate::core::deduce;
use crate::core::differ::{self, DiffHeaders, DiffOptions};
use crate::core::export;
use crate::core::html::{self, HtmlOptions};
use crate::core::identity;
use crate::core::model::{DeductionResult, TriageSummary};
use crate::core::window;
use crate::platform::fs;
use crate::util::error::{BootDiffError, ExportError, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

/// Where the report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain-text report on the reporter.
    Console,
    /// HTML side-by-side diff written to a file.
    Html(PathBuf),
}

/// Everything a run needs, already resolved from CLI + config.
#[derive(Debug, Clone)]
pub struct TriageRequest {
    pub pass_path: PathBuf,
    pub fail_path: PathBuf,
    pub mode: OutputMode,
    /// Trailing diff lines for the targeted report.
    pub window_lines: usize,
    /// Unified diff context lines.
    pub context_lines: usize,
    /// HTML report context lines; `None` shows the full files.
    pub html_context_lines: Option<usize>,
    pub catalog: CatalogProfile,
    /// Optional JSON summary (console mode only).
    pub json_path: Option<PathBuf>,
}

/// What a run produced.
#[derive(Debug)]
pub enum TriageOutcome {
    Console(TriageSummary),
    Html(PathBuf),
}

fn emit(reporter: &mut dyn Reporter, event: ReportEvent) -> Result<()> {
    reporter.report(event).map_err(|e| BootDiffError::Io {
        path: PathBuf::from("<report>"),
        operation: "report output",
        source: e,
    })
}

/// Run a full triage.
pub fn run(request: &TriageRequest, reporter: &mut dyn Reporter) -> Result<TriageOutcome> {
    emit(reporter, ReportEvent::Banner)?;

    let pass = loader::load_log(&request.pass_path)?;
    let fail = loader::load_log(&request.fail_path)?;

    tracing::info!(
        pass = %pass.name,
        fail = %fail.name,
        pass_lines = pass.line_count(),
        fail_lines = fail.line_count(),
        "Logs loaded"
    );

    match request.mode {
        OutputMode::Html(ref path) => {
            let options = HtmlOptions {
                context: request.html_context_lines.is_some(),
                context_lines: request.html_context_lines.unwrap_or(0),
                generated_at: Local::now(),
            };
            let document = html::render_side_by_side(&pass, &fail, &options);
            fs::write_file(path, &document).map_err(|e| ExportError::Io {
                path: path.clone(),
                source: e,
            })?;
            emit(
                reporter,
                ReportEvent::Written {
                    what: "HTML report",
                    path: path.clone(),
                },
            )?;
            Ok(TriageOutcome::Html(path.clone()))
        }
        OutputMode::Console => {
            let options = DiffOptions {
                context_lines: request.context_lines,
                headers: Some(DiffHeaders::labels(&pass.name, &fail.name)),
            };
            let diff = differ::unified_diff(&pass.lines, &fail.lines, &options);
            let diff_text = diff.text;
            let diff_lines = window::line_count(&diff_text);
            let catalog = &request.catalog.catalog;

            emit(reporter, ReportEvent::Section("Whole log diff report".into()))?;
            let whole = deduce_step(&diff_text, catalog, reporter)?;

            emit(reporter, ReportEvent::Section("Targeted log diff report".into()))?;
            let windowed_text = match window::window(request.window_lines, &diff_text) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(error = %e, "Window not produced");
                    emit(reporter, ReportEvent::Notice(e.to_string()))?;
                    String::new()
                }
            };
            if !windowed_text.is_empty() {
                emit(reporter, ReportEvent::DiffText(windowed_text.clone()))?;
            }
            let windowed = deduce_step(&windowed_text, catalog, reporter)?;

            emit(reporter, ReportEvent::Section("Identity check".into()))?;
            let identities = identity::check_all(&request.catalog.markers, &pass, &fail);
            for check in &identities {
                emit(reporter, ReportEvent::Identity(check.clone()))?;
            }

            let summary = TriageSummary {
                pass_file: pass.name.clone(),
                fail_file: fail.name.clone(),
                catalog_id: catalog.id.clone(),
                diff_lines,
                added_lines: diff.added,
                removed_lines: diff.removed,
                window_lines: request.window_lines,
                whole,
                windowed,
                identities,
                generated_at: Local::now(),
            };

            if let Some(ref path) = request.json_path {
                write_summary(&summary, path)?;
                emit(
                    reporter,
                    ReportEvent::Written {
                        what: "JSON summary",
                        path: path.clone(),
                    },
                )?;
            }

            tracing::info!(
                diff_lines,
                added = summary.added_lines,
                removed = summary.removed_lines,
                whole = deduced_name(&summary.whole),
                windowed = deduced_name(&summary.windowed),
                "Triage complete"
            );

            Ok(TriageOutcome::Console(summary))
        }
    }
}

/// Deduce over `text` and report the table and verdict, or a notice.
fn deduce_step(
    text: &str,
    catalog: &ComponentCatalog,
    reporter: &mut dyn Reporter,
) -> Result<Option<DeductionResult>> {
    match deduce::deduce(text, catalog) {
        Ok(result) => {
            emit(reporter, ReportEvent::CountTable(result.counts.clone()))?;
            emit(reporter, ReportEvent::Deduction(result.component.clone()))?;
            Ok(Some(result))
        }
        Err(e) => {
            emit(reporter, ReportEvent::Notice(e.to_string()))?;
            Ok(None)
        }
    }
}

fn deduced_name(result: &Option<DeductionResult>) -> &str {
    result
        .as_ref()
        .and_then(|d| d.component.as_deref())
        .unwrap_or("<none>")
}

fn write_summary(summary: &TriageSummary, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    export::export_json(summary, std::io::BufWriter::new(file), path)?;
    Ok(())
}
