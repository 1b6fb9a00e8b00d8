// BootDiff - tests/e2e_triage.rs
//
// End-to-end tests for the triage pipeline.
//
// These tests write real log files to a temporary directory and drive
// either the library orchestration (with a recording reporter) or the
// compiled binary. Nothing is mocked: real file reads, the real diff, the
// built-in catalog, and real HTML/JSON writes.

use bootdiff::app::catalog_mgr::{self, CatalogOverrides};
use bootdiff::app::reporter::{ReportEvent, RecordingReporter};
use bootdiff::app::triage::{self, OutputMode, TriageOutcome, TriageRequest};
use bootdiff::core::catalog;
use bootdiff::core::model::IdentityVerdict;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

const PASS_LOG: &str = "\
BIOS ID: X1234.86B.0042
Board ID: RVP-01
Init COM port
PCI enumeration start
PCI enumeration done
USB init
Loading shell
Boot complete
";

const FAIL_LOG: &str = "\
BIOS ID: X1234.86B.0042
Board ID: RVP-01
Init COM port
PCI enumeration start
PCI enumeration done
USB init
USB port reset failed
USB hub timeout
XHCI controller halted
";

fn write_log(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn console_request(pass: &Path, fail: &Path, window_lines: usize) -> TriageRequest {
    TriageRequest {
        pass_path: pass.to_path_buf(),
        fail_path: fail.to_path_buf(),
        mode: OutputMode::Console,
        window_lines,
        context_lines: 3,
        html_context_lines: Some(5),
        catalog: catalog::load_builtin_catalog().unwrap(),
        json_path: None,
    }
}

/// Run the compiled binary with an empty config so the host's own
/// config.toml never leaks into a test.
fn run_binary(dir: &TempDir, args: &[&str]) -> std::process::Output {
    let config = dir.path().join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    Command::new(env!("CARGO_BIN_EXE_bootdiff"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

// =============================================================================
// Library pipeline
// =============================================================================

/// The failing tail is USB-heavy, so both whole and targeted reports name usb.
#[test]
fn e2e_usb_failure_is_deduced() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail = write_log(&dir, "fail.log", FAIL_LOG);

    let mut rec = RecordingReporter::new();
    let outcome = triage::run(&console_request(&pass, &fail, 5), &mut rec).unwrap();

    let summary = match outcome {
        TriageOutcome::Console(s) => s,
        other => panic!("expected console outcome, got {other:?}"),
    };

    assert_eq!(summary.pass_file, "pass.log");
    assert_eq!(summary.fail_file, "fail.log");
    assert!(summary.diff_lines > 0);
    assert_eq!(summary.added_lines, 3);
    assert_eq!(summary.removed_lines, 2);

    let whole = summary.whole.expect("whole-diff deduction");
    assert_eq!(whole.component.as_deref(), Some("usb"));
    assert_eq!(whole.counts.len(), 9, "one count per built-in component");

    let windowed = summary.windowed.expect("windowed deduction");
    assert_eq!(windowed.component.as_deref(), Some("usb"));

    assert_eq!(rec.deductions(), [Some("usb"), Some("usb")]);
    assert!(rec.notices().is_empty(), "unexpected notices: {:?}", rec.notices());
}

/// The targeted section prints exactly the requested number of diff lines.
#[test]
fn e2e_window_text_has_requested_lines() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail = write_log(&dir, "fail.log", FAIL_LOG);

    let mut rec = RecordingReporter::new();
    triage::run(&console_request(&pass, &fail, 3), &mut rec).unwrap();

    let texts: Vec<&String> = rec
        .events
        .iter()
        .filter_map(|e| match e {
            ReportEvent::DiffText(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].lines().count(), 3);
    assert!(texts[0].ends_with("+XHCI controller halted\n"));
}

/// Identical logs: nothing to deduce, identities identical, run still succeeds.
#[test]
fn e2e_identical_logs_report_nothing_to_diff() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail = write_log(&dir, "fail.log", PASS_LOG);

    let mut rec = RecordingReporter::new();
    let outcome = triage::run(&console_request(&pass, &fail, 5), &mut rec).unwrap();

    let TriageOutcome::Console(summary) = outcome else {
        panic!("expected console outcome");
    };
    assert_eq!(summary.diff_lines, 0);
    assert!(summary.whole.is_none());
    assert!(summary.windowed.is_none());
    assert!(rec.notices().contains(&"nothing to diff"));
    assert!(rec.notices().contains(&"no string to diff"));
    assert!(summary
        .identities
        .iter()
        .all(|c| c.verdict == IdentityVerdict::Identical));
}

/// A window larger than the diff is a notice, not a failure.
#[test]
fn e2e_oversized_window_is_a_notice() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail = write_log(&dir, "fail.log", FAIL_LOG);

    let mut rec = RecordingReporter::new();
    let outcome = triage::run(&console_request(&pass, &fail, 10_000), &mut rec).unwrap();

    let TriageOutcome::Console(summary) = outcome else {
        panic!("expected console outcome");
    };
    assert!(summary.whole.is_some());
    assert!(summary.windowed.is_none());
    assert!(rec
        .notices()
        .iter()
        .any(|n| n.starts_with("out of bound") && n.contains("10000")));
}

/// Different build identities flag the logs as not comparable.
#[test]
fn e2e_build_mismatch_is_flagged() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail_content = FAIL_LOG.replace("X1234.86B.0042", "X1234.86B.0043");
    let fail = write_log(&dir, "fail.log", &fail_content);

    let mut rec = RecordingReporter::new();
    let TriageOutcome::Console(summary) =
        triage::run(&console_request(&pass, &fail, 5), &mut rec).unwrap()
    else {
        panic!("expected console outcome");
    };

    assert_eq!(summary.identities.len(), 2);
    assert_eq!(summary.identities[0].verdict, IdentityVerdict::Mismatch);
    assert_eq!(summary.identities[1].verdict, IdentityVerdict::Identical);
}

/// A missing marker on one side is inconclusive, never a mismatch.
#[test]
fn e2e_missing_board_marker_is_inconclusive() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail_content = FAIL_LOG.replace("Board ID: RVP-01\n", "");
    let fail = write_log(&dir, "fail.log", &fail_content);

    let mut rec = RecordingReporter::new();
    let TriageOutcome::Console(summary) =
        triage::run(&console_request(&pass, &fail, 5), &mut rec).unwrap()
    else {
        panic!("expected console outcome");
    };

    assert_eq!(summary.identities[1].verdict, IdentityVerdict::Inconclusive);
}

/// A component override replaces the catalog list for the run.
#[test]
fn e2e_component_override() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail = write_log(&dir, "fail.log", FAIL_LOG);

    let profile = catalog_mgr::resolve_catalog(&CatalogOverrides {
        components: Some(vec!["hub".to_string(), "controller".to_string()]),
        ..Default::default()
    })
    .unwrap();

    let mut request = console_request(&pass, &fail, 5);
    request.catalog = profile;

    let mut rec = RecordingReporter::new();
    let TriageOutcome::Console(summary) = triage::run(&request, &mut rec).unwrap() else {
        panic!("expected console outcome");
    };

    let whole = summary.whole.unwrap();
    assert_eq!(whole.counts.len(), 2);
    assert_eq!(whole.counts[0].component, "hub");
    // "hub" and "controller" each occur once; first in catalog order wins.
    assert_eq!(whole.component.as_deref(), Some("hub"));
}

/// Missing input is fatal and names the file.
#[test]
fn e2e_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let missing = dir.path().join("nope.log");

    let mut rec = RecordingReporter::new();
    let err = triage::run(&console_request(&pass, &missing, 5), &mut rec).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("cannot read file"), "got: {msg}");
    assert!(msg.contains("nope.log"), "got: {msg}");
}

/// JSON summary is written alongside the console report.
#[test]
fn e2e_json_summary_written() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail = write_log(&dir, "fail.log", FAIL_LOG);
    let json_path = dir.path().join("summary.json");

    let mut request = console_request(&pass, &fail, 5);
    request.json_path = Some(json_path.clone());

    let mut rec = RecordingReporter::new();
    triage::run(&request, &mut rec).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["catalog_id"], "bios");
    assert_eq!(value["whole"]["component"], "usb");
    assert_eq!(value["identities"][0]["verdict"], "identical");
    assert!(rec
        .events
        .iter()
        .any(|e| matches!(e, ReportEvent::Written { what: "JSON summary", .. })));
}

// =============================================================================
// Binary
// =============================================================================

/// Console mode prints the sections and the deduced component.
#[test]
fn e2e_binary_console_report() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail = write_log(&dir, "fail.log", FAIL_LOG);

    let out = run_binary(
        &dir,
        &[pass.to_str().unwrap(), fail.to_str().unwrap(), "-n", "4"],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Whole log diff report"));
    assert!(stdout.contains("Targeted log diff report"));
    assert!(stdout.contains("Deduced issue component: usb"));
    assert!(stdout.contains("+XHCI controller halted"));
    assert!(stdout.contains("Build identity ('BIOS ID'): identical"));
}

/// HTML mode writes the report and prints no diff text.
#[test]
fn e2e_binary_html_report() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail = write_log(&dir, "fail.log", FAIL_LOG);
    let html_path = dir.path().join("report.html");

    let out = run_binary(
        &dir,
        &[
            pass.to_str().unwrap(),
            fail.to_str().unwrap(),
            "--html",
            html_path.to_str().unwrap(),
        ],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let html = fs::read_to_string(&html_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("pass.log"));
    assert!(html.contains("fail.log"));
    assert!(html.contains("USB hub timeout"));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("HTML report written to"));
    assert!(!stdout.contains("+USB hub timeout"));
    assert!(!stdout.contains("Deduced issue component"));
}

/// A missing input file exits non-zero with a readable message.
#[test]
fn e2e_binary_missing_file_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let missing = dir.path().join("missing.log");

    let out = run_binary(&dir, &[pass.to_str().unwrap(), missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot read file"));
}

/// A non-integer window size is a usage error.
#[test]
fn e2e_binary_bad_numline_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail = write_log(&dir, "fail.log", FAIL_LOG);

    let out = run_binary(
        &dir,
        &[pass.to_str().unwrap(), fail.to_str().unwrap(), "-n", "abc"],
    );
    assert_eq!(out.status.code(), Some(2));
}

/// --json and --html cannot be combined.
#[test]
fn e2e_binary_json_conflicts_with_html() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail = write_log(&dir, "fail.log", FAIL_LOG);

    let out = run_binary(
        &dir,
        &[
            pass.to_str().unwrap(),
            fail.to_str().unwrap(),
            "--html",
            "r.html",
            "--json",
            "s.json",
        ],
    );
    assert_eq!(out.status.code(), Some(2));
}

/// A context size beyond the supported range is rejected by the parser.
#[test]
fn e2e_binary_oversized_context_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let pass = write_log(&dir, "pass.log", PASS_LOG);
    let fail = write_log(&dir, "fail.log", FAIL_LOG);

    for value in ["9223372036854775808", "1001"] {
        let out = run_binary(
            &dir,
            &[pass.to_str().unwrap(), fail.to_str().unwrap(), "-c", value],
        );
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert_eq!(out.status.code(), Some(2), "-c {value}: {stderr}");
        assert!(!stderr.contains("panicked"), "-c {value}: {stderr}");
    }

    let out = run_binary(
        &dir,
        &[pass.to_str().unwrap(), fail.to_str().unwrap(), "-c", "1000"],
    );
    assert!(out.status.success());
}
