// BootDiff - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Catalog resolution and the triage run

use bootdiff::app::catalog_mgr::{self, CatalogOverrides};
use bootdiff::app::reporter::ConsoleReporter;
use bootdiff::app::triage::{self, OutputMode, TriageRequest};
use bootdiff::platform::config::{self, AppConfig, PlatformPaths};
use bootdiff::util;
use bootdiff::util::error::{BootDiffError, Result};

use clap::Parser;
use std::path::PathBuf;

// larger radii overflow the hunk grouping in `similar`
const MAX_CONTEXT_ARG: u64 = util::constants::MAX_CONTEXT_LINES as u64;

/// BootDiff - pass/fail boot log differ.
///
/// Diffs a log from a passing boot against one from a failing boot and
/// names the firmware component that shows up most in the difference,
/// both over the whole diff and over its last few lines.
#[derive(Parser, Debug)]
#[command(name = "bootdiff", version, about)]
struct Cli {
    /// Log from the passing run.
    pass_log: PathBuf,

    /// Log from the failing run.
    fail_log: PathBuf,

    /// Write an HTML side-by-side report to this path instead of the console report.
    #[arg(long, value_name = "PATH")]
    html: Option<PathBuf>,

    /// Show every line in the HTML report, not just changed regions.
    #[arg(long, requires = "html")]
    html_full: bool,

    /// Number of trailing diff lines for the targeted report [default: 5].
    #[arg(short = 'n', long = "numline", value_name = "LINES")]
    numline: Option<usize>,

    /// Unified diff context lines, 0-1000 [default: 3].
    #[arg(
        short = 'c',
        long = "context",
        value_name = "LINES",
        value_parser = clap::value_parser!(u64).range(0..=MAX_CONTEXT_ARG)
    )]
    context: Option<u64>,

    /// Comma-separated component names replacing the catalog's list.
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    components: Option<Vec<String>>,

    /// Component catalog TOML file replacing the built-in BIOS catalog.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Write a JSON summary of the run to this path.
    #[arg(long, value_name = "PATH", conflicts_with = "html")]
    json: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Merge CLI flags over config values and resolve the catalog.
fn build_request(cli: &Cli, config: &AppConfig) -> Result<TriageRequest> {
    let overrides = CatalogOverrides {
        path: cli.catalog.clone().or_else(|| config.catalog_path.clone()),
        components: cli.components.clone().or_else(|| config.components.clone()),
        build_marker: config.build_marker.clone(),
        board_marker: config.board_marker.clone(),
    };
    let catalog = catalog_mgr::resolve_catalog(&overrides)?;

    let mode = match cli.html {
        Some(ref path) => OutputMode::Html(path.clone()),
        None => OutputMode::Console,
    };

    let html_context_lines = if cli.html_full || config.html_full {
        None
    } else {
        Some(config.html_context_lines)
    };

    Ok(TriageRequest {
        pass_path: cli.pass_log.clone(),
        fail_path: cli.fail_log.clone(),
        mode,
        window_lines: cli.numline.unwrap_or(config.numlines),
        context_lines: cli.context.map_or(config.context_lines, |c| c as usize),
        html_context_lines,
        catalog,
        json_path: cli.json.clone(),
    })
}

fn fail(e: &BootDiffError) -> ! {
    tracing::error!(error = %e, "BootDiff failed");
    eprintln!("Error: {e}");
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let loaded = config::load_config(cli.config.as_deref(), &platform_paths);

    let (app_config, config_warnings) = match loaded {
        Ok(c) => c,
        Err(e) => {
            util::logging::init(cli.debug, None);
            fail(&e.into());
        }
    };

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "BootDiff starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let result = build_request(&cli, &app_config).and_then(|request| {
        let stdout = std::io::stdout();
        let mut reporter = ConsoleReporter::new(stdout.lock());
        triage::run(&request, &mut reporter)
    });

    if let Err(e) = result {
        fail(&e);
    }
}
