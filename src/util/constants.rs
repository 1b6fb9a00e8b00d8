// BootDiff - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "BootDiff";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "BootDiff";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Diff defaults
// =============================================================================

/// Number of unchanged lines shown around each hunk in the unified diff.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Number of unchanged lines shown around each change block in the HTML
/// side-by-side report.
pub const DEFAULT_HTML_CONTEXT_LINES: usize = 5;

/// Upper bound on configurable context lines (either report).
pub const MAX_CONTEXT_LINES: usize = 1_000;

// =============================================================================
// Windowing
// =============================================================================

/// Default number of trailing diff lines examined by the targeted report.
pub const DEFAULT_WINDOW_LINES: usize = 5;

/// Minimum configurable window size in config.toml.
///
/// The CLI still accepts `-n 0` and reports it as a usage notice; the config
/// file is held to a stricter range because a zero there is always a mistake.
pub const MIN_WINDOW_LINES: usize = 1;

/// Maximum configurable window size in config.toml.
pub const MAX_WINDOW_LINES: usize = 100_000;

// =============================================================================
// Catalogs
// =============================================================================

/// ID of the catalog embedded in the binary.
pub const BUILTIN_CATALOG_ID: &str = "bios";

/// Maximum size of a catalog TOML file in bytes.
pub const MAX_CATALOG_FILE_SIZE: u64 = 64 * 1024; // 64 KB

/// Maximum number of components a single catalog may list.
pub const MAX_CATALOG_COMPONENTS: usize = 256;

/// Default marker for the firmware build identity line.
pub const DEFAULT_BUILD_MARKER: &str = "BIOS ID";

/// Default marker for the board/hardware identity line.
pub const DEFAULT_BOARD_MARKER: &str = "Board ID";

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Kept at `warn` so a normal run only prints the report.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
