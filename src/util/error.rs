// BootDiff - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Fatal errors (input, config, catalog, export) bubble up to main as
// `BootDiffError`. Usage errors (window, deduce) are non-fatal: the
// orchestration reports them as notices and carries on.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all BootDiff operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum BootDiffError {
    /// A log file given on the command line could not be loaded.
    Input(InputError),

    /// Configuration loading failed.
    Config(ConfigError),

    /// Component catalog loading or validation failed.
    Catalog(CatalogError),

    /// Writing the HTML report or JSON summary failed.
    Export(ExportError),

    /// I/O error with path context (e.g. the console sink went away).
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for BootDiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Catalog(e) => write!(f, "Catalog error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for BootDiffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Catalog(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors loading one of the two log files.
#[derive(Debug)]
pub enum InputError {
    /// The path does not exist.
    NotFound { path: PathBuf },

    /// The path exists but could not be read (permissions, directory, ...).
    Unreadable { path: PathBuf, source: io::Error },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "cannot read file '{}': no such file", path.display())
            }
            Self::Unreadable { path, source } => {
                write!(f, "cannot read file '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<InputError> for BootDiffError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Window errors (non-fatal usage errors)
// ---------------------------------------------------------------------------

/// Reasons a diff window could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// A window of zero lines was requested.
    NoLinesRequested,

    /// The diff text is empty, so there is nothing to window.
    EmptyDiff,

    /// More lines were requested than the diff contains.
    OutOfBounds { requested: usize, available: usize },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLinesRequested => write!(f, "no lines to diff"),
            Self::EmptyDiff => write!(f, "no string to diff"),
            Self::OutOfBounds {
                requested,
                available,
            } => write!(
                f,
                "out of bound: requested {requested} lines but the diff has only \
                 {available} (nlines: {available}). Try running with a lower -n, e.g. -n 1"
            ),
        }
    }
}

impl std::error::Error for WindowError {}

// ---------------------------------------------------------------------------
// Deduce errors (non-fatal usage errors)
// ---------------------------------------------------------------------------

/// Reasons a deduction could not be attempted at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeduceError {
    /// The diff text is empty.
    NothingToDiff,

    /// The catalog has no candidates.
    EmptyCatalog,
}

impl fmt::Display for DeduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToDiff => write!(f, "nothing to diff"),
            Self::EmptyCatalog => write!(f, "no components to deduce against"),
        }
    }
}

impl std::error::Error for DeduceError {}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

/// Errors related to component catalog loading and validation.
#[derive(Debug)]
pub enum CatalogError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Catalog file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is missing or empty.
    MissingField {
        catalog_id: String,
        field: &'static str,
    },

    /// A component name is empty or whitespace-only.
    BlankComponent { catalog_id: String, index: usize },

    /// The catalog lists more components than allowed.
    TooManyComponents {
        catalog_id: String,
        count: usize,
        max: usize,
    },

    /// I/O error reading a catalog file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse TOML '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Catalog '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField { catalog_id, field } => {
                write!(
                    f,
                    "Catalog '{catalog_id}': missing required field '{field}'"
                )
            }
            Self::BlankComponent { catalog_id, index } => write!(
                f,
                "Catalog '{catalog_id}': component #{} is empty",
                index + 1
            ),
            Self::TooManyComponents {
                catalog_id,
                count,
                max,
            } => write!(
                f,
                "Catalog '{catalog_id}' lists {count} components, maximum is {max}"
            ),
            Self::Io { path, source } => {
                write!(
                    f,
                    "I/O error reading catalog '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CatalogError> for BootDiffError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing reports to disk.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for BootDiffError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
///
/// Only an explicitly requested config file produces these; problems with
/// the platform default file degrade to warnings.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for BootDiffError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for BootDiff results.
pub type Result<T> = std::result::Result<T, BootDiffError>;
