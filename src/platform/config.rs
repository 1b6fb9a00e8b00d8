// BootDiff - platform/config.rs
//
// Platform-specific config directory resolution and config.toml loading
// with validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for BootDiff configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/bootdiff/ or %APPDATA%\BootDiff\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[analysis]` section.
    pub analysis: AnalysisSection,
    /// `[catalog]` section.
    pub catalog: CatalogSection,
    /// `[identity]` section.
    pub identity: IdentitySection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[analysis]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Trailing diff lines for the targeted report.
    pub numlines: Option<usize>,
    /// Unified diff context lines.
    pub context_lines: Option<usize>,
    /// HTML report context lines.
    pub html_context_lines: Option<usize>,
    /// Show every line in the HTML report instead of changed regions only.
    pub html_full: Option<bool>,
}

/// `[catalog]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Catalog TOML file replacing the built-in one.
    pub path: Option<String>,
    /// Component list override.
    pub components: Option<Vec<String>>,
}

/// `[identity]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct IdentitySection {
    pub build_marker: Option<String>,
    pub board_marker: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Analysis --
    pub numlines: usize,
    pub context_lines: usize,
    pub html_context_lines: usize,
    pub html_full: bool,

    // -- Catalog --
    pub catalog_path: Option<PathBuf>,
    pub components: Option<Vec<String>>,

    // -- Identity --
    pub build_marker: Option<String>,
    pub board_marker: Option<String>,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            numlines: constants::DEFAULT_WINDOW_LINES,
            context_lines: constants::DEFAULT_CONTEXT_LINES,
            html_context_lines: constants::DEFAULT_HTML_CONTEXT_LINES,
            html_full: false,
            catalog_path: None,
            components: None,
            build_marker: None,
            board_marker: None,
            log_level: None,
        }
    }
}

/// Load and validate config.toml.
///
/// With `explicit_path` the file must exist and parse; any failure is a
/// fatal `ConfigError`. Without it the platform default is tried: a missing
/// file yields defaults silently (first run), an unreadable or unparseable
/// one yields defaults plus a warning.
///
/// Returns the validated config and a list of non-fatal warnings.
pub fn load_config(
    explicit_path: Option<&Path>,
    paths: &PlatformPaths,
) -> Result<(AppConfig, Vec<String>), ConfigError> {
    if let Some(path) = explicit_path {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        return parse_config(&content, path);
    }

    let config_path = paths.config_file();
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return Ok((AppConfig::default(), Vec::new()));
    }

    let outcome = std::fs::read_to_string(&config_path)
        .map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })
        .and_then(|content| parse_config(&content, &config_path));

    match outcome {
        Ok(loaded) => Ok(loaded),
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            Ok((AppConfig::default(), vec![msg]))
        }
    }
}

/// Parse and validate config.toml content.
///
/// `source_path` is used for error messages and to resolve a relative
/// `[catalog] path` against the config file's directory.
pub fn parse_config(
    content: &str,
    source_path: &Path,
) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %source_path.display(), "Loaded config.toml");

    let mut warnings: Vec<String> = Vec::new();
    let mut config = AppConfig::default();

    // -- Analysis: numlines --
    if let Some(n) = raw.analysis.numlines {
        if (constants::MIN_WINDOW_LINES..=constants::MAX_WINDOW_LINES).contains(&n) {
            config.numlines = n;
        } else {
            warnings.push(format!(
                "[analysis] numlines = {n} is out of range ({}-{}). Using default ({}).",
                constants::MIN_WINDOW_LINES,
                constants::MAX_WINDOW_LINES,
                constants::DEFAULT_WINDOW_LINES,
            ));
        }
    }

    // -- Analysis: context_lines --
    if let Some(n) = raw.analysis.context_lines {
        if n <= constants::MAX_CONTEXT_LINES {
            config.context_lines = n;
        } else {
            warnings.push(format!(
                "[analysis] context_lines = {n} is out of range (0-{}). Using default ({}).",
                constants::MAX_CONTEXT_LINES,
                constants::DEFAULT_CONTEXT_LINES,
            ));
        }
    }

    // -- Analysis: html_context_lines --
    if let Some(n) = raw.analysis.html_context_lines {
        if n <= constants::MAX_CONTEXT_LINES {
            config.html_context_lines = n;
        } else {
            warnings.push(format!(
                "[analysis] html_context_lines = {n} is out of range (0-{}). Using default ({}).",
                constants::MAX_CONTEXT_LINES,
                constants::DEFAULT_HTML_CONTEXT_LINES,
            ));
        }
    }

    if let Some(full) = raw.analysis.html_full {
        config.html_full = full;
    }

    // -- Catalog: path --
    if let Some(ref p) = raw.catalog.path {
        if !p.is_empty() {
            let path = PathBuf::from(p);
            let resolved = if path.is_relative() {
                source_path
                    .parent()
                    .map(|dir| dir.join(&path))
                    .unwrap_or(path)
            } else {
                path
            };
            config.catalog_path = Some(resolved);
        }
    }

    // -- Catalog: components --
    if let Some(components) = raw.catalog.components {
        if components.is_empty() || components.iter().any(|c| c.trim().is_empty()) {
            warnings.push(
                "[catalog] components must be a non-empty list of non-empty names. \
                 Using the catalog's own list."
                    .to_string(),
            );
        } else {
            config.components = Some(components);
        }
    }

    // -- Identity markers --
    for (field, value, slot) in [
        ("build_marker", raw.identity.build_marker, &mut config.build_marker),
        ("board_marker", raw.identity.board_marker, &mut config.board_marker),
    ] {
        match value {
            Some(v) if v.is_empty() => warnings.push(format!(
                "[identity] {field} is empty. Using the catalog's marker."
            )),
            Some(v) => *slot = Some(v),
            None => {}
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    Ok((config, warnings))
}
