// BootDiff - app/catalog_mgr.rs
//
// Resolves the component catalog for a run: the built-in catalog, or a
// user catalog file, with optional component and marker overrides on top.

use crate::core::catalog::{self, CatalogProfile};
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::CatalogError;
use std::path::{Path, PathBuf};

/// Overrides collected from the CLI and config.toml (CLI already merged in).
#[derive(Debug, Clone, Default)]
pub struct CatalogOverrides {
    /// Catalog file replacing the built-in one.
    pub path: Option<PathBuf>,
    /// Component list replacing the catalog's own list.
    pub components: Option<Vec<String>>,
    pub build_marker: Option<String>,
    pub board_marker: Option<String>,
}

/// Load the catalog for this run and apply overrides.
pub fn resolve_catalog(overrides: &CatalogOverrides) -> Result<CatalogProfile, CatalogError> {
    let mut profile = match overrides.path {
        Some(ref path) => load_catalog_file(path)?,
        None => catalog::load_builtin_catalog()?,
    };

    if let Some(ref components) = overrides.components {
        tracing::info!(
            catalog_id = %profile.catalog.id,
            count = components.len(),
            "Component list overridden"
        );
        profile.catalog = profile.catalog.with_components(components.clone())?;
    }
    if let Some(ref marker) = overrides.build_marker {
        profile.markers.build = marker.clone();
    }
    if let Some(ref marker) = overrides.board_marker {
        profile.markers.board = marker.clone();
    }

    tracing::info!(
        catalog_id = %profile.catalog.id,
        builtin = profile.is_builtin,
        components = profile.catalog.len(),
        "Catalog ready"
    );

    Ok(profile)
}

/// Load and validate a user catalog file.
fn load_catalog_file(path: &Path) -> Result<CatalogProfile, CatalogError> {
    let size = fs::file_size(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if size > constants::MAX_CATALOG_FILE_SIZE {
        return Err(CatalogError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: constants::MAX_CATALOG_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    catalog::parse_catalog_toml(&content, path)
        .and_then(|def| catalog::validate_and_compile(def, path, false))
}
