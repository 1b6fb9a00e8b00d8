// BootDiff - core/catalog.rs
//
// Component catalog loading and validation.
// Core layer: accepts TOML strings, never touches the filesystem.
// I/O is handled by app::catalog_mgr which feeds content here.

use crate::util::constants;
use crate::util::error::CatalogError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Runtime types
// =============================================================================

/// Ordered list of candidate component names for deduction.
///
/// Every entry is non-blank; order matters because deduction ties go to the
/// earliest entry. The list itself may be empty (deduction then reports that
/// there is nothing to deduce against).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentCatalog {
    pub id: String,
    pub name: String,
    components: Vec<String>,
}

impl ComponentCatalog {
    /// Build a catalog, rejecting blank entries and oversized lists.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        components: Vec<String>,
    ) -> Result<Self, CatalogError> {
        let id = id.into();

        if components.len() > constants::MAX_CATALOG_COMPONENTS {
            return Err(CatalogError::TooManyComponents {
                catalog_id: id,
                count: components.len(),
                max: constants::MAX_CATALOG_COMPONENTS,
            });
        }
        if let Some(index) = components.iter().position(|c| c.trim().is_empty()) {
            return Err(CatalogError::BlankComponent {
                catalog_id: id,
                index,
            });
        }

        Ok(Self {
            id,
            name: name.into(),
            components,
        })
    }

    /// Candidate names in catalog order.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Replace the candidate list, keeping id and name.
    pub fn with_components(&self, components: Vec<String>) -> Result<Self, CatalogError> {
        Self::new(self.id.clone(), self.name.clone(), components)
    }
}

/// Marker substrings locating the identity lines in a log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityMarkers {
    /// Firmware build identity marker (e.g. "BIOS ID").
    pub build: String,
    /// Board/hardware identity marker (e.g. "Board ID").
    pub board: String,
}

impl Default for IdentityMarkers {
    fn default() -> Self {
        Self {
            build: constants::DEFAULT_BUILD_MARKER.to_string(),
            board: constants::DEFAULT_BOARD_MARKER.to_string(),
        }
    }
}

/// A validated catalog file: candidates plus the identity markers that go
/// with that log format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProfile {
    pub catalog: ComponentCatalog,
    pub markers: IdentityMarkers,
    pub is_builtin: bool,
}

// =============================================================================
// TOML deserialization structures (raw input)
// =============================================================================

/// Raw TOML catalog definition as deserialized from a .toml file.
#[derive(Debug, Deserialize)]
pub struct CatalogDefinition {
    pub catalog: CatalogMeta,
    #[serde(default)]
    pub identity: IdentityDef,
}

#[derive(Debug, Deserialize)]
pub struct CatalogMeta {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub components: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct IdentityDef {
    pub build_marker: Option<String>,
    pub board_marker: Option<String>,
}

// =============================================================================
// Validation
// =============================================================================

/// Parse a TOML string into a `CatalogDefinition`.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_catalog_toml(
    toml_content: &str,
    source_path: &Path,
) -> Result<CatalogDefinition, CatalogError> {
    toml::from_str(toml_content).map_err(|e| CatalogError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })
}

/// Validate a `CatalogDefinition` and turn it into a runtime `CatalogProfile`.
///
/// A catalog file must name at least one component; markers default to the
/// built-in ones when omitted but may not be set to empty strings.
pub fn validate_and_compile(
    def: CatalogDefinition,
    source_path: &Path,
    is_builtin: bool,
) -> Result<CatalogProfile, CatalogError> {
    let id = def.catalog.id.trim().to_string();

    if id.is_empty() {
        return Err(CatalogError::MissingField {
            catalog_id: "(empty)".to_string(),
            field: "catalog.id",
        });
    }
    if def.catalog.components.is_empty() {
        return Err(CatalogError::MissingField {
            catalog_id: id,
            field: "catalog.components",
        });
    }

    let defaults = IdentityMarkers::default();
    let build = marker_or_default(
        &id,
        "identity.build_marker",
        def.identity.build_marker,
        defaults.build,
    )?;
    let board = marker_or_default(
        &id,
        "identity.board_marker",
        def.identity.board_marker,
        defaults.board,
    )?;

    let name = if def.catalog.name.is_empty() {
        id.clone()
    } else {
        def.catalog.name
    };

    let catalog = ComponentCatalog::new(id, name, def.catalog.components)?;

    tracing::debug!(
        catalog_id = %catalog.id,
        components = catalog.len(),
        source = %source_path.display(),
        "Catalog compiled"
    );

    Ok(CatalogProfile {
        catalog,
        markers: IdentityMarkers { build, board },
        is_builtin,
    })
}

fn marker_or_default(
    catalog_id: &str,
    field: &'static str,
    value: Option<String>,
    default: String,
) -> Result<String, CatalogError> {
    match value {
        None => Ok(default),
        Some(v) if v.is_empty() => Err(CatalogError::MissingField {
            catalog_id: catalog_id.to_string(),
            field,
        }),
        Some(v) => Ok(v),
    }
}

// =============================================================================
// Built-in catalog (embedded at compile time)
// =============================================================================

const BUILTIN_BIOS_TOML: &str = include_str!("../../catalogs/bios.toml");

/// Load and validate the catalog embedded in the binary.
pub fn load_builtin_catalog() -> Result<CatalogProfile, CatalogError> {
    let path = PathBuf::from("<builtin>/bios.toml");
    parse_catalog_toml(BUILTIN_BIOS_TOML, &path)
        .and_then(|def| validate_and_compile(def, &path, true))
}
