//! Rule catalog loading.
//!
//! Catalogs are authored as JSON files next to the content they reference.
//! Loading validates the catalog, so the composer only ever sees a
//! well-formed one.

use std::path::Path;

use dreamforge_domain::{DomainError, RuleCatalog};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] DomainError),
}

/// Parse and validate a catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<RuleCatalog, CatalogError> {
    let catalog: RuleCatalog = serde_json::from_str(json)?;
    catalog.validate()?;
    Ok(catalog)
}

/// Read, parse and validate a catalog file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<RuleCatalog, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = parse_catalog(&json)?;

    tracing::info!(
        path = %path.display(),
        terrain_rules = catalog.terrain_rules.len(),
        character_rules = catalog.character_rules.len(),
        object_assets = catalog.object_assets.len(),
        spawn_bounds = catalog.spawn_bounds,
        "Loaded rule catalog"
    );
    Ok(catalog)
}
