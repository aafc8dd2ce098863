use crate::error::{Result, TestrecError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single catalog entry: a named test with the skills it covers.
///
/// `duration` is optional; items without one never satisfy a duration
/// constraint during evaluation but are recommended normally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// In-memory test catalog, loaded once at startup and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Load the catalog from a JSON file containing an array of items.
    ///
    /// The whole file must parse; a single malformed item fails the load.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TestrecError::Catalog(format!("failed to read {}: {}", path.display(), e))
        })?;

        let items: Vec<CatalogItem> = serde_json::from_str(&raw).map_err(|e| {
            TestrecError::Catalog(format!("failed to parse {}: {}", path.display(), e))
        })?;

        if items.is_empty() {
            log::warn!("Catalog {} contains no items", path.display());
        }

        Ok(Self { items })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
