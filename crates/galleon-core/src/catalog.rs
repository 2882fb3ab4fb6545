//! Part catalog - maps scene node names to descriptive metadata
//!
//! The catalog is a static, read-only table loaded once at startup. Scene
//! nodes without a catalog entry are still registered and selectable; the UI
//! shows placeholder text for them instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Placeholder shown for a part with no catalog entry
pub const UNKNOWN_NAME: &str = "unknown";
/// Placeholder shown for an absent function/history field
pub const ABSENT_FIELD: &str = "-";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read part catalog: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse part catalog: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Duplicate catalog entry for part '{0}'")]
    DuplicateId(String),
}

/// A single catalog entry, keyed by the glTF node name it describes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDescriptor {
    /// Scene node name this entry matches (e.g., "Keel")
    pub id: String,
    /// Human-readable name shown in the UI
    pub display_name: String,
    /// What the part does on the ship
    #[serde(default)]
    pub function: String,
    /// Historical background
    #[serde(default)]
    pub history: String,
}

/// On-disk catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogIndex {
    /// Version of the catalog format
    #[serde(default = "default_version")]
    version: String,
    /// List of part entries
    #[serde(default)]
    part: Vec<PartDescriptor>,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Read-only lookup table from part identifier to descriptor
#[derive(Debug, Clone, Default)]
pub struct PartCatalog {
    entries: HashMap<String, PartDescriptor>,
}

impl PartCatalog {
    /// The catalog shipped with the viewer, describing the parts of the
    /// bundled ship model. Parsed from an embedded TOML table.
    pub fn builtin() -> Self {
        Self::from_toml(include_str!("../data/parts.toml"))
            .expect("embedded part catalog is valid TOML")
    }

    /// Load a catalog from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let index: CatalogIndex = toml::from_str(content)?;
        let mut entries = HashMap::with_capacity(index.part.len());
        for part in index.part {
            if entries.contains_key(&part.id) {
                return Err(CatalogError::DuplicateId(part.id));
            }
            entries.insert(part.id.clone(), part);
        }
        Ok(Self { entries })
    }

    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            entries = catalog.len(),
            "Part catalog loaded"
        );
        Ok(catalog)
    }

    /// Look up the descriptor for a scene node name. Absent entries are not
    /// an error; unknown nodes simply have no descriptor.
    pub fn lookup(&self, id: &str) -> Option<&PartDescriptor> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all descriptors (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &PartDescriptor> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        version = "1.0"

        [[part]]
        id = "Keel"
        display_name = "Keel"
        function = "Backbone of the hull"
        history = "The oldest structural member of wooden shipbuilding"

        [[part]]
        id = "Rudder"
        display_name = "Rudder"
    "#;

    #[test]
    fn test_lookup_present_and_absent() {
        let catalog = PartCatalog::from_toml(SAMPLE).unwrap();
        let keel = catalog.lookup("Keel").unwrap();
        assert_eq!(keel.display_name, "Keel");
        assert_eq!(keel.function, "Backbone of the hull");
        assert!(catalog.lookup("Bowsprit").is_none());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let catalog = PartCatalog::from_toml(SAMPLE).unwrap();
        let rudder = catalog.lookup("Rudder").unwrap();
        assert!(rudder.function.is_empty());
        assert!(rudder.history.is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let dup = r#"
            [[part]]
            id = "Mast"
            display_name = "Mast"

            [[part]]
            id = "Mast"
            display_name = "Mainmast"
        "#;
        match PartCatalog::from_toml(dup) {
            Err(CatalogError::DuplicateId(id)) => assert_eq!(id, "Mast"),
            other => panic!("expected DuplicateId, got {:?}", other.map(|c| c.len())),
        }
    }

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = PartCatalog::builtin();
        assert!(!catalog.is_empty());
        // Spot-check a few entries that the bundled model references
        assert!(catalog.lookup("Keel").is_some());
        assert!(catalog.lookup("Rudder").is_some());
        assert!(catalog.lookup("Anchor").is_some());
    }
}
