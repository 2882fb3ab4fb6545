//! Part registry - binds scene nodes to catalog metadata
//!
//! Built once per successful model load by traversing the scene graph and
//! registering every leaf mesh node. Node names come from the asset and are
//! not guaranteed unique, so each part gets a synthetic [`PartId`] derived
//! from its traversal ordinal; duplicate names are logged rather than
//! silently overwritten.

use crate::catalog::{PartDescriptor, ABSENT_FIELD, UNKNOWN_NAME};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Synthetic stable identifier for a registered part, unique by construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartId(String);

impl PartId {
    fn new(ordinal: usize, node_name: &str) -> Self {
        Self(format!("p{:03}:{}", ordinal, node_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scene part registered during model traversal
#[derive(Debug, Clone)]
pub struct RegisteredPart {
    /// Synthetic registry key
    pub id: PartId,
    /// glTF node name as found in the asset
    pub node_name: String,
    /// Position in traversal order; drives the dispersal distance when
    /// disassembled (later parts travel farther)
    pub ordinal: usize,
    /// Catalog metadata, if the node name has an entry
    pub descriptor: Option<PartDescriptor>,
}

impl RegisteredPart {
    /// Label for list UIs: catalog display name, falling back to the node name
    pub fn label(&self) -> &str {
        self.descriptor
            .as_ref()
            .map(|d| d.display_name.as_str())
            .unwrap_or(&self.node_name)
    }

    /// Name line for the info panel and tooltip ("unknown" when absent)
    pub fn info_name(&self) -> &str {
        self.descriptor
            .as_ref()
            .map(|d| d.display_name.as_str())
            .unwrap_or(UNKNOWN_NAME)
    }

    /// Function text with placeholder for absent or empty entries
    pub fn function_text(&self) -> &str {
        self.descriptor
            .as_ref()
            .map(|d| d.function.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(ABSENT_FIELD)
    }

    /// History text with placeholder for absent or empty entries
    pub fn history_text(&self) -> &str {
        self.descriptor
            .as_ref()
            .map(|d| d.history.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(ABSENT_FIELD)
    }
}

/// Registry of all parts found in the loaded model, in traversal order.
/// Rebuilt from scratch (never merged) whenever a new model loads.
#[derive(Debug, Default)]
pub struct PartRegistry {
    parts: Vec<RegisteredPart>,
    by_id: HashMap<PartId, usize>,
    by_name: HashMap<String, usize>,
}

impl PartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a part. Returns its synthetic id.
    ///
    /// A duplicate node name is logged and kept under a distinct [`PartId`];
    /// name lookup resolves to the first registration.
    pub fn insert(&mut self, node_name: &str, descriptor: Option<PartDescriptor>) -> PartId {
        let ordinal = self.parts.len();
        let id = PartId::new(ordinal, node_name);

        if self.by_name.contains_key(node_name) {
            tracing::warn!(
                node_name,
                %id,
                "Duplicate scene node name; keeping both under distinct part ids"
            );
        } else {
            self.by_name.insert(node_name.to_string(), ordinal);
        }

        self.by_id.insert(id.clone(), ordinal);
        self.parts.push(RegisteredPart {
            id: id.clone(),
            node_name: node_name.to_string(),
            ordinal,
            descriptor,
        });
        id
    }

    pub fn get(&self, id: &PartId) -> Option<&RegisteredPart> {
        self.by_id.get(id).map(|&i| &self.parts[i])
    }

    /// Find a part by its raw node name (first registration wins)
    pub fn find_by_name(&self, node_name: &str) -> Option<&RegisteredPart> {
        self.by_name.get(node_name).map(|&i| &self.parts[i])
    }

    /// Iterate in traversal order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredPart> {
        self.parts.iter()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Drop all registrations (a new model is about to load)
    pub fn clear(&mut self) {
        self.parts.clear();
        self.by_id.clear();
        self.by_name.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PartCatalog;

    fn catalog() -> PartCatalog {
        PartCatalog::from_toml(
            r#"
            [[part]]
            id = "A"
            display_name = "Part A"
            function = "does A things"
            history = "A history"
        "#,
        )
        .unwrap()
    }

    #[test]
    fn test_descriptor_agrees_with_catalog() {
        let catalog = catalog();
        let mut registry = PartRegistry::new();
        for name in ["A", "B", "C"] {
            registry.insert(name, catalog.lookup(name).cloned());
        }

        let a = registry.find_by_name("A").unwrap();
        assert_eq!(a.descriptor.as_ref(), catalog.lookup("A"));
        assert!(registry.find_by_name("B").unwrap().descriptor.is_none());
        assert!(registry.find_by_name("C").unwrap().descriptor.is_none());
    }

    #[test]
    fn test_placeholders_for_uncatalogued_part() {
        let mut registry = PartRegistry::new();
        registry.insert("B", None);

        let b = registry.find_by_name("B").unwrap();
        assert_eq!(b.info_name(), "unknown");
        assert_eq!(b.function_text(), "-");
        assert_eq!(b.history_text(), "-");
        // The list label still shows the raw node name
        assert_eq!(b.label(), "B");
    }

    #[test]
    fn test_duplicate_names_get_distinct_ids() {
        let mut registry = PartRegistry::new();
        let first = registry.insert("Plank", None);
        let second = registry.insert("Plank", None);

        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);
        // Name lookup resolves to the first registration
        assert_eq!(registry.find_by_name("Plank").unwrap().id, first);
        // Both remain reachable by id
        assert!(registry.get(&second).is_some());
    }

    #[test]
    fn test_ordinals_follow_traversal_order() {
        let mut registry = PartRegistry::new();
        registry.insert("Keel", None);
        registry.insert("Mast", None);
        registry.insert("Rudder", None);

        let ordinals: Vec<usize> = registry.iter().map(|p| p.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut registry = PartRegistry::new();
        registry.insert("Keel", None);
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.find_by_name("Keel").is_none());
    }
}
