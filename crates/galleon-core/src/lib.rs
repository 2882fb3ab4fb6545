//! Galleon Core - Part catalog, registry, and interaction state
//!
//! This crate provides the foundational types for the Galleon ship viewer:
//! - Part catalog mapping scene node names to descriptive metadata
//! - Part registry built from a scene-graph traversal after model load
//! - Hover/selection state machine producing minimal highlight diffs
//! - Disassembly ("exploded view") and camera framing math

pub mod catalog;
pub mod explode;
pub mod interaction;
pub mod registry;
pub mod view;

pub use catalog::{CatalogError, PartCatalog, PartDescriptor};
pub use explode::{explode_offset, explode_target, lerp3, progress};
pub use interaction::{Highlight, InteractionState};
pub use registry::{PartId, PartRegistry, RegisteredPart};
