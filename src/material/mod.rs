//! Material naming tables.
//!
//! Raw material names coming out of modelling packages collapse onto a
//! canonical name, and canonical names may then get a final human-readable
//! name. Both steps are plain lookup tables with passthrough semantics.
//!
//! ## Key Concepts
//!
//! - **Name map**: raw name -> canonical name
//! - **Rename map**: canonical name -> final name
//! - **Resolved map**: raw name -> final name (both maps composed)
//!
//! ## Example
//!
//! ```
//! use scene_scrub::material::{putnam_name_map, putnam_rename_map, ResolvedMaterialMap};
//!
//! let resolved = ResolvedMaterialMap::compose(&putnam_name_map(), &putnam_rename_map());
//! assert_eq!(resolved.resolve("Color_K01"), "roof-shingles-material");
//! assert_eq!(resolved.resolve("not-in-table"), "not-in-table");
//! ```

mod names;
mod putnam;

pub use names::*;
pub use putnam::*;

/// Name prefix of materials generated by edge highlighting.
pub const EDGE_MATERIAL_PREFIX: &str = "edge_color";

/// Check whether a material is an edge-highlight material.
pub fn is_edge_material(name: &str, prefix: &str) -> bool {
    !prefix.is_empty() && name.starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_edge_material() {
        assert!(is_edge_material("edge_color_1", EDGE_MATERIAL_PREFIX));
        assert!(is_edge_material("edge_color", EDGE_MATERIAL_PREFIX));
        assert!(!is_edge_material("my_edge_color", EDGE_MATERIAL_PREFIX));
        assert!(!is_edge_material("anything", ""));
    }
}
