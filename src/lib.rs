//! # Scene Scrub
//!
//! Material and visibility cleanup for 3D scenes.
//!
//! Scenes assembled from downloaded assets tend to carry dozens of
//! near-duplicate materials (`Steel_Brushed_Stainless`, `Steel_Brushed_Stainless_1`,
//! ...), stray cameras and edge-highlight materials. This crate collapses
//! material names onto canonical ones, renames them to final human-readable
//! names, repoints material slots, deletes what is no longer used and hides
//! selected subtrees.
//!
//! ## Modules
//!
//! - [`util`] - Errors and build info
//! - [`material`] - Material name tables and their composition
//! - [`scene`] - Host scene interface, traversal, in-memory scene and JSON documents
//! - [`scrub`] - The cleanup batch and its settings
//!
//! ## Example
//!
//! ```
//! use scene_scrub::prelude::*;
//!
//! let mut scene = MemoryScene::new();
//! scene.add_material("Mirror_01").unwrap();
//! scene.add_object("mirror", None).unwrap();
//! scene.add_slot("mirror", Some("Mirror_01"), 4).unwrap();
//!
//! let mut scrubber = Scrubber::with_defaults(&mut scene);
//! scrubber.rename_materials().unwrap();
//! assert_eq!(scrubber.list_material_names(), vec!["mirror-material"]);
//! ```

pub mod util;
pub mod material;
pub mod scene;
pub mod scrub;

// Re-export commonly used types
pub use util::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result};
    pub use crate::material::{NameTable, ResolvedMaterialMap};
    pub use crate::scene::{MaterialSlot, MemoryScene, SceneApi, SceneDocument};
    pub use crate::scrub::{ScrubReport, ScrubSettings, Scrubber};
}
