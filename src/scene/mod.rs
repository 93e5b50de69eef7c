//! Scene access.
//!
//! The scrubber never touches a scene graph directly. It talks to a host
//! through [`SceneApi`], which covers exactly the reads and mutations a
//! cleanup pass needs: cameras, the object forest, per-object material
//! slots and the material registry.
//!
//! [`MemoryScene`] is a self-contained host backed by plain vectors and a
//! JSON [`SceneDocument`], used by the CLI and by tests.

mod document;
mod memory;
mod traverse;

pub use document::*;
pub use memory::*;
pub use traverse::*;

use crate::util::Result;

/// Snapshot of one material slot on an object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaterialSlot {
    /// Name of the referenced material, if any.
    pub material: Option<String>,
    /// Number of faces assigned to this slot.
    pub face_count: usize,
}

impl MaterialSlot {
    /// Create a slot referencing `material`.
    pub fn new(material: Option<&str>, face_count: usize) -> Self {
        Self {
            material: material.map(str::to_string),
            face_count,
        }
    }

    /// Material name, if the slot is occupied.
    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    /// Slot references no material and no face uses it.
    pub fn is_unused(&self) -> bool {
        self.material.is_none() && self.face_count == 0
    }
}

/// Operations a host scene exposes to the scrubber.
///
/// Objects are addressed through host handles ([`SceneApi::Object`]);
/// cameras and materials are addressed by their unique names. Every
/// fallible call reports host-side failures as [`crate::Error`] and the
/// caller is expected to propagate them unchanged.
pub trait SceneApi {
    /// Host handle for a scene object.
    type Object: Clone + std::fmt::Debug;

    /// Names of all camera data blocks.
    fn cameras(&self) -> Vec<String>;

    /// Delete a camera by name.
    fn remove_camera(&mut self, name: &str) -> Result<()>;

    /// Look up an object by name. Fails with `NotFound` if absent.
    fn object(&self, name: &str) -> Result<Self::Object>;

    /// Name of an object.
    fn object_name(&self, object: &Self::Object) -> Result<String>;

    /// All objects in the scene, parents before their children.
    fn objects(&self) -> Vec<Self::Object>;

    /// Direct children of an object, in host order.
    fn children(&self, object: &Self::Object) -> Result<Vec<Self::Object>>;

    /// Set the hidden flag of a single object.
    fn set_hidden(&mut self, object: &Self::Object, hidden: bool) -> Result<()>;

    /// Read the hidden flag of a single object.
    fn is_hidden(&self, object: &Self::Object) -> Result<bool>;

    /// Material slots of an object, in index order.
    fn material_slots(&self, object: &Self::Object) -> Result<Vec<MaterialSlot>>;

    /// Point slot `index` at `material` (or clear it).
    fn set_slot_material(
        &mut self,
        object: &Self::Object,
        index: usize,
        material: Option<&str>,
    ) -> Result<()>;

    /// Remove slot `index`; later slots shift down by one.
    fn remove_material_slot(&mut self, object: &Self::Object, index: usize) -> Result<()>;

    /// Bulk-remove unused slots (no material, no faces) on `objects`.
    ///
    /// Returns the number of slots removed.
    fn remove_unused_material_slots(&mut self, objects: &[Self::Object]) -> Result<usize>;

    /// Names of all live materials, in host enumeration order.
    fn materials(&self) -> Vec<String>;

    /// Delete a material. Slots referencing it become empty.
    fn remove_material(&mut self, name: &str) -> Result<()>;

    /// Rename a material in place.
    ///
    /// Fails with `NamingConflict` if another material already has `to`.
    fn rename_material(&mut self, from: &str, to: &str) -> Result<()>;

    /// Check whether a material with this name exists.
    fn has_material(&self, name: &str) -> bool {
        self.materials().iter().any(|m| m == name)
    }
}
