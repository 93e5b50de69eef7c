//! In-memory scene host.

use std::collections::HashSet;
use std::path::Path;

use super::{MaterialSlot, ObjectDocument, SceneApi, SceneDocument, SlotDocument};
use crate::util::{build_stamp, Error, Result};

/// Handle to an object inside a [`MemoryScene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct MaterialId(u32);

#[derive(Clone, Debug)]
struct MaterialEntry {
    id: MaterialId,
    name: String,
}

#[derive(Clone, Debug)]
struct SlotEntry {
    material: Option<MaterialId>,
    faces: usize,
}

#[derive(Clone, Debug)]
struct ObjectNode {
    name: String,
    hidden: bool,
    slots: Vec<SlotEntry>,
    children: Vec<usize>,
}

/// Scene graph held entirely in memory.
///
/// Slots reference materials by identity, so renaming a material is seen
/// through every slot and deleting one empties the slots that used it.
/// Objects are never deleted, so handles stay valid for the scene's lifetime.
#[derive(Clone, Debug, Default)]
pub struct MemoryScene {
    cameras: Vec<String>,
    materials: Vec<MaterialEntry>,
    next_material_id: u32,
    nodes: Vec<ObjectNode>,
    roots: Vec<usize>,
}

impl MemoryScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a scene document from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_document(&SceneDocument::open(path)?)
    }

    /// Write the current state to disk.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_document()?.save(path)
    }

    /// Build a scene from a document.
    ///
    /// Fails with `InvalidScene` on duplicate names or on slots that
    /// reference a material the document does not declare.
    pub fn from_document(doc: &SceneDocument) -> Result<Self> {
        let mut scene = Self::new();
        for cam in &doc.cameras {
            scene.add_camera(cam)?;
        }
        for mat in &doc.materials {
            scene.add_material(mat)?;
        }
        for obj in &doc.objects {
            scene.add_document_object(obj, None)?;
        }
        Ok(scene)
    }

    fn add_document_object(&mut self, doc: &ObjectDocument, parent: Option<&str>) -> Result<()> {
        let handle = self.add_object(&doc.name, parent)?;
        self.nodes[handle.0].hidden = doc.hidden;
        for slot in &doc.slots {
            let material = match &slot.material {
                Some(name) => Some(self.material_id(name).ok_or_else(|| {
                    Error::invalid(format!(
                        "object '{}' references undeclared material '{}'",
                        doc.name, name
                    ))
                })?),
                None => None,
            };
            self.nodes[handle.0].slots.push(SlotEntry { material, faces: slot.faces });
        }
        for child in &doc.children {
            self.add_document_object(child, Some(&doc.name))?;
        }
        Ok(())
    }

    /// Snapshot the current state as a document.
    pub fn to_document(&self) -> Result<SceneDocument> {
        let objects = self
            .roots
            .iter()
            .map(|&idx| self.node_document(idx))
            .collect::<Result<Vec<_>>>()?;

        Ok(SceneDocument {
            written_by: Some(build_stamp()),
            cameras: self.cameras.clone(),
            materials: self.materials.iter().map(|m| m.name.clone()).collect(),
            objects,
        })
    }

    fn node_document(&self, idx: usize) -> Result<ObjectDocument> {
        let node = &self.nodes[idx];
        let slots = node
            .slots
            .iter()
            .map(|slot| -> Result<SlotDocument> {
                Ok(SlotDocument {
                    material: slot.material.map(|id| self.material_name(id)).transpose()?,
                    faces: slot.faces,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let children = node
            .children
            .iter()
            .map(|&c| self.node_document(c))
            .collect::<Result<Vec<_>>>()?;

        Ok(ObjectDocument {
            name: node.name.clone(),
            hidden: node.hidden,
            slots,
            children,
        })
    }

    /// Add a camera.
    pub fn add_camera(&mut self, name: &str) -> Result<()> {
        if self.cameras.iter().any(|c| c == name) {
            return Err(Error::invalid(format!("duplicate camera '{}'", name)));
        }
        self.cameras.push(name.to_string());
        Ok(())
    }

    /// Add a material.
    pub fn add_material(&mut self, name: &str) -> Result<()> {
        if self.material_id(name).is_some() {
            return Err(Error::invalid(format!("duplicate material '{}'", name)));
        }
        let id = MaterialId(self.next_material_id);
        self.next_material_id += 1;
        self.materials.push(MaterialEntry { id, name: name.to_string() });
        Ok(())
    }

    /// Add an object under `parent` (or as a root).
    pub fn add_object(&mut self, name: &str, parent: Option<&str>) -> Result<ObjectHandle> {
        if self.find_node(name).is_some() {
            return Err(Error::invalid(format!("duplicate object '{}'", name)));
        }
        let parent_idx = match parent {
            Some(p) => Some(self.find_node(p).ok_or_else(|| Error::object_not_found(p))?),
            None => None,
        };

        let idx = self.nodes.len();
        self.nodes.push(ObjectNode {
            name: name.to_string(),
            hidden: false,
            slots: Vec::new(),
            children: Vec::new(),
        });
        match parent_idx {
            Some(p) => self.nodes[p].children.push(idx),
            None => self.roots.push(idx),
        }
        Ok(ObjectHandle(idx))
    }

    /// Append a material slot to an object.
    pub fn add_slot(&mut self, object: &str, material: Option<&str>, faces: usize) -> Result<()> {
        let idx = self.find_node(object).ok_or_else(|| Error::object_not_found(object))?;
        let material = match material {
            Some(m) => Some(self.material_id(m).ok_or_else(|| Error::material_not_found(m))?),
            None => None,
        };
        self.nodes[idx].slots.push(SlotEntry { material, faces });
        Ok(())
    }

    /// Number of objects in the scene.
    pub fn num_objects(&self) -> usize {
        self.nodes.len()
    }

    fn find_node(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    fn material_id(&self, name: &str) -> Option<MaterialId> {
        self.materials.iter().find(|m| m.name == name).map(|m| m.id)
    }

    fn material_name(&self, id: MaterialId) -> Result<String> {
        self.materials
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.clone())
            .ok_or_else(|| Error::other(format!("dangling material reference #{}", id.0)))
    }

    fn node(&self, object: &ObjectHandle) -> Result<&ObjectNode> {
        self.nodes
            .get(object.0)
            .ok_or_else(|| Error::object_not_found(format!("#{}", object.0)))
    }

    fn node_mut(&mut self, object: &ObjectHandle) -> Result<&mut ObjectNode> {
        self.nodes
            .get_mut(object.0)
            .ok_or_else(|| Error::object_not_found(format!("#{}", object.0)))
    }

    fn preorder(&self, idx: usize, out: &mut Vec<ObjectHandle>) {
        out.push(ObjectHandle(idx));
        for &c in &self.nodes[idx].children {
            self.preorder(c, out);
        }
    }
}

impl SceneApi for MemoryScene {
    type Object = ObjectHandle;

    fn cameras(&self) -> Vec<String> {
        self.cameras.clone()
    }

    fn remove_camera(&mut self, name: &str) -> Result<()> {
        let pos = self
            .cameras
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::camera_not_found(name))?;
        self.cameras.remove(pos);
        Ok(())
    }

    fn object(&self, name: &str) -> Result<ObjectHandle> {
        self.find_node(name)
            .map(ObjectHandle)
            .ok_or_else(|| Error::object_not_found(name))
    }

    fn object_name(&self, object: &ObjectHandle) -> Result<String> {
        Ok(self.node(object)?.name.clone())
    }

    fn objects(&self) -> Vec<ObjectHandle> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.preorder(root, &mut out);
        }
        out
    }

    fn children(&self, object: &ObjectHandle) -> Result<Vec<ObjectHandle>> {
        Ok(self.node(object)?.children.iter().map(|&c| ObjectHandle(c)).collect())
    }

    fn set_hidden(&mut self, object: &ObjectHandle, hidden: bool) -> Result<()> {
        self.node_mut(object)?.hidden = hidden;
        Ok(())
    }

    fn is_hidden(&self, object: &ObjectHandle) -> Result<bool> {
        Ok(self.node(object)?.hidden)
    }

    fn material_slots(&self, object: &ObjectHandle) -> Result<Vec<MaterialSlot>> {
        self.node(object)?
            .slots
            .iter()
            .map(|slot| -> Result<MaterialSlot> {
                Ok(MaterialSlot {
                    material: slot.material.map(|id| self.material_name(id)).transpose()?,
                    face_count: slot.faces,
                })
            })
            .collect()
    }

    fn set_slot_material(
        &mut self,
        object: &ObjectHandle,
        index: usize,
        material: Option<&str>,
    ) -> Result<()> {
        let material = match material {
            Some(m) => Some(self.material_id(m).ok_or_else(|| Error::material_not_found(m))?),
            None => None,
        };
        let node = self.node_mut(object)?;
        if index >= node.slots.len() {
            return Err(Error::InvalidIndex {
                object: node.name.clone(),
                index,
                count: node.slots.len(),
            });
        }
        node.slots[index].material = material;
        Ok(())
    }

    fn remove_material_slot(&mut self, object: &ObjectHandle, index: usize) -> Result<()> {
        let node = self.node_mut(object)?;
        if index >= node.slots.len() {
            return Err(Error::InvalidIndex {
                object: node.name.clone(),
                index,
                count: node.slots.len(),
            });
        }
        node.slots.remove(index);
        Ok(())
    }

    fn remove_unused_material_slots(&mut self, objects: &[ObjectHandle]) -> Result<usize> {
        let targets: HashSet<usize> = objects.iter().map(|o| o.0).collect();
        let mut removed = 0;
        for idx in targets {
            let node = self.node_mut(&ObjectHandle(idx))?;
            let before = node.slots.len();
            node.slots.retain(|s| s.material.is_some() || s.faces > 0);
            removed += before - node.slots.len();
        }
        Ok(removed)
    }

    fn materials(&self) -> Vec<String> {
        self.materials.iter().map(|m| m.name.clone()).collect()
    }

    fn remove_material(&mut self, name: &str) -> Result<()> {
        let pos = self
            .materials
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| Error::material_not_found(name))?;
        let id = self.materials.remove(pos).id;
        for node in &mut self.nodes {
            for slot in &mut node.slots {
                if slot.material == Some(id) {
                    slot.material = None;
                }
            }
        }
        Ok(())
    }

    fn rename_material(&mut self, from: &str, to: &str) -> Result<()> {
        if from == to {
            return self.material_id(from).map(|_| ()).ok_or_else(|| Error::material_not_found(from));
        }
        if self.material_id(to).is_some() {
            return Err(Error::NamingConflict { from: from.to_string(), to: to.to_string() });
        }
        let entry = self
            .materials
            .iter_mut()
            .find(|m| m.name == from)
            .ok_or_else(|| Error::material_not_found(from))?;
        entry.name = to.to_string();
        Ok(())
    }

    fn has_material(&self, name: &str) -> bool {
        self.material_id(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bath() -> MemoryScene {
        let mut scene = MemoryScene::new();
        scene.add_material("Mirror_01").unwrap();
        scene.add_material("material").unwrap();
        scene.add_object("bath", None).unwrap();
        scene.add_object("mirror", Some("bath")).unwrap();
        scene.add_slot("mirror", Some("Mirror_01"), 4).unwrap();
        scene.add_slot("mirror", Some("material"), 2).unwrap();
        scene.add_slot("mirror", None, 0).unwrap();
        scene
    }

    fn slot_names(scene: &MemoryScene, object: &str) -> Vec<Option<String>> {
        let obj = scene.object(object).unwrap();
        scene.material_slots(&obj).unwrap().into_iter().map(|s| s.material).collect()
    }

    #[test]
    fn test_rename_is_visible_through_slots() {
        let mut scene = bath();
        scene.rename_material("Mirror_01", "mirror-material").unwrap();
        assert_eq!(
            slot_names(&scene, "mirror"),
            vec![Some("mirror-material".into()), Some("material".into()), None]
        );
    }

    #[test]
    fn test_rename_conflict() {
        let mut scene = bath();
        let err = scene.rename_material("Mirror_01", "material").unwrap_err();
        assert!(matches!(err, Error::NamingConflict { .. }));
        // Renaming to the current name is not a conflict.
        scene.rename_material("material", "material").unwrap();
    }

    #[test]
    fn test_remove_material_empties_slots() {
        let mut scene = bath();
        scene.remove_material("Mirror_01").unwrap();
        assert_eq!(scene.materials(), vec!["material"]);
        assert_eq!(slot_names(&scene, "mirror"), vec![None, Some("material".into()), None]);

        let err = scene.remove_material("Mirror_01").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove_unused_slots_keeps_slots_with_faces() {
        let mut scene = bath();
        scene.remove_material("Mirror_01").unwrap();
        let objects = scene.objects();
        let removed = scene.remove_unused_material_slots(&objects).unwrap();
        assert_eq!(removed, 1);
        // The emptied slot still has faces, so it stays.
        assert_eq!(slot_names(&scene, "mirror"), vec![None, Some("material".into())]);
    }

    #[test]
    fn test_remove_slot_out_of_range() {
        let mut scene = bath();
        let obj = scene.object("mirror").unwrap();
        let err = scene.remove_material_slot(&obj, 3).unwrap_err();
        assert!(matches!(err, Error::InvalidIndex { index: 3, count: 3, .. }));
        scene.remove_material_slot(&obj, 0).unwrap();
        assert_eq!(slot_names(&scene, "mirror"), vec![Some("material".into()), None]);
    }

    #[test]
    fn test_objects_preorder() {
        let mut scene = bath();
        scene.add_object("floor", None).unwrap();
        scene.add_object("tile", Some("bath")).unwrap();
        let names: Vec<_> = scene
            .objects()
            .iter()
            .map(|o| scene.object_name(o).unwrap())
            .collect();
        assert_eq!(names, vec!["bath", "mirror", "tile", "floor"]);
    }

    #[test]
    fn test_document_rejects_undeclared_material() {
        let doc = SceneDocument {
            objects: vec![ObjectDocument::new("o").with_slot(Some("ghost"), 1)],
            ..Default::default()
        };
        let err = MemoryScene::from_document(&doc).unwrap_err();
        assert!(matches!(err, Error::InvalidScene(_)));
    }

    #[test]
    fn test_document_rejects_duplicate_objects() {
        let doc = SceneDocument {
            objects: vec![ObjectDocument::new("o").with_child(ObjectDocument::new("o"))],
            ..Default::default()
        };
        assert!(matches!(MemoryScene::from_document(&doc), Err(Error::InvalidScene(_))));
    }

    #[test]
    fn test_document_round_trip_preserves_structure() {
        let scene = bath();
        let doc = scene.to_document().unwrap();
        assert!(doc.written_by.is_some());

        let reloaded = MemoryScene::from_document(&doc).unwrap();
        let mut doc2 = reloaded.to_document().unwrap();
        doc2.written_by = doc.written_by.clone();
        assert_eq!(doc, doc2);
    }

    #[test]
    fn test_document_keeps_hidden_flags() {
        let mut hidden_child = ObjectDocument::new("vanity");
        hidden_child.hidden = true;
        let doc = SceneDocument {
            objects: vec![ObjectDocument::new("bath").with_child(hidden_child)],
            ..Default::default()
        };

        let scene = MemoryScene::from_document(&doc).unwrap();
        assert!(scene.is_hidden(&scene.object("vanity").unwrap()).unwrap());
        assert!(!scene.is_hidden(&scene.object("bath").unwrap()).unwrap());

        let written = scene.to_document().unwrap();
        assert!(!written.objects[0].hidden);
        assert!(written.objects[0].children[0].hidden);
    }
}
