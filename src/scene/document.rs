//! JSON scene document.
//!
//! ```json
//! {
//!   "cameras": ["Camera", "Camera.001"],
//!   "materials": ["Mirror_01", "material"],
//!   "objects": [
//!     { "name": "bath", "slots": [{ "material": "Mirror_01", "faces": 4 }],
//!       "children": [{ "name": "vanity", "hidden": true }] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::util::Result;

/// Whole-scene document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDocument {
    /// Tool and version that wrote the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_by: Option<String>,
    /// Camera names.
    pub cameras: Vec<String>,
    /// Material names, in enumeration order.
    pub materials: Vec<String>,
    /// Root objects.
    pub objects: Vec<ObjectDocument>,
}

/// One object and its subtree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectDocument {
    pub name: String,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<SlotDocument>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ObjectDocument>,
}

/// One material slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotDocument {
    pub material: Option<String>,
    pub faces: usize,
}

impl ObjectDocument {
    /// Create an object with no slots or children.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Add a slot (builder style).
    pub fn with_slot(mut self, material: Option<&str>, faces: usize) -> Self {
        self.slots.push(SlotDocument {
            material: material.map(str::to_string),
            faces,
        });
        self
    }

    /// Add a child (builder style).
    pub fn with_child(mut self, child: ObjectDocument) -> Self {
        self.children.push(child);
        self
    }
}

impl SceneDocument {
    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a document from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Write a document to disk.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Total number of objects in the forest.
    pub fn num_objects(&self) -> usize {
        fn count(obj: &ObjectDocument) -> usize {
            1 + obj.children.iter().map(count).sum::<usize>()
        }
        self.objects.iter().map(count).sum()
    }
}
