//! Scene scrubbing.
//!
//! A [`Scrubber`] runs an ordered batch of mutations against any
//! [`SceneApi`](crate::scene::SceneApi) host:
//!
//! 1. remove cameras other than the default one
//! 2. hide the configured subtrees (roof, ceilings)
//! 3. delete unused and edge-highlight materials
//! 4. rename materials to their final names
//! 5. point slots at the final material names, then drop orphaned materials
//! 6. repeat step 3
//! 7. remove duplicate material slots per object
//! 8. list the surviving material names
//!
//! The material cleanup is run exactly twice. Scenes where deletions keep
//! cascading may still hold unused materials afterwards.
//!
//! ## Example
//!
//! ```
//! use scene_scrub::scene::MemoryScene;
//! use scene_scrub::scrub::Scrubber;
//!
//! let mut scene = MemoryScene::new();
//! scene.add_camera("Camera").unwrap();
//! scene.add_camera("Camera.001").unwrap();
//! for root in ["roof", "ceiling", "guest-bath-ceiling"] {
//!     scene.add_object(root, None).unwrap();
//! }
//!
//! let report = Scrubber::with_defaults(&mut scene).clean_up().unwrap();
//! assert_eq!(report.cameras_removed, 1);
//! assert_eq!(report.objects_hidden, 3);
//! ```

mod scrubber;
mod settings;

pub use scrubber::*;
pub use settings::*;

/// Counters collected during a scrub run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrubReport {
    pub cameras_removed: usize,
    pub objects_hidden: usize,
    pub materials_deleted: usize,
    pub materials_renamed: usize,
    pub slots_reassigned: usize,
    pub unused_slots_removed: usize,
    pub duplicate_slots_removed: usize,
}

impl std::fmt::Display for ScrubReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "removed {} cameras, hid {} objects, deleted {} materials, renamed {} materials, \
             reassigned {} slots, removed {} unused and {} duplicate slots",
            self.cameras_removed,
            self.objects_hidden,
            self.materials_deleted,
            self.materials_renamed,
            self.slots_reassigned,
            self.unused_slots_removed,
            self.duplicate_slots_removed,
        )
    }
}
