//! Scene scrubber implementation.

use std::collections::{BTreeMap, HashSet};

use super::{ScrubReport, ScrubSettings};
use crate::material::{is_edge_material, ResolvedMaterialMap};
use crate::scene::{walk_depth_first, MaterialSlot, SceneApi};
use crate::util::{Error, Result};

/// Runs cleanup operations against a scene.
///
/// Each operation mutates the scene immediately and propagates the first host
/// error it hits; nothing is rolled back.
pub struct Scrubber<'s, S: SceneApi + ?Sized> {
    scene: &'s mut S,
    settings: ScrubSettings,
    resolved: ResolvedMaterialMap,
    report: ScrubReport,
}

impl<'s, S: SceneApi + ?Sized> Scrubber<'s, S> {
    /// Create a scrubber for `scene` with explicit settings.
    pub fn new(scene: &'s mut S, settings: ScrubSettings) -> Self {
        let resolved = settings.resolved_map();
        Self {
            scene,
            settings,
            resolved,
            report: ScrubReport::default(),
        }
    }

    /// Create a scrubber with the built-in putnam settings.
    pub fn with_defaults(scene: &'s mut S) -> Self {
        Self::new(scene, ScrubSettings::default())
    }

    /// Settings in use.
    pub fn settings(&self) -> &ScrubSettings {
        &self.settings
    }

    /// Composed raw -> final material names.
    pub fn resolved_map(&self) -> &ResolvedMaterialMap {
        &self.resolved
    }

    /// Counters accumulated so far.
    pub fn report(&self) -> &ScrubReport {
        &self.report
    }

    /// Run the full cleanup batch.
    ///
    /// Order matters: materials are renamed before slots are reassigned to
    /// the final names, and the unused/edge material cleanup runs once before
    /// and once after reassignment.
    pub fn clean_up(&mut self) -> Result<ScrubReport> {
        let _span = tracing::info_span!("clean_up").entered();

        self.remove_non_default_cameras()?;
        self.hide_listed_roots()?;
        self.clean_unused_and_edge_materials()?;
        self.rename_materials()?;
        self.reassign_materials()?;
        self.clean_unused_and_edge_materials()?;
        self.remove_duplicate_material_slots()?;
        self.list_material_names();

        tracing::info!("{}", self.report);
        Ok(self.report.clone())
    }

    /// Delete every camera except the default one.
    pub fn remove_non_default_cameras(&mut self) -> Result<usize> {
        tracing::info!("remove non-default cameras");
        let mut removed = 0;
        for cam in self.scene.cameras() {
            if cam != self.settings.default_camera {
                tracing::debug!("remove camera {}", cam);
                self.scene.remove_camera(&cam)?;
                removed += 1;
            }
        }
        self.report.cameras_removed += removed;
        Ok(removed)
    }

    /// Hide every configured root and its descendants.
    pub fn hide_listed_roots(&mut self) -> Result<usize> {
        tracing::info!("hide {}", self.settings.hidden_roots.join(", "));
        let roots = self.settings.hidden_roots.clone();
        let mut hidden = 0;
        for root in &roots {
            hidden += self.hide_subtree(root)?;
        }
        Ok(hidden)
    }

    /// Hide the named object and its whole subtree.
    ///
    /// Returns the number of objects visited. Fails with `NotFound` if the
    /// root does not exist.
    pub fn hide_subtree(&mut self, name: &str) -> Result<usize> {
        let root = self.scene.object(name)?;
        let mut visited = 0;
        walk_depth_first(&mut *self.scene, &root, &mut |scene: &mut S, obj: &S::Object| {
            scene.set_hidden(obj, true)?;
            visited += 1;
            Ok(())
        })?;
        tracing::debug!("hid {} objects under {}", visited, name);
        self.report.objects_hidden += visited;
        Ok(visited)
    }

    /// Bulk-remove empty, face-less slots across all objects.
    pub fn remove_all_unused_material_slots(&mut self) -> Result<usize> {
        let objects = self.scene.objects();
        let removed = self.scene.remove_unused_material_slots(&objects)?;
        if removed > 0 {
            tracing::debug!("removed {} unused slots", removed);
        }
        self.report.unused_slots_removed += removed;
        Ok(removed)
    }

    /// Count slot references per live material.
    ///
    /// Every live material appears in the result, with zero if unreferenced.
    pub fn material_usages(&self) -> Result<BTreeMap<String, usize>> {
        let mut usages: BTreeMap<String, usize> =
            self.scene.materials().into_iter().map(|m| (m, 0)).collect();
        for obj in self.scene.objects() {
            for slot in self.scene.material_slots(&obj)? {
                if let Some(name) = slot.material {
                    *usages.entry(name).or_insert(0) += 1;
                }
            }
        }
        for (name, count) in &usages {
            tracing::trace!("{} - {}", name, count);
        }
        Ok(usages)
    }

    /// Delete materials no slot references.
    ///
    /// Single pass: a material that only becomes unused because of this
    /// call's deletions survives until the next call.
    pub fn remove_unused_materials(&mut self) -> Result<usize> {
        self.remove_all_unused_material_slots()?;
        let usages = self.material_usages()?;

        let mut deleted = 0;
        for name in self.scene.materials() {
            if usages.get(&name).copied().unwrap_or(0) == 0 {
                tracing::debug!("delete {} (no usages)", name);
                self.scene.remove_material(&name)?;
                deleted += 1;
            }
        }
        self.report.materials_deleted += deleted;
        Ok(deleted)
    }

    /// Delete all edge-highlight materials regardless of usage.
    pub fn remove_edge_materials(&mut self) -> Result<usize> {
        let mut deleted = 0;
        for name in self.scene.materials() {
            if is_edge_material(&name, &self.settings.edge_prefix) {
                tracing::debug!("delete {} (edge)", name);
                self.scene.remove_material(&name)?;
                deleted += 1;
            }
        }
        self.report.materials_deleted += deleted;
        Ok(deleted)
    }

    /// Remove unused materials, then edge materials, then unused slots.
    pub fn clean_unused_and_edge_materials(&mut self) -> Result<usize> {
        tracing::info!("clean materials");
        let deleted = self.remove_unused_materials()? + self.remove_edge_materials()?;
        self.remove_all_unused_material_slots()?;
        Ok(deleted)
    }

    /// Rename materials listed in the rename map to their final names.
    ///
    /// Fails with `NamingConflict` if a target name is already taken.
    pub fn rename_materials(&mut self) -> Result<usize> {
        tracing::info!("rename materials");
        let mut renamed = 0;
        for name in self.scene.materials() {
            let Some(target) = self.settings.rename_map.lookup(&name) else {
                continue;
            };
            if target == name {
                continue;
            }
            tracing::debug!("rename {} -> {}", name, target);
            self.scene.rename_material(&name, target)?;
            renamed += 1;
        }
        self.report.materials_renamed += renamed;
        Ok(renamed)
    }

    /// Point every slot at its material's final name, then drop orphans.
    ///
    /// Must run after [`Self::rename_materials`]: the target material is
    /// looked up by its final name and a missing one fails with `NotFound`.
    pub fn reassign_materials(&mut self) -> Result<usize> {
        tracing::info!("reassign materials");
        let mut reassigned = 0;
        for obj in self.scene.objects() {
            let slots = self.scene.material_slots(&obj)?;
            for (idx, slot) in slots.iter().enumerate() {
                let Some(current) = slot.material() else {
                    continue;
                };
                let target = self.resolved.resolve(current);
                if target == current {
                    continue;
                }
                if !self.scene.has_material(target) {
                    return Err(Error::material_not_found(target));
                }
                tracing::debug!(
                    "{}[{}]: {} -> {}",
                    self.scene.object_name(&obj)?,
                    idx,
                    current,
                    target
                );
                self.scene.set_slot_material(&obj, idx, Some(target))?;
                reassigned += 1;
            }
        }
        self.report.slots_reassigned += reassigned;

        self.remove_unused_materials()?;
        Ok(reassigned)
    }

    /// Keep the first slot per material on each object and remove the rest.
    pub fn remove_duplicate_material_slots(&mut self) -> Result<usize> {
        tracing::info!("remove duplicate material slots");
        let mut removed = 0;
        for obj in self.scene.objects() {
            let slots = self.scene.material_slots(&obj)?;
            let duplicates = duplicate_slot_indices(&slots);
            if duplicates.is_empty() {
                continue;
            }
            let name = self.scene.object_name(&obj)?;
            for (original, index) in removal_translation(&duplicates) {
                tracing::debug!("{}: remove slot {} (originally {})", name, index, original);
                self.scene.remove_material_slot(&obj, index)?;
                removed += 1;
            }
        }
        self.report.duplicate_slots_removed += removed;
        Ok(removed)
    }

    /// Names of all live materials, in host order.
    pub fn list_material_names(&self) -> Vec<String> {
        let names = self.scene.materials();
        tracing::info!("materials:");
        for name in &names {
            tracing::info!("  {}", name);
        }
        names
    }
}

/// Indices (ascending) of slots whose material already appeared earlier.
///
/// Empty slots are never duplicates and do not count as seen.
pub fn duplicate_slot_indices(slots: &[MaterialSlot]) -> Vec<usize> {
    let mut seen = HashSet::new();
    slots
        .iter()
        .enumerate()
        .filter_map(|(idx, slot)| {
            let name = slot.material()?;
            (!seen.insert(name)).then_some(idx)
        })
        .collect()
}

/// Translation table from original slot index to the index to pass to
/// successive single-slot removals, applied in ascending original order.
///
/// Each removal shifts later slots down by one, so the `k`-th removal
/// targets `original - k`. Duplicate entries in `original` collapse.
pub fn removal_translation(original: &[usize]) -> BTreeMap<usize, usize> {
    let sorted: BTreeMap<usize, ()> = original.iter().map(|&idx| (idx, ())).collect();
    sorted
        .into_keys()
        .enumerate()
        .map(|(already_removed, idx)| (idx, idx - already_removed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(names: &[Option<&str>]) -> Vec<MaterialSlot> {
        names.iter().map(|n| MaterialSlot::new(*n, 1)).collect()
    }

    #[test]
    fn test_duplicate_indices() {
        let s = slots(&[Some("A"), Some("B"), Some("A"), Some("C"), Some("B")]);
        assert_eq!(duplicate_slot_indices(&s), vec![2, 4]);
    }

    #[test]
    fn test_empty_slots_never_duplicates() {
        let s = slots(&[None, Some("A"), None, Some("A")]);
        assert_eq!(duplicate_slot_indices(&s), vec![3]);
    }

    #[test]
    fn test_removal_translation() {
        let t = removal_translation(&[4, 2]);
        assert_eq!(t.into_iter().collect::<Vec<_>>(), vec![(2, 2), (4, 3)]);

        let t = removal_translation(&[4, 1, 2, 2]);
        assert_eq!(t.values().copied().collect::<Vec<_>>(), vec![1, 1, 2]);
        assert!(removal_translation(&[]).is_empty());
    }

    #[test]
    fn test_translated_removals_keep_first_occurrences() {
        let mut v = vec!["A", "B", "A", "C", "B"];
        for index in removal_translation(&[2, 4]).into_values() {
            v.remove(index);
        }
        assert_eq!(v, vec!["A", "B", "C"]);
    }
}
