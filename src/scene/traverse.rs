//! Depth-first traversal over the object forest.

use super::SceneApi;
use crate::util::Result;

/// Visit `root` and every descendant, depth-first, parent before children.
///
/// Children are queried after the parent has been visited, so `visit` may
/// mutate the scene. The first error from `visit` or the host stops the walk.
pub fn walk_depth_first<S, F>(scene: &mut S, root: &S::Object, visit: &mut F) -> Result<()>
where
    S: SceneApi + ?Sized,
    F: FnMut(&mut S, &S::Object) -> Result<()>,
{
    visit(scene, root)?;
    for child in scene.children(root)? {
        walk_depth_first(scene, &child, visit)?;
    }
    Ok(())
}

/// Collect `root` and its descendants in depth-first pre-order.
pub fn subtree<S>(scene: &S, root: &S::Object) -> Result<Vec<S::Object>>
where
    S: SceneApi + ?Sized,
{
    let mut out = Vec::new();
    let mut stack = vec![root.clone()];
    while let Some(obj) = stack.pop() {
        let children = scene.children(&obj)?;
        out.push(obj);
        // Reverse so the first child is popped first.
        stack.extend(children.into_iter().rev());
    }
    Ok(out)
}
