//! Scoped creation helpers: host objects that die with the owner.
//!
//! Both helpers go through [`LifecycleRegistry::try_create_tracked`], so the
//! created object is returned unchanged and destroyed at teardown.

use super::host::{SceneHost, SceneObject};
use crate::error::SceneError;
use crate::lifecycle::{Destructible, LifecycleRegistry};

/// Attaches a mesh visual to `object`; it is destroyed when the owner is.
pub fn create_component<H: SceneHost>(
    registry: &LifecycleRegistry,
    host: &H,
    object: &H::Object,
) -> Result<H::Visual, SceneError> {
    registry.try_create_tracked(|| host.create_mesh_visual(object))
}

/// Creates an unnamed child of `parent`; it is destroyed when the owner is.
///
/// The child is parented before it is tracked, so a failed re-parent leaves
/// nothing behind in the registry (the host object is released right away).
pub fn create_scene_object<H: SceneHost>(
    registry: &LifecycleRegistry,
    host: &H,
    parent: &H::Object,
) -> Result<H::Object, SceneError> {
    registry.try_create_tracked(|| {
        let child = host.create_scene_object("")?;
        if let Err(e) = child.set_parent(parent) {
            child.destroy();
            return Err(e);
        }
        Ok(child)
    })
}
