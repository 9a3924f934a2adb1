//! # Host scene seams.
//!
//! The scene graph, assets and renderer belong to the host application. These
//! traits name the handful of operations the crate needs from it; handles are
//! cheap clones of host objects and every call may fail with
//! [`SceneError::ObjectDestroyed`] once the host has released the object.

use super::types::{MaterialId, MeshId, Rgba, ShadowMode, TextureId};
use crate::error::SceneError;
use crate::lifecycle::Destructible;

/// Scene object handle (a node in the host's scene graph).
pub trait SceneObject: Destructible + Clone {
    /// Object name as shown in the host.
    fn name(&self) -> String;

    /// Re-parents this object under `parent`.
    fn set_parent(&self, parent: &Self) -> Result<(), SceneError>;
}

/// Render-mesh visual component attached to a scene object.
///
/// Setters take `&self`: the handle refers to host-owned state.
pub trait MeshVisual: Destructible + Clone {
    fn set_mesh(&self, mesh: &MeshId) -> Result<(), SceneError>;

    fn set_main_material(&self, material: &MaterialId) -> Result<(), SceneError>;

    /// Base color texture of the main pass.
    fn set_base_texture(&self, texture: &TextureId) -> Result<(), SceneError>;

    /// Material-parameters texture of the main pass.
    fn set_params_texture(&self, texture: &TextureId) -> Result<(), SceneError>;

    fn shadow_mode(&self) -> Result<ShadowMode, SceneError>;

    fn set_shadow_mode(&self, mode: ShadowMode) -> Result<(), SceneError>;

    fn set_shadow_color(&self, color: Rgba) -> Result<(), SceneError>;

    fn shadow_density(&self) -> Result<f32, SceneError>;

    fn set_shadow_density(&self, density: f32) -> Result<(), SceneError>;

    fn render_order(&self) -> Result<i32, SceneError>;

    fn set_render_order(&self, order: i32) -> Result<(), SceneError>;
}

/// Host application entry points.
pub trait SceneHost: Send + Sync {
    type Object: SceneObject;
    type Visual: MeshVisual;

    /// Creates a new, unparented scene object.
    fn create_scene_object(&self, name: &str) -> Result<Self::Object, SceneError>;

    /// Attaches a new mesh visual component to `object`.
    fn create_mesh_visual(&self, object: &Self::Object) -> Result<Self::Visual, SceneError>;

    /// Returns an independent copy of `material`.
    fn clone_material(&self, material: &MaterialId) -> Result<MaterialId, SceneError>;
}
