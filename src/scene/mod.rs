//! # Scene seams to the host application.
//!
//! The host provides the scene graph, assets and renderer; this module only
//! names what scripts need from it:
//! - [`SceneHost`], [`SceneObject`], [`MeshVisual`] - host traits
//! - [`MeshId`], [`TextureId`], [`MaterialId`], [`ShadowMode`], [`Rgba`] - value types
//! - [`create_component`], [`create_scene_object`] - owner-scoped creation
//! - `memory` (feature `memory-host`) - in-memory host for tests and demos

mod host;
mod scoped;
mod types;

#[cfg(any(test, feature = "memory-host"))]
pub mod memory;

pub use host::{MeshVisual, SceneHost, SceneObject};
pub use scoped::{create_component, create_scene_object};
pub use types::{MaterialId, MeshId, Rgba, ShadowMode, TextureId};
