//! # Scene scripts built on the lifecycle registry.
//!
//! - [`MeshVisualScript`] - mesh visual with live-editable render order and shadow settings
//! - [`MeshVisualConfig`], [`FloatRange`] - typed editor inputs

mod config;
mod mesh_visual;

pub use config::{FloatRange, MeshVisualConfig, SHADOW_DENSITY_RANGE};
pub use mesh_visual::MeshVisualScript;
