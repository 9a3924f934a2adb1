//! # Editor inputs for the mesh visual script.
//!
//! [`MeshVisualConfig`] is the typed form of the values an editor binds at
//! script instantiation. Range-constrained inputs carry a [`FloatRange`] that
//! clamps and snaps values the same way the editor slider would.

use crate::scene::{MaterialId, MeshId, TextureId};

/// Inclusive slider range with a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
    /// Snap increment; `0.0` disables snapping.
    pub step: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamps `value` into the range and snaps it to the nearest step.
    ///
    /// NaN maps to `min`.
    pub fn apply(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let min = f64::from(self.min);
        let step = f64::from(self.step);
        let steps = ((f64::from(clamped) - min) / step).round();
        // 250 steps of 0.001 must land exactly on 0.25.
        let per_unit = (1.0 / step).round();
        let snapped = if (1.0 / step - per_unit).abs() < 1e-3 {
            min + steps / per_unit
        } else {
            min + steps * step
        };
        (snapped as f32).clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Slider bounds of the `shadow_density` input.
pub const SHADOW_DENSITY_RANGE: FloatRange = FloatRange::new(0.0, 1.0, 0.001);

/// Inputs of the mesh visual script.
///
/// ## Field semantics
/// - `material`: template material; the script binds a clone of it
/// - `params_texture`: material-parameters texture (usually plain white)
/// - `render_order`: default `0`
/// - `use_shadow`: default `true`
/// - `shadow_density`: default `1.0`, only applied when `use_shadow` is set
#[derive(Clone, Debug, PartialEq)]
pub struct MeshVisualConfig {
    pub mesh: MeshId,
    pub texture: TextureId,
    pub material: MaterialId,
    pub params_texture: TextureId,
    pub render_order: i32,
    pub use_shadow: bool,
    pub shadow_density: f32,
}

impl MeshVisualConfig {
    /// Creates a config with the required assets and default settings.
    pub fn new(
        mesh: impl Into<MeshId>,
        texture: impl Into<TextureId>,
        material: impl Into<MaterialId>,
        params_texture: impl Into<TextureId>,
    ) -> Self {
        Self {
            mesh: mesh.into(),
            texture: texture.into(),
            material: material.into(),
            params_texture: params_texture.into(),
            render_order: 0,
            use_shadow: true,
            shadow_density: 1.0,
        }
    }

    pub fn with_render_order(mut self, order: i32) -> Self {
        self.render_order = order;
        self
    }

    pub fn with_shadow(mut self, enabled: bool) -> Self {
        self.use_shadow = enabled;
        self
    }

    /// Sets the shadow density, clamped and snapped to [`SHADOW_DENSITY_RANGE`].
    pub fn with_shadow_density(mut self, density: f32) -> Self {
        self.shadow_density = SHADOW_DENSITY_RANGE.apply(density);
        self
    }

    /// Shadow density as it will be applied (clamped and snapped).
    pub fn effective_shadow_density(&self) -> f32 {
        SHADOW_DENSITY_RANGE.apply(self.shadow_density)
    }
}
