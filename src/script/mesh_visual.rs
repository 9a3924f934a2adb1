//! # Mesh visual script.
//!
//! Attaches a render-mesh visual to a scene object, binds its assets and shadow
//! settings, and exposes `render_order`, `use_shadow` and `shadow_density` as
//! live-editable properties.
//!
//! ## Setup
//! ```text
//! setup(registry, host, object, cfg)
//!   ├─► create_component(registry, host, object)   (tracked, destroyed with the owner)
//!   ├─► mesh, clone_material(cfg.material), base texture, params texture
//!   ├─► use_shadow ? (Caster, SHADOW_BLACK, density) : None
//!   └─► render_order
//! ```
//!
//! ## Accessors
//! Getters return `None` and setters do nothing once the visual is gone
//! (destroyed by teardown or by the host). They never fail.

use super::config::{MeshVisualConfig, SHADOW_DENSITY_RANGE};
use crate::error::SceneError;
use crate::lifecycle::LifecycleRegistry;
use crate::scene::{MeshVisual, Rgba, SceneHost, ShadowMode, create_component};

/// Live handle to the configured visual.
#[derive(Clone, Debug)]
pub struct MeshVisualScript<V> {
    visual: V,
}

impl<V: MeshVisual> MeshVisualScript<V> {
    /// Creates and configures the visual on `object`.
    ///
    /// ### Errors
    /// Host failures while creating or configuring the visual. A visual that was
    /// created before the failure stays tracked and is released at teardown.
    pub fn setup<H>(
        registry: &LifecycleRegistry,
        host: &H,
        object: &H::Object,
        cfg: &MeshVisualConfig,
    ) -> Result<Self, SceneError>
    where
        H: SceneHost<Visual = V>,
    {
        let visual = create_component(registry, host, object)?;

        visual.set_mesh(&cfg.mesh)?;
        visual.set_main_material(&host.clone_material(&cfg.material)?)?;
        visual.set_base_texture(&cfg.texture)?;
        visual.set_params_texture(&cfg.params_texture)?;

        if cfg.use_shadow {
            visual.set_shadow_mode(ShadowMode::Caster)?;
            visual.set_shadow_color(Rgba::SHADOW_BLACK)?;
            visual.set_shadow_density(cfg.effective_shadow_density())?;
        } else {
            visual.set_shadow_mode(ShadowMode::None)?;
        }

        visual.set_render_order(cfg.render_order)?;

        Ok(Self { visual })
    }

    /// Underlying visual handle.
    pub fn visual(&self) -> &V {
        &self.visual
    }

    /// `true` while the visual still exists.
    pub fn is_attached(&self) -> bool {
        self.visual.is_valid()
    }

    pub fn render_order(&self) -> Option<i32> {
        self.read(|v| v.render_order())
    }

    pub fn set_render_order(&self, order: i32) {
        self.write(|v| v.set_render_order(order));
    }

    /// `Some(true)` iff the visual casts shadows.
    pub fn use_shadow(&self) -> Option<bool> {
        self.read(|v| v.shadow_mode()).map(ShadowMode::is_caster)
    }

    /// Switches the shadow mode only; color and density keep their last values.
    pub fn set_use_shadow(&self, enabled: bool) {
        self.write(|v| v.set_shadow_mode(ShadowMode::from_enabled(enabled)));
    }

    pub fn shadow_density(&self) -> Option<f32> {
        self.read(|v| v.shadow_density())
    }

    /// Sets the density, clamped and snapped to the editor slider range.
    pub fn set_shadow_density(&self, density: f32) {
        let density = SHADOW_DENSITY_RANGE.apply(density);
        self.write(|v| v.set_shadow_density(density));
    }

    fn read<T>(&self, f: impl FnOnce(&V) -> Result<T, SceneError>) -> Option<T> {
        if !self.visual.is_valid() {
            return None;
        }
        f(&self.visual).ok()
    }

    fn write(&self, f: impl FnOnce(&V) -> Result<(), SceneError>) {
        if self.visual.is_valid() {
            let _ = f(&self.visual);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Bus;
    use crate::lifecycle::{Destructible, TeardownSignal};
    use crate::scene::memory::MemoryHost;
    use crate::scene::{MaterialId, MeshId, SceneObject, TextureId, create_scene_object};

    fn cfg() -> MeshVisualConfig {
        MeshVisualConfig::new("bat.mesh", "bat.png", "unlit", "white")
            .with_render_order(3)
            .with_shadow_density(0.25)
    }

    fn registry() -> std::sync::Arc<LifecycleRegistry> {
        LifecycleRegistry::new("bat", TeardownSignal::new(), Bus::new(64))
    }

    #[test]
    fn setup_binds_assets_and_shadow() {
        let host = MemoryHost::new();
        let reg = registry();
        let obj = host.create_scene_object("bat").unwrap();

        let script = MeshVisualScript::setup(&reg, &host, &obj, &cfg()).unwrap();
        let rec = host.visual(script.visual()).unwrap();

        assert_eq!(rec.object, obj.id());
        assert_eq!(rec.mesh, Some(MeshId::new("bat.mesh")));
        assert_eq!(rec.base_texture, Some(TextureId::new("bat.png")));
        assert_eq!(rec.params_texture, Some(TextureId::new("white")));
        assert_eq!(rec.material, Some(MaterialId::new("unlit#clone1")));
        assert_eq!(rec.shadow_mode, ShadowMode::Caster);
        assert_eq!(rec.shadow_color, Rgba::SHADOW_BLACK);
        assert_eq!(rec.shadow_density, 0.25);
        assert_eq!(rec.render_order, 3);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn setup_without_shadow_leaves_density_alone() {
        let host = MemoryHost::new();
        let reg = registry();
        let obj = host.create_scene_object("bat").unwrap();

        let script =
            MeshVisualScript::setup(&reg, &host, &obj, &cfg().with_shadow(false)).unwrap();
        let rec = host.visual(script.visual()).unwrap();

        assert_eq!(rec.shadow_mode, ShadowMode::None);
        assert_eq!(rec.shadow_density, 0.0);
        assert_eq!(script.use_shadow(), Some(false));
    }

    #[test]
    fn accessors_forward_to_the_visual() {
        let host = MemoryHost::new();
        let reg = registry();
        let obj = host.create_scene_object("bat").unwrap();
        let script = MeshVisualScript::setup(&reg, &host, &obj, &cfg()).unwrap();

        script.set_render_order(-1);
        assert_eq!(script.render_order(), Some(-1));

        script.set_use_shadow(false);
        assert_eq!(script.use_shadow(), Some(false));
        script.set_use_shadow(true);
        assert_eq!(script.use_shadow(), Some(true));

        script.set_shadow_density(4.0);
        assert_eq!(script.shadow_density(), Some(1.0));
    }

    #[test]
    fn accessors_return_sentinel_after_teardown() {
        let host = MemoryHost::new();
        let reg = registry();
        let obj = host.create_scene_object("bat").unwrap();
        let script = MeshVisualScript::setup(&reg, &host, &obj, &cfg()).unwrap();

        reg.teardown();

        assert!(!script.is_attached());
        assert_eq!(script.render_order(), None);
        assert_eq!(script.use_shadow(), None);
        assert_eq!(script.shadow_density(), None);
        script.set_render_order(9);
        script.set_shadow_density(0.5);
        assert_eq!(host.visual_count(), 0);
        // the host object itself was not created through the registry
        assert!(obj.is_valid());
    }

    #[test]
    fn host_side_destroy_is_tolerated_by_accessors_and_teardown() {
        let host = MemoryHost::new();
        let reg = registry();
        let root = host.create_scene_object("root").unwrap();
        let child = create_scene_object(&reg, &host, &root).unwrap();
        let script = MeshVisualScript::setup(&reg, &host, &child, &cfg()).unwrap();
        assert_eq!(host.parent_of(&child), Some(root.id()));
        assert_eq!(child.name(), "");

        // the host drops the whole subtree on its own
        root.destroy();
        assert_eq!(script.render_order(), None);

        let report = reg.teardown().unwrap();
        assert_eq!(report.skipped, 2);
        assert_eq!(report.destroyed, 0);
    }

    #[test]
    fn setup_after_teardown_is_rejected() {
        let host = MemoryHost::new();
        let reg = registry();
        let obj = host.create_scene_object("bat").unwrap();
        reg.teardown();

        let err = MeshVisualScript::setup(&reg, &host, &obj, &cfg()).unwrap_err();
        assert_eq!(err.as_label(), "lifecycle_torn_down");
        assert_eq!(host.visual_count(), 0);
    }
}
