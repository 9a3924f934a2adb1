//! # In-memory scene host.
//!
//! [`MemoryHost`] implements the host seams with plain maps so that scripts can
//! run without a real engine (tests, demos). It keeps a journal of destroy calls
//! in the order they happened.
//!
//! Host semantics mirrored here:
//! - destroying a scene object also destroys its components and children;
//! - every call on a destroyed handle fails with [`SceneError::ObjectDestroyed`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::host::{MeshVisual, SceneHost, SceneObject};
use super::types::{MaterialId, MeshId, Rgba, ShadowMode, TextureId};
use crate::error::SceneError;
use crate::lifecycle::Destructible;

#[derive(Debug)]
struct ObjectRecord {
    name: String,
    parent: Option<u64>,
}

/// Snapshot of a mesh visual's host-side state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualRecord {
    /// Id of the scene object the visual is attached to.
    pub object: u64,
    pub mesh: Option<MeshId>,
    pub material: Option<MaterialId>,
    pub base_texture: Option<TextureId>,
    pub params_texture: Option<TextureId>,
    pub shadow_mode: ShadowMode,
    pub shadow_color: Rgba,
    pub shadow_density: f32,
    pub render_order: i32,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    objects: HashMap<u64, ObjectRecord>,
    visuals: HashMap<u64, VisualRecord>,
    journal: Vec<String>,
    material_clones: u64,
}

impl State {
    fn alloc(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn remove_visual(&mut self, id: u64) {
        if self.visuals.remove(&id).is_some() {
            self.journal.push(format!("visual#{id}"));
        }
    }

    fn remove_object(&mut self, id: u64) {
        let Some(record) = self.objects.remove(&id) else {
            return;
        };
        self.journal.push(format!("object#{id}:{}", record.name));

        let mut visuals: Vec<u64> = self
            .visuals
            .iter()
            .filter(|(_, v)| v.object == id)
            .map(|(vid, _)| *vid)
            .collect();
        visuals.sort_unstable();
        for vid in visuals {
            self.remove_visual(vid);
        }

        let mut children: Vec<u64> = self
            .objects
            .iter()
            .filter(|(_, o)| o.parent == Some(id))
            .map(|(cid, _)| *cid)
            .collect();
        children.sort_unstable();
        for cid in children {
            self.remove_object(cid);
        }
    }
}

type Shared = Arc<Mutex<State>>;

fn lock(state: &Shared) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory host.
#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    state: Shared,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy calls performed so far, in order (`object#<id>:<name>`, `visual#<id>`).
    pub fn journal(&self) -> Vec<String> {
        lock(&self.state).journal.clone()
    }

    /// Current state of a visual, or `None` once it is destroyed.
    pub fn visual(&self, visual: &MemoryVisual) -> Option<VisualRecord> {
        lock(&self.state).visuals.get(&visual.id).cloned()
    }

    /// Parent id of an object, if it exists and has one.
    pub fn parent_of(&self, object: &MemoryObject) -> Option<u64> {
        lock(&self.state).objects.get(&object.id).and_then(|o| o.parent)
    }

    pub fn object_count(&self) -> usize {
        lock(&self.state).objects.len()
    }

    pub fn visual_count(&self) -> usize {
        lock(&self.state).visuals.len()
    }
}

impl SceneHost for MemoryHost {
    type Object = MemoryObject;
    type Visual = MemoryVisual;

    fn create_scene_object(&self, name: &str) -> Result<MemoryObject, SceneError> {
        let mut st = lock(&self.state);
        let id = st.alloc();
        st.objects.insert(
            id,
            ObjectRecord {
                name: name.to_string(),
                parent: None,
            },
        );
        Ok(MemoryObject {
            id,
            state: Arc::clone(&self.state),
        })
    }

    fn create_mesh_visual(&self, object: &MemoryObject) -> Result<MemoryVisual, SceneError> {
        let mut st = lock(&self.state);
        if !st.objects.contains_key(&object.id) {
            return Err(SceneError::ObjectDestroyed {
                what: "scene object",
            });
        }
        let id = st.alloc();
        st.visuals.insert(
            id,
            VisualRecord {
                object: object.id,
                ..VisualRecord::default()
            },
        );
        Ok(MemoryVisual {
            id,
            state: Arc::clone(&self.state),
        })
    }

    fn clone_material(&self, material: &MaterialId) -> Result<MaterialId, SceneError> {
        let mut st = lock(&self.state);
        st.material_clones += 1;
        Ok(MaterialId::new(format!(
            "{material}#clone{}",
            st.material_clones
        )))
    }
}

/// Scene object handle of [`MemoryHost`].
#[derive(Clone, Debug)]
pub struct MemoryObject {
    id: u64,
    state: Shared,
}

impl MemoryObject {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Destructible for MemoryObject {
    fn destroy(&self) {
        lock(&self.state).remove_object(self.id);
    }

    fn is_valid(&self) -> bool {
        lock(&self.state).objects.contains_key(&self.id)
    }

    fn label(&self) -> &str {
        "scene_object"
    }
}

impl SceneObject for MemoryObject {
    fn name(&self) -> String {
        lock(&self.state)
            .objects
            .get(&self.id)
            .map(|o| o.name.clone())
            .unwrap_or_default()
    }

    fn set_parent(&self, parent: &Self) -> Result<(), SceneError> {
        let mut st = lock(&self.state);
        if !st.objects.contains_key(&parent.id) {
            return Err(SceneError::ObjectDestroyed {
                what: "parent scene object",
            });
        }
        match st.objects.get_mut(&self.id) {
            Some(o) => {
                o.parent = Some(parent.id);
                Ok(())
            }
            None => Err(SceneError::ObjectDestroyed {
                what: "scene object",
            }),
        }
    }
}

/// Mesh visual handle of [`MemoryHost`].
#[derive(Clone, Debug)]
pub struct MemoryVisual {
    id: u64,
    state: Shared,
}

impl MemoryVisual {
    fn with<T>(&self, f: impl FnOnce(&mut VisualRecord) -> T) -> Result<T, SceneError> {
        let mut st = lock(&self.state);
        st.visuals
            .get_mut(&self.id)
            .map(f)
            .ok_or(SceneError::ObjectDestroyed {
                what: "mesh visual",
            })
    }
}

impl Destructible for MemoryVisual {
    fn destroy(&self) {
        lock(&self.state).remove_visual(self.id);
    }

    fn is_valid(&self) -> bool {
        lock(&self.state).visuals.contains_key(&self.id)
    }

    fn label(&self) -> &str {
        "mesh_visual"
    }
}

impl MeshVisual for MemoryVisual {
    fn set_mesh(&self, mesh: &MeshId) -> Result<(), SceneError> {
        self.with(|v| v.mesh = Some(mesh.clone()))
    }

    fn set_main_material(&self, material: &MaterialId) -> Result<(), SceneError> {
        self.with(|v| v.material = Some(material.clone()))
    }

    fn set_base_texture(&self, texture: &TextureId) -> Result<(), SceneError> {
        self.with(|v| v.base_texture = Some(texture.clone()))
    }

    fn set_params_texture(&self, texture: &TextureId) -> Result<(), SceneError> {
        self.with(|v| v.params_texture = Some(texture.clone()))
    }

    fn shadow_mode(&self) -> Result<ShadowMode, SceneError> {
        self.with(|v| v.shadow_mode)
    }

    fn set_shadow_mode(&self, mode: ShadowMode) -> Result<(), SceneError> {
        self.with(|v| v.shadow_mode = mode)
    }

    fn set_shadow_color(&self, color: Rgba) -> Result<(), SceneError> {
        self.with(|v| v.shadow_color = color)
    }

    fn shadow_density(&self) -> Result<f32, SceneError> {
        self.with(|v| v.shadow_density)
    }

    fn set_shadow_density(&self, density: f32) -> Result<(), SceneError> {
        self.with(|v| v.shadow_density = density)
    }

    fn render_order(&self) -> Result<i32, SceneError> {
        self.with(|v| v.render_order)
    }

    fn set_render_order(&self, order: i32) -> Result<(), SceneError> {
        self.with(|v| v.render_order = order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destroying_object_takes_components_and_children() {
        let host = MemoryHost::new();
        let root = host.create_scene_object("root").unwrap();
        let child = host.create_scene_object("child").unwrap();
        child.set_parent(&root).unwrap();
        let visual = host.create_mesh_visual(&child).unwrap();

        root.destroy();

        assert!(!child.is_valid());
        assert!(!visual.is_valid());
        assert_eq!(host.object_count(), 0);
        assert_eq!(
            host.journal(),
            vec![
                format!("object#{}:root", root.id()),
                format!("object#{}:child", child.id()),
                format!("visual#{}", visual.id),
            ]
        );
    }

    #[test]
    fn calls_on_destroyed_visual_fail() {
        let host = MemoryHost::new();
        let obj = host.create_scene_object("obj").unwrap();
        let visual = host.create_mesh_visual(&obj).unwrap();
        visual.destroy();

        let err = visual.render_order().unwrap_err();
        assert!(err.is_destroyed());
        assert!(host.visual(&visual).is_none());
    }

    #[test]
    fn material_clones_are_distinct() {
        let host = MemoryHost::new();
        let base = MaterialId::new("pbr");
        let a = host.clone_material(&base).unwrap();
        let b = host.clone_material(&base).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "pbr#clone1");
    }
}
