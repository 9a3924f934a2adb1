//! # Example: mesh_visual
//!
//! Attaches a mesh visual to a scene object, edits its properties live, then
//! destroys the owner and shows that everything it created is gone.
//!
//! ## Flow
//! ```text
//! Owner::builder().with_subscribers([LogWriter]).build()
//!     ├─► MeshVisualScript::setup()         → [registered] mesh_visual
//!     ├─► create_scene_object() (child)     → [registered] scene_object
//!     ├─► set_render_order / set_shadow_density
//!     └─► owner.shutdown()
//!          ├─► [teardown-requested]
//!          ├─► [destroyed] mesh_visual, scene_object
//!          └─► [teardown-completed]
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example mesh_visual --features logging,memory-host
//! ```

use std::sync::Arc;

use scenekeeper::scene::memory::MemoryHost;
use scenekeeper::scene::create_scene_object;
use scenekeeper::{
    Config, LogWriter, MeshVisualConfig, MeshVisualScript, Owner, SceneHost, Subscribe,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Host and the object the script is attached to
    let host = MemoryHost::new();
    let pumpkin = host.create_scene_object("pumpkin")?;

    // 2. Owner scope for the script instance
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let owner = Owner::builder(Config::named("pumpkin-script"))
        .with_subscribers(subs)
        .build();

    // 3. Editor inputs
    let cfg = MeshVisualConfig::new("pumpkin.mesh", "pumpkin_albedo", "pbr", "white")
        .with_render_order(2)
        .with_shadow_density(0.8);

    // 4. Setup: visual is tracked by the owner's registry
    let script = MeshVisualScript::setup(owner.registry(), &host, &pumpkin, &cfg)?;
    let _stem = create_scene_object(owner.registry(), &host, &pumpkin)?;

    // 5. Live edits
    script.set_render_order(5);
    script.set_shadow_density(0.3333);
    println!(
        "[script] render_order={:?} use_shadow={:?} shadow_density={:?}",
        script.render_order(),
        script.use_shadow(),
        script.shadow_density()
    );

    // 6. Owner destroyed: tracked objects go away, accessors return None
    owner.shutdown().await;
    println!(
        "[script] after teardown: render_order={:?} visuals={} objects={}",
        script.render_order(),
        host.visual_count(),
        host.object_count()
    );
    Ok(())
}
