//! # scenekeeper
//!
//! **scenekeeper** ties the lifetime of scene resources to the script that
//! created them.
//!
//! A script (the *owner*) creates scene objects and components through a
//! [`LifecycleRegistry`]. When the owner is destroyed, its one-shot
//! [`TeardownSignal`] fires, every tracked object is destroyed exactly once in
//! registration order, and every callback the owner handed out goes inert.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   MeshVisualScript::setup()          other script code
//!            │                                │
//!            ▼                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Owner (one per script instance)                                  │
//! │  - TeardownSignal (one-shot, CancellationToken)                   │
//! │  - LifecycleRegistry (tracked: [A, B, C, ...], alive flag)        │
//! │  - Bus (broadcast lifecycle events)                               │
//! │  - SubscriberSet (fans out to user subscribers)                   │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!  create_tracked()   wrap_callback()    guard_future()
//!  (handle returned   (no-op after       (None after
//!   unchanged)         teardown)          teardown)
//!
//! Teardown:
//!   signal.fire() ─► registry listener ─► teardown()
//!                      ├─► alive = false
//!                      ├─► destroy A, B, C (skip invalid, survive panics)
//!                      └─► TeardownCompleted ─► Bus ─► SubscriberSet ─► sub.on_event()
//! ```
//!
//! ## Features
//! | Area              | Description                                                       | Key types / traits                              |
//! |-------------------|-------------------------------------------------------------------|-------------------------------------------------|
//! | **Lifecycle**     | Track objects per owner; destroy them once at teardown.           | [`LifecycleRegistry`], [`Destructible`]         |
//! | **Callbacks**     | Callbacks and futures that go inert after teardown.               | [`SafeCallback`], [`LifecycleRegistry::guard_future`] |
//! | **Owner**         | Wires signal, registry, bus and subscribers together.             | [`Owner`], [`OwnerBuilder`], [`Config`]         |
//! | **Subscriber API**| Hook into lifecycle events (logging, audits).                     | [`Subscribe`], [`SubscriberSet`]                |
//! | **Scene seams**   | Host traits for scene objects and mesh visuals.                   | [`SceneHost`], [`SceneObject`], [`MeshVisual`]  |
//! | **Scripts**       | Mesh visual with live-editable render order and shadow settings.  | [`MeshVisualScript`], [`MeshVisualConfig`]      |
//! | **Errors**        | Typed errors with stable labels.                                  | [`LifecycleError`], [`SceneError`]              |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//! - `memory-host`: exposes `scene::memory::MemoryHost`, an in-memory host.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use scenekeeper::{Config, OnDestroy, Owner, Subscribe};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     #[cfg(feature = "logging")]
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(scenekeeper::LogWriter::new())];
//!     #[cfg(not(feature = "logging"))]
//!     let subs: Vec<Arc<dyn Subscribe>> = Vec::new();
//!
//!     let owner = Owner::builder(Config::named("pumpkin"))
//!         .with_subscribers(subs)
//!         .build();
//!
//!     let registry = owner.registry();
//!     let glow = registry
//!         .create_tracked(|| OnDestroy::arc("glow", || println!("glow released")))
//!         .expect("owner is alive");
//!     let on_frame = registry.wrap_callback(|dt: f32| dt * 2.0);
//!
//!     assert_eq!(on_frame.call(0.5), Some(1.0));
//!
//!     owner.shutdown().await;
//!
//!     assert_eq!(on_frame.call(0.5), None);
//!     assert!(!scenekeeper::Destructible::is_valid(&glow));
//! }
//! ```
mod error;
mod events;
mod lifecycle;
mod owner;
mod subscribers;

pub mod scene;
pub mod script;

// ---- Public re-exports ----

pub use error::{LifecycleError, SceneError};
pub use events::{Bus, Event, EventKind};
pub use lifecycle::{
    Destructible, LifecycleRegistry, OnDestroy, SafeCallback, TeardownReport, TeardownSignal,
};
pub use owner::{Config, Owner, OwnerBuilder};
pub use scene::{MeshVisual, SceneHost, SceneObject};
pub use script::{MeshVisualConfig, MeshVisualScript};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
