//! # Owner-scoped lifecycle management.
//!
//! - [`LifecycleRegistry`] - tracks objects created on behalf of an owner and destroys them at teardown
//! - [`TeardownSignal`] - the owner's one-shot "destroyed" event
//! - [`Destructible`] - capability required from tracked objects
//! - [`OnDestroy`] - closure-backed [`Destructible`]
//! - [`SafeCallback`] - callback that goes inert after teardown

mod callback;
mod destructible;
mod registry;
mod signal;

pub use callback::SafeCallback;
pub use destructible::{Destructible, OnDestroy};
pub use registry::{LifecycleRegistry, TeardownReport};
pub use signal::TeardownSignal;
