//! # Destructible objects and a function-backed destructor.
//!
//! [`Destructible`] is the one capability the registry needs from tracked objects:
//! a `destroy()` call and a validity check so already-gone objects can be skipped.
//! [`OnDestroy`] wraps a closure for ad-hoc cleanup that has no host object behind it.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use scenekeeper::{Destructible, OnDestroy};
//!
//! let flag = Arc::new(AtomicBool::new(false));
//! let f = flag.clone();
//! let d = OnDestroy::new("flag", move || f.store(true, Ordering::SeqCst));
//!
//! assert_eq!(d.label(), "flag");
//! d.destroy();
//! assert!(flag.load(Ordering::SeqCst));
//! assert!(!d.is_valid());
//! ```

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// # Something the registry can destroy at teardown.
///
/// Handles are usually cheap clones of a host object (scene object, component);
/// the registry keeps its own clone and calls `destroy()` on it exactly once,
/// provided [`is_valid`](Destructible::is_valid) still holds at teardown.
pub trait Destructible: Send + Sync + 'static {
    /// Releases the underlying object.
    fn destroy(&self);

    /// Returns `false` once the object is gone (destroyed by any path).
    ///
    /// Defaults to `true` for objects that cannot be invalidated externally.
    fn is_valid(&self) -> bool {
        true
    }

    /// Returns a short label used in lifecycle events.
    fn label(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<T: Destructible + ?Sized> Destructible for Arc<T> {
    fn destroy(&self) {
        (**self).destroy()
    }

    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

impl<T: Destructible + ?Sized> Destructible for Box<T> {
    fn destroy(&self) {
        (**self).destroy()
    }

    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

/// Function-backed destructor.
///
/// Runs its closure on the first `destroy()` call; later calls are no-ops and
/// [`is_valid`](Destructible::is_valid) reports `false` afterwards.
pub struct OnDestroy<F> {
    label: Cow<'static, str>,
    done: AtomicBool,
    f: F,
}

impl<F> OnDestroy<F>
where
    F: Fn() + Send + Sync + 'static,
{
    /// Creates a new function-backed destructor.
    pub fn new(label: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            label: label.into(),
            done: AtomicBool::new(false),
            f,
        }
    }

    /// Creates the destructor and returns it as a shared handle.
    pub fn arc(label: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(label, f))
    }
}

impl<F> Destructible for OnDestroy<F>
where
    F: Fn() + Send + Sync + 'static,
{
    fn destroy(&self) {
        if !self.done.swap(true, Ordering::AcqRel) {
            (self.f)();
        }
    }

    fn is_valid(&self) -> bool {
        !self.done.load(Ordering::Acquire)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl<F> std::fmt::Debug for OnDestroy<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnDestroy")
            .field("label", &self.label)
            .field("done", &self.done.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn on_destroy_runs_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let d = OnDestroy::arc("counter", move || {
            h.fetch_add(1, Ordering::SeqCst);
        });

        d.destroy();
        d.destroy();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!d.is_valid());
    }

    #[test]
    fn arc_forwards_label() {
        let d: Arc<dyn Destructible> = OnDestroy::arc("light", || {});
        assert_eq!(d.label(), "light");
        assert!(d.is_valid());
    }
}
