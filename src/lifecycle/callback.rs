//! # Teardown-guarded callbacks.
//!
//! [`SafeCallback`] wraps a closure so that it only runs while the owning
//! registry is alive. Once the teardown signal fires, every call is a silent
//! no-op returning `None`; there is no way to revive it.
//!
//! Arguments are passed as a single value; use a tuple for several and `()`
//! for none:
//! ```rust
//! use scenekeeper::{Bus, LifecycleRegistry, TeardownSignal};
//!
//! let signal = TeardownSignal::new();
//! let registry = LifecycleRegistry::new("script", signal.clone(), Bus::default());
//!
//! let on_tap = registry.wrap_callback(|(x, y): (f32, f32)| x + y);
//! assert_eq!(on_tap.call((1.0, 2.0)), Some(3.0));
//!
//! registry.teardown();
//! assert_eq!(on_tap.call((1.0, 2.0)), None);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::signal::TeardownSignal;

/// Alive flag shared by a registry and the callbacks it produced.
#[derive(Debug)]
pub(crate) struct Liveness {
    alive: AtomicBool,
    signal: TeardownSignal,
}

impl Liveness {
    pub(crate) fn new(signal: TeardownSignal) -> Self {
        Self {
            alive: AtomicBool::new(true),
            signal,
        }
    }

    /// Alive until the flag flips or the signal fires, whichever is observed first.
    pub(crate) fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire) && !self.signal.is_fired()
    }

    /// Flips the flag; returns `true` only for the first caller.
    pub(crate) fn kill(&self) -> bool {
        let first = self.alive.swap(false, Ordering::AcqRel);
        self.signal.fire();
        first
    }

    pub(crate) fn signal(&self) -> &TeardownSignal {
        &self.signal
    }
}

/// Callback that forwards to its inner closure only while the registry is alive.
pub struct SafeCallback<F> {
    liveness: Arc<Liveness>,
    f: F,
}

impl<F> SafeCallback<F> {
    pub(crate) fn new(liveness: Arc<Liveness>, f: F) -> Self {
        Self { liveness, f }
    }

    /// Returns `true` while calls are still forwarded.
    pub fn is_live(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Invokes the inner closure if alive; otherwise does nothing and returns `None`.
    pub fn call<A, R>(&self, args: A) -> Option<R>
    where
        F: Fn(A) -> R,
    {
        if self.liveness.is_alive() {
            Some((self.f)(args))
        } else {
            None
        }
    }

    /// Like [`call`](Self::call) for closures that mutate captured state.
    pub fn call_mut<A, R>(&mut self, args: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        if self.liveness.is_alive() {
            Some((self.f)(args))
        } else {
            None
        }
    }

    /// Converts into a plain closure, e.g. to hand to an API that takes `impl Fn`.
    pub fn into_fn<A, R>(self) -> impl Fn(A) -> Option<R> + Send + Sync
    where
        F: Fn(A) -> R + Send + Sync,
    {
        move |args| self.call(args)
    }
}

impl<F: Clone> Clone for SafeCallback<F> {
    fn clone(&self) -> Self {
        Self {
            liveness: Arc::clone(&self.liveness),
            f: self.f.clone(),
        }
    }
}

impl<F> std::fmt::Debug for SafeCallback<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeCallback")
            .field("live", &self.is_live())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_until_killed() {
        let liveness = Arc::new(Liveness::new(TeardownSignal::new()));
        let mut count = 0;
        let mut cb = SafeCallback::new(liveness.clone(), |n: i32| {
            count += n;
            count
        });

        assert_eq!(cb.call_mut(2), Some(2));
        assert!(liveness.kill());
        assert!(!liveness.kill());
        assert_eq!(cb.call_mut(5), None);
        assert!(!cb.is_live());
    }

    #[test]
    fn fired_signal_suppresses_before_flag_flips() {
        let signal = TeardownSignal::new();
        let liveness = Arc::new(Liveness::new(signal.clone()));
        let cb = SafeCallback::new(liveness, |()| 1);

        signal.fire();
        assert_eq!(cb.call(()), None);
    }

    #[test]
    fn into_fn_keeps_guard() {
        let liveness = Arc::new(Liveness::new(TeardownSignal::new()));
        let f = SafeCallback::new(liveness.clone(), |n: usize| n * 2).into_fn();
        assert_eq!(f(3), Some(6));
        liveness.kill();
        assert_eq!(f(3), None);
    }
}
