//! # Lifecycle registry - destruction-scoped object tracker.
//!
//! The registry records every object created on behalf of an owner and destroys
//! them when the owner's [`TeardownSignal`] fires:
//! - `create_tracked` / `try_create_tracked` / `register` → append to the tracked list
//! - `wrap_callback` / `guard_future` → work that becomes a no-op after teardown
//! - teardown (signal listener or a direct `teardown()` call) → destroy everything once
//!
//! ## Architecture
//! ```text
//! owner ──► create_tracked(factory) ──► handle (returned unchanged)
//!                                        └──► tracked: [A, B, C, ...]
//!
//! TeardownSignal.fire() ──► listener ──► teardown()
//!                                          ├─► alive = false (callbacks go inert)
//!                                          ├─► publish TeardownRequested
//!                                          ├─► for entry in tracked (registration order):
//!                                          │     ├─ invalid   → TrackedSkipped
//!                                          │     ├─ destroy() → TrackedDestroyed
//!                                          │     └─ panicked  → DestroyPanicked
//!                                          └─► publish TeardownCompleted
//! ```
//!
//! ## Rules
//! - The tracked list is append-only while alive and drained exactly once.
//! - Destruction runs first-registered, first-destroyed.
//! - Invalid entries and panicking destructors never abort the sequence.
//! - Teardown is idempotent; only the first trigger does any work.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use super::callback::{Liveness, SafeCallback};
use super::destructible::Destructible;
use super::signal::TeardownSignal;
use crate::error::LifecycleError;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::panic_message;

/// A tracked entry: the registry's own clone of a handle.
struct Tracked {
    index: usize,
    label: Arc<str>,
    handle: Box<dyn Destructible>,
}

/// Outcome of the (single) teardown pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownReport {
    /// Entries whose `destroy()` completed.
    pub destroyed: usize,
    /// Entries already invalid at teardown.
    pub skipped: usize,
    /// Entries whose `destroy()` panicked.
    pub panicked: usize,
}

impl TeardownReport {
    /// Total number of entries visited.
    pub fn visited(&self) -> usize {
        self.destroyed + self.skipped + self.panicked
    }
}

/// Registry of objects owned by a single owner.
pub struct LifecycleRegistry {
    owner: Arc<str>,
    liveness: Arc<Liveness>,
    tracked: Mutex<Vec<Tracked>>,
    bus: Bus,
    done: CancellationToken,
}

impl LifecycleRegistry {
    /// Creates a registry bound to `signal`.
    ///
    /// Call [`spawn_listener`](Self::spawn_listener) to run teardown when the
    /// signal fires, or call [`teardown`](Self::teardown) from a synchronous host.
    pub fn new(owner: impl Into<Arc<str>>, signal: TeardownSignal, bus: Bus) -> Arc<Self> {
        Arc::new(Self {
            owner: owner.into(),
            liveness: Arc::new(Liveness::new(signal)),
            tracked: Mutex::new(Vec::new()),
            bus,
            done: CancellationToken::new(),
        })
    }

    /// Spawns the task that runs teardown once the signal fires.
    ///
    /// Call once; must be called from within a Tokio runtime.
    pub fn spawn_listener(self: Arc<Self>) {
        let signal = self.liveness.signal().clone();
        tokio::spawn(async move {
            signal.fired().await;
            self.teardown();
        });
    }

    /// Name of the owner this registry belongs to.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns `true` until teardown (or until the signal fires).
    pub fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Signal this registry is bound to.
    pub fn signal(&self) -> &TeardownSignal {
        self.liveness.signal()
    }

    /// Wraps `f` so that it only runs while the registry is alive.
    ///
    /// Works after teardown too: the returned callback is then inert from the start.
    pub fn wrap_callback<F>(&self, f: F) -> SafeCallback<F> {
        SafeCallback::new(Arc::clone(&self.liveness), f)
    }

    /// Runs `fut` unless teardown happens first.
    ///
    /// Resolves to `None` if the registry is torn down before or while `fut` runs;
    /// in the latter case `fut` is dropped at its current await point.
    pub fn guard_future<Fut>(
        &self,
        fut: Fut,
    ) -> impl Future<Output = Option<Fut::Output>> + use<Fut>
    where
        Fut: Future,
    {
        let liveness = Arc::clone(&self.liveness);
        async move {
            if !liveness.is_alive() {
                return None;
            }
            tokio::select! {
                biased;
                _ = liveness.signal().fired() => None,
                out = fut => liveness.is_alive().then_some(out),
            }
        }
    }

    /// Builds an object with `factory`, tracks it and returns it unchanged.
    ///
    /// ### Errors
    /// [`LifecycleError::TornDown`] if the registry is no longer alive. The factory
    /// is not invoked in that case. If teardown races with the factory, the fresh
    /// object is destroyed immediately and the same error is returned.
    pub fn create_tracked<H, F>(&self, factory: F) -> Result<H, LifecycleError>
    where
        H: Destructible + Clone,
        F: FnOnce() -> H,
    {
        self.try_create_tracked(|| Ok::<_, LifecycleError>(factory()))
    }

    /// Fallible variant of [`create_tracked`](Self::create_tracked).
    ///
    /// Nothing is tracked when the factory fails.
    pub fn try_create_tracked<H, E, F>(&self, factory: F) -> Result<H, E>
    where
        H: Destructible + Clone,
        E: From<LifecycleError>,
        F: FnOnce() -> Result<H, E>,
    {
        if !self.is_alive() {
            return Err(self.reject().into());
        }
        let handle = factory()?;
        self.register(handle).map_err(E::from)
    }

    /// Tracks an already-built handle and returns it unchanged.
    ///
    /// ### Errors
    /// [`LifecycleError::TornDown`] if the registry is no longer alive; the handle is
    /// destroyed right away (if still valid) so it cannot outlive its owner.
    pub fn register<H>(&self, handle: H) -> Result<H, LifecycleError>
    where
        H: Destructible + Clone,
    {
        let entry: Box<dyn Destructible> = Box::new(handle.clone());
        let label: Arc<str> = Arc::from(entry.label());

        let index = {
            let mut tracked = self.lock_tracked();
            // Checked under the lock: teardown flips the flag before draining.
            if !self.is_alive() {
                drop(tracked);
                if entry.is_valid() {
                    entry.destroy();
                }
                return Err(self.reject());
            }
            let index = tracked.len();
            tracked.push(Tracked {
                index,
                label: Arc::clone(&label),
                handle: entry,
            });
            index
        };

        self.bus.publish(
            Event::new(EventKind::TrackedRegistered)
                .with_owner(Arc::clone(&self.owner))
                .with_object(label)
                .with_index(index),
        );
        Ok(handle)
    }

    /// Runs the teardown sequence.
    ///
    /// Returns `None` if teardown already ran (idempotent), otherwise a report of
    /// what happened to each tracked entry.
    pub fn teardown(&self) -> Option<TeardownReport> {
        if !self.liveness.kill() {
            return None;
        }

        let entries = std::mem::take(&mut *self.lock_tracked());
        self.bus.publish(
            Event::new(EventKind::TeardownRequested)
                .with_owner(Arc::clone(&self.owner))
                .with_index(entries.len()),
        );

        let mut report = TeardownReport::default();
        for entry in entries {
            let ev = if !entry.handle.is_valid() {
                report.skipped += 1;
                Event::new(EventKind::TrackedSkipped)
            } else {
                let handle = &entry.handle;
                match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handle.destroy())) {
                    Ok(()) => {
                        report.destroyed += 1;
                        Event::new(EventKind::TrackedDestroyed)
                    }
                    Err(panic_err) => {
                        report.panicked += 1;
                        Event::new(EventKind::DestroyPanicked)
                            .with_reason(panic_message(panic_err.as_ref()))
                    }
                }
            };
            self.bus.publish(
                ev.with_owner(Arc::clone(&self.owner))
                    .with_object(entry.label)
                    .with_index(entry.index),
            );
        }

        self.bus.publish(
            Event::new(EventKind::TeardownCompleted).with_owner(Arc::clone(&self.owner)),
        );
        self.done.cancel();
        Some(report)
    }

    /// Completes once the teardown sequence has finished.
    pub async fn torn_down(&self) {
        self.done.cancelled().await
    }

    /// Returns `true` once the teardown sequence has finished.
    pub fn is_torn_down(&self) -> bool {
        self.done.is_cancelled()
    }

    /// Number of currently tracked entries (zero after teardown).
    pub fn len(&self) -> usize {
        self.lock_tracked().len()
    }

    /// True if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.lock_tracked().is_empty()
    }

    /// Labels of tracked entries, in registration order.
    pub fn labels(&self) -> Vec<Arc<str>> {
        self.lock_tracked()
            .iter()
            .map(|t| Arc::clone(&t.label))
            .collect()
    }

    // ---------------------------
    // Helpers
    // ---------------------------

    fn lock_tracked(&self) -> MutexGuard<'_, Vec<Tracked>> {
        self.tracked.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reject(&self) -> LifecycleError {
        let err = LifecycleError::TornDown {
            owner: Arc::clone(&self.owner),
        };
        self.bus.publish(
            Event::new(EventKind::RegisterRejected)
                .with_owner(Arc::clone(&self.owner))
                .with_reason(err.as_label()),
        );
        err
    }
}

impl std::fmt::Debug for LifecycleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleRegistry")
            .field("owner", &self.owner)
            .field("alive", &self.is_alive())
            .field("tracked", &self.len())
            .finish()
    }
}
