//! # Owner: the script instance whose destruction triggers cleanup.
//!
//! The [`Owner`] owns the event bus, a [`SubscriberSet`] (inside its forwarding
//! task), the teardown signal and the [`LifecycleRegistry`].
//!
//! ## High-level architecture
//! ```text
//! OwnerBuilder::build():
//!   - Bus::new(cfg.bus_capacity)
//!   - LifecycleRegistry::new(name, signal, bus)
//!   - subscriber_listener(): Bus.subscribe() ─► SubscriberSet::emit(&Event)   (until torn down)
//!   - registry.spawn_listener()
//!
//! Script code:
//!   owner.registry().create_tracked(..) ─► handle (tracked)
//!   owner.registry().wrap_callback(..)  ─► SafeCallback
//!
//! Teardown path:
//!   owner.destroy()  (or the host fires the bound TeardownSignal)
//!        └─► registry listener ─► LifecycleRegistry::teardown()
//!                                   └─► TrackedDestroyed ... TeardownCompleted ─► Bus
//!
//! owner.shutdown().await:
//!   destroy ─► torn_down ─► forwarder drains queued events ─► SubscriberSet::shutdown
//!
//! drop(owner):
//!   fires the signal; listener and forwarder finish on their own
//! ```
//!
//! ## Example
//! ```rust
//! use scenekeeper::{Config, OnDestroy, Owner};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let owner = Owner::builder(Config::named("pumpkin")).build();
//!
//!     owner
//!         .registry()
//!         .create_tracked(|| OnDestroy::arc("glow", || println!("glow released")))
//!         .expect("owner is alive");
//!
//!     owner.shutdown().await;
//!     assert!(owner.is_destroyed());
//! }
//! ```

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::{Config, OwnerBuilder};
use crate::events::{Bus, Event};
use crate::lifecycle::{LifecycleRegistry, TeardownSignal};
use crate::subscribers::SubscriberSet;

/// Bus → subscribers forwarding task.
pub(super) struct Forwarder {
    bus: Bus,
    join: JoinHandle<()>,
}

/// Owner scope: one registry, one teardown signal, one event stream.
pub struct Owner {
    /// Owner configuration.
    cfg: Config,
    registry: Arc<LifecycleRegistry>,
    signal: TeardownSignal,
    bus: Bus,
    forward_join: Mutex<Option<JoinHandle<()>>>,
}

impl Owner {
    /// Returns a builder for an owner with the given configuration.
    pub fn builder(cfg: Config) -> OwnerBuilder {
        OwnerBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        cfg: Config,
        registry: Arc<LifecycleRegistry>,
        signal: TeardownSignal,
        forward: Forwarder,
    ) -> Self {
        Self {
            cfg,
            registry,
            signal,
            bus: forward.bus,
            forward_join: Mutex::new(Some(forward.join)),
        }
    }

    /// Subscribes to the bus and forwards events to the subscriber set (fire-and-forget).
    ///
    /// Stops once `torn_down` completes, after draining what teardown published.
    pub(super) fn subscriber_listener<F>(bus: &Bus, set: SubscriberSet, torn_down: F) -> Forwarder
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut rx = bus.subscribe();

        let join = tokio::spawn(async move {
            tokio::pin!(torn_down);
            loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Ok(ev) => set.emit(&ev),
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    _ = &mut torn_down => break,
                }
            }
            while let Ok(ev) = rx.try_recv() {
                set.emit(&ev);
            }
            set.shutdown().await;
        });

        Forwarder {
            bus: bus.clone(),
            join,
        }
    }

    /// Owner configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Owner name.
    pub fn name(&self) -> &str {
        &self.cfg.name
    }

    /// Registry tracking everything created on behalf of this owner.
    pub fn registry(&self) -> &Arc<LifecycleRegistry> {
        &self.registry
    }

    /// Teardown signal this owner is bound to.
    pub fn teardown_signal(&self) -> TeardownSignal {
        self.signal.clone()
    }

    /// Creates a receiver for subsequent lifecycle events of this owner.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Fires the one-shot teardown signal.
    ///
    /// Wrapped callbacks go inert immediately; tracked objects are destroyed by the
    /// registry listener. Use [`torn_down`](Self::torn_down) to wait for that.
    pub fn destroy(&self) {
        self.signal.fire();
    }

    /// Returns `true` once the teardown signal has fired.
    pub fn is_destroyed(&self) -> bool {
        self.signal.is_fired()
    }

    /// Completes once every tracked object has been visited by teardown.
    pub async fn torn_down(&self) {
        self.registry.torn_down().await
    }

    /// Destroys the owner, waits for teardown and drains subscribers.
    ///
    /// Safe to call more than once; later calls only wait.
    pub async fn shutdown(&self) {
        self.destroy();
        self.torn_down().await;

        let join = self
            .forward_join
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(join) = join {
            let _ = join.await;
        }
    }
}

/// Dropping an owner destroys it.
impl Drop for Owner {
    fn drop(&mut self) {
        self.signal.fire();
    }
}

impl std::fmt::Debug for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Owner")
            .field("name", &self.cfg.name)
            .field("destroyed", &self.is_destroyed())
            .field("registry", &self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::events::EventKind;
    use crate::lifecycle::{Destructible, OnDestroy};
    use crate::subscribers::Subscribe;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, ev: &Event) {
            self.seen.lock().unwrap().push(ev.kind);
        }
    }

    #[tokio::test]
    async fn shutdown_destroys_tracked_and_flushes_subscribers() {
        let rec = Arc::new(Recorder::default());
        let owner = Owner::builder(Config::named("lantern"))
            .with_subscribers(vec![rec.clone() as Arc<dyn Subscribe>])
            .build();
        let mut events = owner.events();

        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        owner
            .registry()
            .create_tracked(move || {
                OnDestroy::arc("flame", move || {
                    h.fetch_add(1, Ordering::SeqCst);
                })
            })
            .unwrap();

        owner.shutdown().await;
        owner.shutdown().await;

        let expected = vec![
            EventKind::TrackedRegistered,
            EventKind::TeardownRequested,
            EventKind::TrackedDestroyed,
            EventKind::TeardownCompleted,
        ];
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(owner.is_destroyed());
        assert_eq!(*rec.seen.lock().unwrap(), expected);

        let mut on_bus = Vec::new();
        while let Ok(ev) = events.try_recv() {
            assert_eq!(ev.owner.as_deref(), Some("lantern"));
            on_bus.push(ev.kind);
        }
        assert_eq!(on_bus, expected);
    }

    #[tokio::test]
    async fn dropping_the_owner_tears_down_and_releases_the_registry() {
        let rec = Arc::new(Recorder::default());
        let owner = Owner::builder(Config::named("candle"))
            .with_subscribers(vec![rec.clone() as Arc<dyn Subscribe>])
            .build();

        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let wick = owner
            .registry()
            .create_tracked(move || {
                OnDestroy::arc("wick", move || {
                    h.fetch_add(1, Ordering::SeqCst);
                })
            })
            .unwrap();
        let registry = Arc::clone(owner.registry());

        drop(owner);
        registry.torn_down().await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!wick.is_valid());
        assert!(!registry.is_alive());

        // Listener and forwarder exit and drop their registry handles.
        for _ in 0..100 {
            if Arc::strong_count(&registry) == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(Arc::strong_count(&registry), 1);
        assert_eq!(
            rec.seen.lock().unwrap().last(),
            Some(&EventKind::TeardownCompleted)
        );
    }

    #[tokio::test]
    async fn host_signal_drives_teardown() {
        let signal = TeardownSignal::new();
        let owner = Owner::builder(Config::default())
            .with_signal(signal.clone())
            .build();
        let cb = owner.registry().wrap_callback(|()| "tick");

        assert_eq!(cb.call(()), Some("tick"));
        signal.fire();
        assert_eq!(cb.call(()), None);

        owner.torn_down().await;
        assert!(owner.registry().is_torn_down());
        assert!(owner.is_destroyed());
    }
}
