use std::sync::Arc;

use super::{Config, Owner};
use crate::{
    events::Bus,
    lifecycle::{LifecycleRegistry, TeardownSignal},
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for constructing an [`Owner`] with optional subscribers.
pub struct OwnerBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    signal: Option<TeardownSignal>,
}

impl OwnerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            signal: None,
        }
    }

    /// Sets event subscribers for observability.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Binds the owner to an existing teardown signal, e.g. one fired by the host.
    ///
    /// Without this a fresh signal is created; fire it with [`Owner::destroy`].
    pub fn with_signal(mut self, signal: TeardownSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Builds the owner.
    ///
    /// This consumes the builder and initializes:
    /// - the event bus
    /// - subscriber workers and the bus → subscribers listener
    /// - the registry and its teardown listener
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build(self) -> Arc<Owner> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = SubscriberSet::new(self.subscribers, bus.clone());
        let signal = self.signal.unwrap_or_default();

        let registry =
            LifecycleRegistry::new(Arc::clone(&self.cfg.name), signal.clone(), bus.clone());

        // Subscribe before the registry can publish anything.
        let done = Arc::clone(&registry);
        let forward =
            Owner::subscriber_listener(&bus, subs, async move { done.torn_down().await });
        Arc::clone(&registry).spawn_listener();

        Arc::new(Owner::new_internal(self.cfg, registry, signal, forward))
    }
}
