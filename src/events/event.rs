//! # Lifecycle events emitted by owners and their registries.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Tracking events**: objects entering the registry (registered, rejected)
//! - **Teardown events**: the one-shot destruction sequence (requested, destroyed, skipped, completed)
//! - **Subscriber events**: delivery problems inside the fan-out (overflow, panic)
//!
//! The [`Event`] struct carries additional metadata such as timestamps, owner
//! name, object label, registration index and reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use scenekeeper::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TrackedDestroyed)
//!     .with_owner("pumpkin")
//!     .with_object("mesh_visual")
//!     .with_index(2);
//!
//! assert_eq!(ev.kind, EventKind::TrackedDestroyed);
//! assert_eq!(ev.owner.as_deref(), Some("pumpkin"));
//! assert_eq!(ev.index, Some(2));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `object`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `object`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    // === Tracking events ===
    /// An object was appended to the registry.
    ///
    /// Sets:
    /// - `owner`: owner name
    /// - `object`: object label
    /// - `index`: registration index (0-based)
    TrackedRegistered,

    /// A tracked creation was refused because the owner is torn down.
    ///
    /// Sets:
    /// - `owner`: owner name
    /// - `reason`: `lifecycle_torn_down`
    RegisterRejected,

    // === Teardown events ===
    /// The owner's teardown signal fired; the registry is no longer alive.
    ///
    /// Sets:
    /// - `owner`: owner name
    /// - `index`: number of tracked objects about to be destroyed
    TeardownRequested,

    /// A tracked object received its `destroy()` call.
    ///
    /// Sets:
    /// - `owner`, `object`, `index`
    TrackedDestroyed,

    /// A tracked object was already invalid at teardown and was skipped.
    ///
    /// Sets:
    /// - `owner`, `object`, `index`
    TrackedSkipped,

    /// A tracked object's `destroy()` panicked; the sequence continued.
    ///
    /// Sets:
    /// - `owner`, `object`, `index`
    /// - `reason`: panic message
    DestroyPanicked,

    /// Every tracked object has been visited.
    ///
    /// Sets:
    /// - `owner`: owner name
    TeardownCompleted,
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the owner, if applicable.
    pub owner: Option<Arc<str>>,
    /// Label of the tracked object (or subscriber name).
    pub object: Option<Arc<str>>,
    /// Registration index, or entry count for `TeardownRequested`.
    pub index: Option<usize>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            owner: None,
            object: None,
            index: None,
            reason: None,
        }
    }

    /// Attaches an owner name.
    #[inline]
    pub fn with_owner(mut self, owner: impl Into<Arc<str>>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Attaches an object label.
    #[inline]
    pub fn with_object(mut self, object: impl Into<Arc<str>>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Attaches a registration index.
    #[inline]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_object(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_object(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }

    #[inline]
    pub fn is_teardown_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::TeardownRequested
                | EventKind::TrackedDestroyed
                | EventKind::TrackedSkipped
                | EventKind::DestroyPanicked
                | EventKind::TeardownCompleted
        )
    }
}
