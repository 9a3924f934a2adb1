//! # Owner configuration.
//!
//! Provides [`Config`] settings for an [`Owner`](crate::Owner) scope.
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1 by the bus

use std::sync::Arc;

/// Configuration for a single owner scope.
///
/// ## Field semantics
/// - `name`: owner name stamped on every event (`Event::owner`)
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
#[derive(Clone, Debug)]
pub struct Config {
    /// Name of the owner (script instance).
    pub name: Arc<str>,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` messages skip older items.
    pub bus_capacity: usize,
}

impl Config {
    /// Creates a config with the given owner name and default capacity.
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `name = "owner"`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            name: Arc::from("owner"),
            bus_capacity: 1024,
        }
    }
}
