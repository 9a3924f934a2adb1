//! # Event subscribers for owners.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out and
//! built-in implementations for handling lifecycle events broadcast through the
//! [`Bus`](crate::Bus).
//!
//! ## Architecture
//! ```text
//! LifecycleRegistry ── publish(Event) ──► Bus ──► Owner listener ──► SubscriberSet
//!                                                                       │
//!                                                             ┌─────────┼─────────┐
//!                                                             ▼         ▼         ▼
//!                                                         LogWriter   Audit    Custom
//! ```

mod embedded;
mod set;
mod subscriber;

pub use set::SubscriberSet;
pub use subscriber::Subscribe;

pub(crate) use set::panic_message;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
