//! # Built-in subscribers
//!
//! - [`LogWriter`]: prints events in a human-readable form (demo/debug).

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
