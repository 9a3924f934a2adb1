//! Owner scope: configuration, builder and the owner itself.
//!
//! Internal modules:
//! - [`config`]: owner settings (name, bus capacity);
//! - [`builder`]: wires bus, subscribers, signal and registry;
//! - [`owner`]: the scope handle scripts hold on to.

mod builder;
mod config;
#[allow(clippy::module_inception)]
mod owner;

pub use builder::OwnerBuilder;
pub use config::Config;
pub use owner::Owner;
