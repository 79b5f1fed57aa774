//! Startup configuration for rolegate
//!
//! Resolves the role map and the management API rate limits once, from
//! built-in defaults, an optional JSON policy file and environment
//! variables. The result is immutable for the rest of the process.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{PolicyFile, RolegateConfig};
