//! Shared utilities for rolegate
//!
//! This crate provides the request scheduler that throttles and retries
//! calls against the identity management API, along with tracing setup
//! used by every binary in the workspace.

pub mod network;
pub mod tracing;

pub use network::*;
