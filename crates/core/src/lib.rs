//! Core errors and constants shared by the `rolegate` crates.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing the failure modes of configuration loading, authorization
//!   guards and calls against the identity management API.
//! - **`constants`**: Environment variable names and default limits shared
//!   between the configuration loader and the request scheduler.

pub mod constants;
pub mod errors;

pub use self::{
    constants::*,
    errors::{Error, Result, ResultExt},
};
