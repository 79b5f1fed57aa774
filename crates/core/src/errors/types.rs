//! Core error type definitions

use std::path::PathBuf;
use std::time::Duration;

/// Result type alias for rolegate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for rolegate operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    Configuration { message: String },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Authorization check rejected the actor
    PermissionDenied { operation: String, message: String },

    /// Failure reported by the identity management API
    Upstream {
        message: String,
        status_text: Option<String>,
        retry_after: Option<Duration>,
    },

    /// The request scheduler could not deliver a result
    Scheduler { message: String },

    /// Operation timeout errors
    Timeout { operation: String, duration: Duration },
}
