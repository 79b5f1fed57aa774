//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;
use std::time::Duration;

impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a permission denied error
    #[must_use]
    pub fn permission_denied(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::PermissionDenied {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an upstream API error carrying only a message
    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Error::Upstream {
            message: message.into(),
            status_text: None,
            retry_after: None,
        }
    }

    /// Create an upstream API error from an HTTP status and its headers.
    ///
    /// `retry_after` is the raw `Retry-After` value in seconds, if the
    /// response carried one.
    #[must_use]
    pub fn upstream_status(
        message: impl Into<String>,
        status_text: impl Into<String>,
        retry_after: Option<Duration>,
    ) -> Self {
        Error::Upstream {
            message: message.into(),
            status_text: Some(status_text.into()),
            retry_after,
        }
    }

    /// Create a scheduler delivery error
    #[must_use]
    pub fn scheduler(message: impl Into<String>) -> Self {
        Error::Scheduler {
            message: message.into(),
        }
    }

    /// Create a timeout error
    #[must_use]
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Whether the error is an authorization denial
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::PermissionDenied { .. })
    }
}
