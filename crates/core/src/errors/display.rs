//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
            Error::PermissionDenied { operation, message } => {
                write!(f, "permission denied for {operation}: {message}")
            }
            Error::Upstream {
                message,
                status_text,
                ..
            } => match status_text {
                Some(status) => write!(f, "{message} ({status})"),
                None => write!(f, "{message}"),
            },
            Error::Scheduler { message } => {
                write!(f, "request scheduler error: {message}")
            }
            Error::Timeout {
                operation,
                duration,
            } => {
                write!(f, "operation '{operation}' timed out after {duration:?}")
            }
        }
    }
}
