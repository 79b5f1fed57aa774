//! Extension traits for error handling

use super::types::{Error, Result};

/// Prefix an error with what was being attempted when it occurred.
///
/// Variants that carry a message keep their variant, so callers can still
/// match on them. `FileSystem` and `Timeout` have no message to extend and
/// become `Configuration` errors describing the original failure.
pub trait ResultExt<T> {
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Like [`context`](Self::context), building the message only on error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        let message: String = message.into();
        self.map_err(|e| Into::<Error>::into(e).prefixed(&message))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Into::<Error>::into(e).prefixed(&f()))
    }
}

impl Error {
    fn prefixed(self, context: &str) -> Error {
        let prefix = |message: String| format!("{context}: {message}");
        match self {
            Error::Configuration { message } => Error::Configuration {
                message: prefix(message),
            },
            Error::Json { message, source } => Error::Json {
                message: prefix(message),
                source,
            },
            Error::PermissionDenied { operation, message } => Error::PermissionDenied {
                operation,
                message: prefix(message),
            },
            Error::Upstream {
                message,
                status_text,
                retry_after,
            } => Error::Upstream {
                message: prefix(message),
                status_text,
                retry_after,
            },
            Error::Scheduler { message } => Error::Scheduler {
                message: prefix(message),
            },
            other @ (Error::FileSystem { .. } | Error::Timeout { .. }) => {
                Error::Configuration {
                    message: prefix(other.to_string()),
                }
            }
        }
    }
}
