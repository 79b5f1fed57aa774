//! Conversions from the error types of the crates rolegate builds on

use super::types::Error;
use std::path::PathBuf;

/// I/O failures without a known path; prefer [`Error::file_system`] where
/// the path is at hand
impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "io".to_string(),
            source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json {
            message: source.to_string(),
            source,
        }
    }
}
