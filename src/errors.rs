use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::ServiceCode;

/// Error type for vocabulary lookups, resource IO, and configuration failures.
///
/// Malformed input lines and unknown vocabulary codes are not errors: the
/// record parser drops or tracks them without producing a value of this type.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A vocabulary lookup for a code that is not registered.
    #[error("service code {code} is not part of the vocabulary")]
    UnknownCode { code: ServiceCode },
    /// A file could not be opened, read, or written.
    #[error("resource '{}' is unavailable: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A news document without a title and lead.
    #[error("document '{}' cannot be extracted: {reason}", path.display())]
    Document { path: PathBuf, reason: String },
    /// IO failure without an associated path.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Invalid layout, policy, or other settings.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl PrepError {
    /// Wrap an IO failure with the path that produced it.
    pub fn resource(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Resource {
            path: path.into(),
            source,
        }
    }
}
