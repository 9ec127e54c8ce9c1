//! Errors returned by the API client.

use thiserror::Error;

use crate::error_kind::{ErrorKind, UnknownErrorKind};

/// Failures of the API client, local and remote.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Not of the form `namespace/name`.
    #[error("invalid reference {reference:?}: expected namespace/name")]
    InvalidReference {
        /// Input as given.
        reference: String,
    },

    /// A bare name where a scoped reference is required.
    #[error("reference {reference:?} has no namespace")]
    MissingNamespace {
        /// Input as given.
        reference: String,
    },

    /// Name contains characters the control plane rejects.
    #[error("invalid name {name:?}: only letters, digits, '-', '_' and '.' are allowed")]
    InvalidName {
        /// Rejected name.
        name: String,
    },

    /// Client address or API version is unusable.
    #[error("invalid API address {addr:?}: {reason}")]
    InvalidUrl {
        /// Address or version as given.
        addr: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("{kind} ({status}): {message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Classification taken from the body, or from the status when absent.
        kind: ErrorKind,
        /// Server-provided message.
        message: String,
    },

    /// Transport failure before a response was read.
    #[error("cannot reach API at {addr}: {source}")]
    Http {
        /// Base address of the client.
        addr: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Response body did not match the expected shape.
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Error body carried a kind tag this client does not know.
    #[error(transparent)]
    UnknownKind(#[from] UnknownErrorKind),
}

impl ApiError {
    /// Classified kind of a remote failure; `None` for local errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::Remote { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result alias for API calls.
pub type Result<T> = std::result::Result<T, ApiError>;
