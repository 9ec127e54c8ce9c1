//! Classified categories of remote failures.
//!
//! Every [`ErrorKind`] has a compact integer code used in-process and a stable
//! string tag used on the wire. The tag table is declared statically in
//! [`ErrorKind::ALL`] and indexed once on first use.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Returned when a string tag does not name any declared [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode error kind {0:?}")]
pub struct UnknownErrorKind(pub String);

/// Closed set of error categories reported by the cluster API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum ErrorKind {
    /// The server did not classify the failure.
    UnknownError = 0,
    /// The referenced resource does not exist.
    NotFoundError = 1,
    /// A resource with the same reference already exists.
    AlreadyExistsError = 2,
    /// The request was rejected by server-side validation.
    InvalidInputError = 3,
    /// The request carried no credentials, or the credentials were rejected.
    UnauthorizedError = 4,
    /// The authenticated user lacks the required role.
    PermissionDeniedError = 5,
    /// The resource is in a state that does not allow the operation.
    ConflictError = 6,
    /// The control plane cannot serve the request right now.
    UnavailableError = 7,
    /// The control plane failed while handling the request.
    InternalError = 8,
}

impl ErrorKind {
    /// Every declared kind, ordered by code.
    pub const ALL: [ErrorKind; 9] = [
        ErrorKind::UnknownError,
        ErrorKind::NotFoundError,
        ErrorKind::AlreadyExistsError,
        ErrorKind::InvalidInputError,
        ErrorKind::UnauthorizedError,
        ErrorKind::PermissionDeniedError,
        ErrorKind::ConflictError,
        ErrorKind::UnavailableError,
        ErrorKind::InternalError,
    ];

    /// Integer representation.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Looks a kind up by its integer code.
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Stable wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnknownError => "UnknownError",
            ErrorKind::NotFoundError => "NotFoundError",
            ErrorKind::AlreadyExistsError => "AlreadyExistsError",
            ErrorKind::InvalidInputError => "InvalidInputError",
            ErrorKind::UnauthorizedError => "UnauthorizedError",
            ErrorKind::PermissionDeniedError => "PermissionDeniedError",
            ErrorKind::ConflictError => "ConflictError",
            ErrorKind::UnavailableError => "UnavailableError",
            ErrorKind::InternalError => "InternalError",
        }
    }

    /// Best-effort classification from an HTTP status when the response body
    /// carries no tag.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorKind::InvalidInputError,
            401 => ErrorKind::UnauthorizedError,
            403 => ErrorKind::PermissionDeniedError,
            404 => ErrorKind::NotFoundError,
            409 => ErrorKind::ConflictError,
            503 => ErrorKind::UnavailableError,
            500..=599 => ErrorKind::InternalError,
            _ => ErrorKind::UnknownError,
        }
    }
}

fn tag_index() -> &'static HashMap<&'static str, ErrorKind> {
    static INDEX: OnceLock<HashMap<&'static str, ErrorKind>> = OnceLock::new();
    INDEX.get_or_init(|| ErrorKind::ALL.iter().map(|k| (k.as_str(), *k)).collect())
}

impl FromStr for ErrorKind {
    type Err = UnknownErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        tag_index()
            .get(s)
            .copied()
            .ok_or_else(|| UnknownErrorKind(s.to_string()))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(de::Error::custom)
    }
}
