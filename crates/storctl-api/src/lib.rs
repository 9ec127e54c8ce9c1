#![warn(missing_docs)]

//! storctl API subsystem: typed REST client for the storage cluster control plane

pub mod client;
pub mod error;
pub mod error_kind;
pub mod reference;
pub mod types;

pub use client::{normalize_version, BasicAuth, Client, DEFAULT_PORT, DEFAULT_VERSION_STR};
pub use error::{ApiError, Result};
pub use error_kind::{ErrorKind, UnknownErrorKind};
pub use reference::Reference;
