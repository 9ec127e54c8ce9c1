//! Errors surfaced to the operator.

use std::path::PathBuf;

use storctl_api::ApiError;
use thiserror::Error;

use crate::credentials::StoreError;
use crate::env::ENV_HOST;

/// Everything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    /// More than one `-H` was given.
    #[error("please specify only one host (got {0})")]
    MultipleHosts(usize),

    /// No host from flags or the environment.
    #[error("no host configured: set one with -H/--host or the {} environment variable", ENV_HOST)]
    NoHost,

    /// `login` found no host anywhere.
    #[error("no setting found for host")]
    NoHostSetting,

    /// A flag and its positional form were both given.
    #[error("conflicting options: either specify --{flag} or provide a positional argument, not both")]
    ConflictingArgs {
        /// Flag name without dashes.
        flag: &'static str,
    },

    /// Host string could not be parsed.
    #[error("invalid host {host:?}: {reason}")]
    InvalidHost {
        /// Host as given.
        host: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A required flag is missing.
    #[error("please provide a --{0}")]
    MissingFlag(&'static str),

    /// The server rejected the credentials during `login`.
    #[error("failed to verify credentials ({0})")]
    VerificationFailed(#[source] ApiError),

    /// Local validation failed; details went to stderr.
    #[error("input failed verification")]
    InputVerification,

    /// Malformed `--format` template.
    #[error("invalid format template: {0}")]
    Template(String),

    /// Config file unreadable.
    #[error("config file {}: {reason}", path.display())]
    Config {
        /// File that failed.
        path: PathBuf,
        /// Read or parse failure.
        reason: String,
    },

    /// Credential store failure.
    #[error("credential store: {0}")]
    CredentialStore(#[from] StoreError),

    /// Remote or transport failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Local I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON encoding failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the CLI.
pub type Result<T> = std::result::Result<T, CliError>;
