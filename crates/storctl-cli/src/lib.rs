#![warn(missing_docs)]

//! storctl CLI subsystem: operator commands, session bootstrap, credential store, inspection dispatch

pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod endpoint;
pub mod env;
pub mod error;
pub mod format;
pub mod inspect;
pub mod logging;
pub mod prompt;
pub mod reference;
pub mod session;

pub use cli::{Cli, GlobalOptions};
pub use commands::Terminal;
pub use config::ConfigFile;
pub use credentials::{Credential, CredentialStore};
pub use endpoint::Endpoint;
pub use env::EnvDefaults;
pub use error::{CliError, Result};
pub use session::Session;
