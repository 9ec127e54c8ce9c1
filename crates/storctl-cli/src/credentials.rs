//! Credential storage and per-invocation credential resolution.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use tracing::debug;

use crate::config::{AuthConfig, ConfigFile};
use crate::endpoint::Endpoint;
use crate::env::EnvDefaults;

/// Failures of a [`CredentialStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Nothing stored for the key.
    #[error("no credentials stored for {0}")]
    NotFound(String),

    /// Key is not `host:port`.
    #[error("invalid credential key {0:?}: expected host:port")]
    InvalidKey(String),

    /// Stored entry cannot be decoded.
    #[error("malformed credentials for {server}: {reason}")]
    Malformed {
        /// Key of the entry.
        server: String,
        /// Decoding failure.
        reason: String,
    },
}

/// Username and password for one session.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    /// Login name.
    pub username: String,
    /// Sent as HTTP basic auth.
    pub password: String,
}

impl Credential {
    /// Pairs a username with its password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are set; only complete credentials are attached to a session.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Persistent credential storage keyed by `host:port`.
pub trait CredentialStore {
    /// Credential stored for `server`.
    fn get(&self, server: &str) -> Result<Credential, StoreError>;
    /// Replaces the entry for `server`.
    fn store(&mut self, server: &str, credential: &Credential) -> Result<(), StoreError>;
}

fn validate_key(server: &str) -> Result<(), StoreError> {
    match server.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => Ok(()),
        _ => Err(StoreError::InvalidKey(server.to_string())),
    }
}

fn encode_auth(credential: &Credential) -> String {
    STANDARD.encode(format!("{}:{}", credential.username, credential.password))
}

fn decode_auth(server: &str, auth: &str) -> Result<Credential, StoreError> {
    let malformed = |reason: String| StoreError::Malformed {
        server: server.to_string(),
        reason,
    };
    let bytes = STANDARD.decode(auth).map_err(|e| malformed(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| malformed(e.to_string()))?;
    let (username, password) = text
        .split_once(':')
        .ok_or_else(|| malformed("missing ':' separator".to_string()))?;
    Ok(Credential::new(username, password))
}

/// The config file doubles as the default credential store.
impl CredentialStore for ConfigFile {
    fn get(&self, server: &str) -> Result<Credential, StoreError> {
        validate_key(server)?;
        let entry = self
            .auths
            .get(server)
            .ok_or_else(|| StoreError::NotFound(server.to_string()))?;
        decode_auth(server, &entry.auth)
    }

    fn store(&mut self, server: &str, credential: &Credential) -> Result<(), StoreError> {
        validate_key(server)?;
        self.auths.insert(
            server.to_string(),
            AuthConfig {
                auth: encode_auth(credential),
            },
        );
        Ok(())
    }
}

/// Resolves the credential for this invocation.
///
/// The stored entry for the endpoint is used when present; any lookup failure
/// falls back to the environment. Non-empty explicit values then override
/// each field independently. Never fails: an incomplete result means the
/// session runs unauthenticated.
pub fn resolve_credential(
    explicit_user: &str,
    explicit_pass: &str,
    endpoint: Option<&Endpoint>,
    store: &dyn CredentialStore,
    env: &EnvDefaults,
) -> Credential {
    let from_env = || Credential::new(env.username.clone(), env.password.clone());

    let mut credential = match endpoint {
        Some(endpoint) => {
            let key = endpoint.credential_key();
            match store.get(&key) {
                Ok(credential) => {
                    debug!(server = %key, "using stored credentials");
                    credential
                }
                Err(e) => {
                    debug!(server = %key, error = %e, "credential lookup failed, using environment");
                    from_env()
                }
            }
        }
        None => from_env(),
    };

    if !explicit_user.is_empty() {
        credential.username = explicit_user.to_string();
    }
    if !explicit_pass.is_empty() {
        credential.password = explicit_pass.to_string();
    }
    credential
}
