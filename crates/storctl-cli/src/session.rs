//! Per-invocation session bootstrap.
//!
//! Resolution runs once per process, in order: endpoint, credential, client.
//! The resulting [`Session`] is immutable and handed by reference to every
//! command.

use storctl_api::{normalize_version, Client, DEFAULT_VERSION_STR};
use tracing::debug;

use crate::cli::GlobalOptions;
use crate::credentials::{resolve_credential, Credential, CredentialStore};
use crate::endpoint::{resolve_endpoint, Endpoint};
use crate::env::EnvDefaults;
use crate::error::{CliError, Result};

/// API version to speak: the environment override when set, otherwise the
/// library default. Local selection only, nothing is sent to the server.
pub fn negotiate_version(env: &EnvDefaults) -> String {
    normalize_version(&env.api_version)
        .unwrap_or(DEFAULT_VERSION_STR)
        .to_string()
}

/// Resolved endpoint plus a ready API client; read-only once built.
#[derive(Debug)]
pub struct Session {
    endpoint: Endpoint,
    version: String,
    client: Client,
}

impl Session {
    /// Builds the API client for a resolved endpoint.
    ///
    /// Fails with [`CliError::NoHost`] when no layer produced an endpoint. An
    /// incomplete credential is dropped and the session runs unauthenticated.
    pub fn bootstrap(
        endpoint: Option<Endpoint>,
        credential: Credential,
        env: &EnvDefaults,
    ) -> Result<Self> {
        let endpoint = endpoint.ok_or(CliError::NoHost)?;
        let version = negotiate_version(env);

        let mut client = Client::new_versioned(&endpoint.url(), &version)?;
        if credential.is_complete() {
            client.set_auth(&credential.username, &credential.password);
        } else {
            debug!("no complete credentials, continuing unauthenticated");
        }

        debug!(%endpoint, %version, authenticated = client.auth().is_some(), "session ready");
        Ok(Self {
            endpoint,
            version: client.client_version().to_string(),
            client,
        })
    }

    /// Runs the whole pipeline from parsed global options.
    pub fn from_options(
        opts: &GlobalOptions,
        store: &dyn CredentialStore,
        env: &EnvDefaults,
    ) -> Result<Self> {
        let endpoint = resolve_endpoint(&opts.hosts, opts.tls, env)?;
        let credential = resolve_credential(
            opts.username.as_deref().unwrap_or_default(),
            opts.password.as_deref().unwrap_or_default(),
            endpoint.as_ref(),
            store,
            env,
        );
        Self::bootstrap(endpoint, credential, env)
    }

    /// Address every request of this session goes to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Negotiated API version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// API client with the session's credentials attached.
    pub fn client(&self) -> &Client {
        &self.client
    }
}
