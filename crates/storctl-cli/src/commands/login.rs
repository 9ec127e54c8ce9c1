//! `storctl login`: verify credentials against a host, then persist them.

use std::io::Write;

use storctl_api::{Client, DEFAULT_VERSION_STR};
use tracing::info;

use crate::cli::{GlobalOptions, LoginArgs};
use crate::config::ConfigFile;
use crate::credentials::{Credential, CredentialStore};
use crate::endpoint::Endpoint;
use crate::env::EnvDefaults;
use crate::error::{CliError, Result};

/// Verifies the credentials for the selected host, then saves them to `config`.
pub async fn run(
    global: &GlobalOptions,
    args: &LoginArgs,
    config: &mut ConfigFile,
    env: &EnvDefaults,
    out: &mut dyn Write,
) -> Result<()> {
    let endpoint = login_host(args, global.tls, env)?;
    let username = required(&args.username, "username")?;
    let password = required(&args.password, "password")?;

    verify_credentials(&endpoint, username, password).await?;
    writeln!(out, "Credentials verified")?;

    let key = endpoint.credential_key();
    config.store(&key, &Credential::new(username, password))?;
    config.save()?;
    info!(server = %key, config = %config.filename().display(), "credentials stored");
    Ok(())
}

/// Host to log in to: positional argument, hidden `--host`, or the
/// environment, in that order.
pub fn login_host(args: &LoginArgs, tls: bool, env: &EnvDefaults) -> Result<Endpoint> {
    let raw = match (&args.host, &args.host_flag) {
        (Some(_), Some(_)) => return Err(CliError::ConflictingArgs { flag: "host" }),
        (Some(host), None) | (None, Some(host)) => host.as_str(),
        (None, None) if env.host.trim().is_empty() => return Err(CliError::NoHostSetting),
        (None, None) => env.host.as_str(),
    };
    Endpoint::parse(raw, tls)
}

fn required<'a>(value: &'a Option<String>, flag: &'static str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(CliError::MissingFlag(flag))
}

async fn verify_credentials(endpoint: &Endpoint, username: &str, password: &str) -> Result<()> {
    let mut client = Client::new_versioned(&endpoint.url(), DEFAULT_VERSION_STR)
        .map_err(CliError::VerificationFailed)?;
    client.set_auth(username, password);
    client
        .login()
        .await
        .map_err(CliError::VerificationFailed)?;
    Ok(())
}
