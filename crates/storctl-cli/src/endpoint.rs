//! Control-plane address resolution.

use std::fmt;

use storctl_api::DEFAULT_PORT;
use tracing::debug;
use url::Url;

use crate::env::EnvDefaults;
use crate::error::{CliError, Result};

/// URL scheme of the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    Https,
}

impl Scheme {
    /// `https` when `tls` is set.
    pub fn from_tls(tls: bool) -> Self {
        if tls {
            Scheme::Https
        } else {
            Scheme::Http
        }
    }

    /// Scheme name without `://`.
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Resolved control-plane address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Chosen by `--tls`.
    pub scheme: Scheme,
    /// Host name or address.
    pub host: String,
    /// Port, when one was given.
    pub port: Option<u16>,
}

impl Endpoint {
    /// Parses `[scheme://]host[:port]`.
    ///
    /// The resulting scheme comes from `tls` alone; an input scheme of
    /// `http`, `https` or `tcp` is accepted and replaced.
    pub fn parse(raw: &str, tls: bool) -> Result<Self> {
        let raw = raw.trim();
        let invalid = |reason: &str| CliError::InvalidHost {
            host: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("empty address"));
        }

        let authority = match raw.split_once("://") {
            Some((scheme, rest)) => {
                let scheme = scheme.to_ascii_lowercase();
                if !matches!(scheme.as_str(), "http" | "https" | "tcp") {
                    return Err(invalid(&format!("unsupported scheme {scheme:?}")));
                }
                rest
            }
            None => raw,
        };

        // A non-special scheme keeps an explicit :80/:443 instead of folding
        // it into the scheme default.
        let url = Url::parse(&format!("tcp://{authority}")).map_err(|e| invalid(&e.to_string()))?;

        if !url.username().is_empty() || url.password().is_some() {
            return Err(invalid("credentials are not allowed in the address"));
        }
        if !matches!(url.path(), "" | "/") || url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("address must not carry a path"));
        }
        let host = match url.host_str() {
            Some(h) if !h.is_empty() => h.to_string(),
            _ => return Err(invalid("missing host")),
        };

        Ok(Self {
            scheme: Scheme::from_tls(tls),
            host,
            port: url.port(),
        })
    }

    /// Explicit port, or [`DEFAULT_PORT`].
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Key under which credentials for this endpoint are stored.
    pub fn credential_key(&self) -> String {
        format!("{}:{}", self.host, self.port_or_default())
    }

    /// Address handed to the API client.
    pub fn url(&self) -> String {
        format!(
            "{}://{}:{}",
            self.scheme.as_str(),
            self.host,
            self.port_or_default()
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

/// Picks the control-plane address from the explicit host list, falling back
/// to the environment.
///
/// `Ok(None)` means no layer supplied a host; that is reported later, when the
/// session is built.
pub fn resolve_endpoint(
    explicit_hosts: &[String],
    tls: bool,
    env: &EnvDefaults,
) -> Result<Option<Endpoint>> {
    let raw = match explicit_hosts {
        [] => env.host.as_str(),
        [host] => host.as_str(),
        hosts => return Err(CliError::MultipleHosts(hosts.len())),
    };

    if raw.trim().is_empty() {
        debug!("no host configured");
        return Ok(None);
    }

    let endpoint = Endpoint::parse(raw, tls)?;
    debug!(%endpoint, "resolved endpoint");
    Ok(Some(endpoint))
}
