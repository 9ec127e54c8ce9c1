//! `storctl version`.

use std::io::Write;

use crate::cli::GlobalOptions;
use crate::endpoint::resolve_endpoint;
use crate::env::EnvDefaults;
use crate::error::Result;
use crate::session::negotiate_version;

/// Version of this binary.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prints local version information. No request is made.
pub fn run(global: &GlobalOptions, env: &EnvDefaults, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Client:")?;
    writeln!(out, " Version:      {CLIENT_VERSION}")?;
    writeln!(out, " API version:  {}", negotiate_version(env))?;
    if let Some(endpoint) = resolve_endpoint(&global.hosts, global.tls, env)? {
        writeln!(out, " Endpoint:     {endpoint}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_without_endpoint() {
        let mut out = Vec::new();
        run(&GlobalOptions::default(), &EnvDefaults::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(CLIENT_VERSION));
        assert!(text.contains("API version:  1"));
        assert!(!text.contains("Endpoint"));
    }

    #[test]
    fn test_version_reports_normalized_api_version() {
        let env = EnvDefaults {
            api_version: "v2".to_string(),
            ..EnvDefaults::default()
        };
        let mut out = Vec::new();
        run(&GlobalOptions::default(), &env, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("API version:  2\n"));
    }

    #[test]
    fn test_version_with_endpoint() {
        let global = GlobalOptions {
            hosts: vec!["node1".to_string()],
            tls: true,
            ..GlobalOptions::default()
        };
        let mut out = Vec::new();
        run(&global, &EnvDefaults::default(), &mut out).unwrap();
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Endpoint:     https://node1:5705"));
    }
}
