//! Environment-sourced defaults, captured once per process.

/// Default control-plane address.
pub const ENV_HOST: &str = "STORCTL_HOST";
/// API version override.
pub const ENV_API_VERSION: &str = "STORCTL_API_VERSION";
/// Fallback username.
pub const ENV_USERNAME: &str = "STORCTL_USERNAME";
/// Fallback password.
pub const ENV_PASSWORD: &str = "STORCTL_PASSWORD";
/// Config directory override.
pub const ENV_CONFIG_DIR: &str = "STORCTL_CONFIG";

/// Snapshot of the environment variables the resolution pipeline reads.
///
/// Unset and non-unicode variables are both treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDefaults {
    /// From `STORCTL_HOST`.
    pub host: String,
    /// From `STORCTL_API_VERSION`.
    pub api_version: String,
    /// From `STORCTL_USERNAME`.
    pub username: String,
    /// From `STORCTL_PASSWORD`.
    pub password: String,
}

impl EnvDefaults {
    /// Reads the variables once.
    pub fn from_process() -> Self {
        Self {
            host: var(ENV_HOST),
            api_version: var(ENV_API_VERSION),
            username: var(ENV_USERNAME),
            password: var(ENV_PASSWORD),
        }
    }
}

fn var(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}
