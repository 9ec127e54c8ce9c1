//! On-disk CLI configuration.
//!
//! The config directory holds `config.json` (or, when no JSON file exists, a
//! hand-written `config.toml`). It currently carries the per-host credential
//! entries written by `storctl login`.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CliError, Result};

/// Directory under `$HOME` used when no other location is given.
pub const CONFIG_DIR_NAME: &str = ".storctl";
/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Read in place of the JSON file when present.
pub const TOML_CONFIG_FILE_NAME: &str = "config.toml";

/// One stored credential entry; `auth` is `base64(username:password)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Encoded credentials.
    #[serde(default)]
    pub auth: String,
}

/// Contents of the client config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Credentials keyed by `host:port`.
    #[serde(default)]
    pub auths: BTreeMap<String, AuthConfig>,
    #[serde(skip)]
    filename: PathBuf,
}

impl ConfigFile {
    /// Empty config that will be saved to `filename`.
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            auths: BTreeMap::new(),
            filename: filename.into(),
        }
    }

    /// Where [`ConfigFile::save`] writes.
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Parses `path` as JSON or TOML, chosen by extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_err = |reason: String| CliError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let contents = fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        let mut config: ConfigFile = match extension(path).as_str() {
            "toml" => toml::from_str(&contents).map_err(|e| config_err(e.to_string()))?,
            "json" => serde_json::from_str(&contents).map_err(|e| config_err(e.to_string()))?,
            ext => return Err(config_err(format!("unsupported config file extension {ext:?}"))),
        };
        config.filename = path.to_path_buf();
        Ok(config)
    }

    /// Writes the config back to its file, replacing it atomically.
    pub fn save(&self) -> Result<()> {
        let config_err = |reason: String| CliError::Config {
            path: self.filename.clone(),
            reason,
        };

        let contents = match extension(&self.filename).as_str() {
            "toml" => toml::to_string_pretty(self).map_err(|e| config_err(e.to_string()))?,
            _ => serde_json::to_string_pretty(self)?,
        };

        if let Some(dir) = self.filename.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.filename.with_extension("tmp");
        {
            let mut file = create_private(&tmp)?;
            file.write_all(contents.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.filename)?;
        debug!(path = %self.filename.display(), "saved config");
        Ok(())
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase()
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

/// Config directory: explicit override, else `$HOME/.storctl`.
pub fn config_dir(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME),
    }
}

/// Loads the config from `dir`. A missing file yields an empty config.
pub fn load(dir: &Path) -> Result<ConfigFile> {
    let json = dir.join(CONFIG_FILE_NAME);
    if json.exists() {
        return ConfigFile::from_file(&json);
    }
    let toml = dir.join(TOML_CONFIG_FILE_NAME);
    if toml.exists() {
        return ConfigFile::from_file(&toml);
    }
    Ok(ConfigFile::new(json))
}

/// Like [`load`], but a broken config only produces a warning on `err` and
/// an empty config bound to the default file name. Fails only when the
/// warning itself cannot be written.
pub fn load_or_default(dir: &Path, err: &mut dyn Write) -> Result<ConfigFile> {
    match load(dir) {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!("error loading config file: {}", e);
            writeln!(err, "WARNING: Error loading config file: {e}")?;
            Ok(ConfigFile::new(dir.join(CONFIG_FILE_NAME)))
        }
    }
}
