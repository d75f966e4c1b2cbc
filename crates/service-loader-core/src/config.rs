//! Defaults loaded from `~/.config/service-loader/config.toml`.
//!
//! Only the CLI reads this file; the loader receives a fully resolved
//! `FetchRequest`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_ENDPOINT, DEFAULT_REGION};

/// Persistent defaults for `service-loader fetch`. Command-line flags and
/// environment variables take precedence over every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Object store host, optionally with port (`minio.local:9000`).
    pub endpoint: String,
    /// SigV4 signing region.
    pub region: String,
    /// Use HTTPS. Set to false for a local MinIO without TLS.
    pub secure: bool,
    /// Seconds allowed for establishing the connection.
    pub connect_timeout_secs: u64,
    /// Compare digests ignoring ASCII case.
    #[serde(default)]
    pub ignore_digest_case: bool,
    /// Bucket holding the releases.
    #[serde(default)]
    pub bucket: Option<String>,
    /// Access key id, used when neither `--id` nor `AWS_ACCESS_KEY_ID` is set.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret key, used when neither `--key` nor `AWS_SECRET_ACCESS_KEY` is set.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Target OS identifier (defaults to the host).
    #[serde(default)]
    pub os: Option<String>,
    /// Target architecture identifier (defaults to the host).
    #[serde(default)]
    pub arch: Option<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            region: DEFAULT_REGION.to_string(),
            secure: true,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT.as_secs(),
            ignore_digest_case: false,
            bucket: None,
            access_key_id: None,
            secret_access_key: None,
            os: None,
            arch: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("service-loader")
        .context("cannot locate XDG config directory")?;
    xdg_dirs
        .place_config_file("config.toml")
        .with_context(|| {
            format!(
                "cannot create config directory {}",
                xdg_dirs.get_config_home().join("service-loader").display()
            )
        })
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LoaderConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<LoaderConfig> {
    if !path.exists() {
        let default_cfg = LoaderConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LoaderConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
