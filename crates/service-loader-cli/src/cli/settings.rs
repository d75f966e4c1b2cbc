//! Turns flags, environment and config file into one immutable request.
//!
//! Precedence per setting: flag, then environment, then config file, then
//! built-in default. The environment is read once, here.

use anyhow::{bail, Result};
use service_loader_core::config::LoaderConfig;
use service_loader_core::platform;
use service_loader_core::{Credentials, DigestComparison, FetchRequest, S3Client};
use std::time::Duration;

use crate::cli::FetchArgs;

/// Environment variables consulted as defaults.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub goos: Option<String>,
    pub goarch: Option<String>,
}

impl ProcessEnv {
    pub fn capture() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            access_key_id: var("AWS_ACCESS_KEY_ID"),
            secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
            goos: var("GOOS"),
            goarch: var("GOARCH"),
        }
    }
}

/// Everything `fetch` needs to run.
#[derive(Debug)]
pub struct Resolved {
    pub request: FetchRequest,
    pub client: S3Client,
}

/// Config file defaults, or the built-in ones when the file cannot be read
/// or created. Flags and environment still apply on top.
pub fn config_or_default(loaded: Result<LoaderConfig>) -> LoaderConfig {
    match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("config unavailable, using built-in defaults: {:#}", e);
            LoaderConfig::default()
        }
    }
}

fn first(candidates: [Option<&String>; 3]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .cloned()
}

pub fn resolve(args: &FetchArgs, env: &ProcessEnv, cfg: &LoaderConfig) -> Result<Resolved> {
    let Some(bucket) = first([args.bucket.as_ref(), None, cfg.bucket.as_ref()]) else {
        bail!("--bucket is required (or set `bucket` in the config file)");
    };
    let Some(id) = first([
        args.id.as_ref(),
        env.access_key_id.as_ref(),
        cfg.access_key_id.as_ref(),
    ]) else {
        bail!("--id is required (or set AWS_ACCESS_KEY_ID)");
    };
    let Some(key) = first([
        args.key.as_ref(),
        env.secret_access_key.as_ref(),
        cfg.secret_access_key.as_ref(),
    ]) else {
        bail!("--key is required (or set AWS_SECRET_ACCESS_KEY)");
    };
    if args.app.is_empty() {
        bail!("APP is required");
    }
    if args.tag.is_empty() {
        bail!("TAG is required");
    }

    let endpoint = first([args.endpoint.as_ref(), None, Some(&cfg.endpoint)])
        .unwrap_or_else(|| service_loader_core::store::DEFAULT_ENDPOINT.to_string());
    let region = first([args.region.as_ref(), None, Some(&cfg.region)])
        .unwrap_or_else(|| service_loader_core::store::DEFAULT_REGION.to_string());
    let os = first([args.os.as_ref(), env.goos.as_ref(), cfg.os.as_ref()])
        .unwrap_or_else(|| platform::host_os().to_string());
    let arch = first([args.arch.as_ref(), env.goarch.as_ref(), cfg.arch.as_ref()])
        .unwrap_or_else(|| platform::host_arch().to_string());
    let comparison = if args.ignore_digest_case || cfg.ignore_digest_case {
        DigestComparison::IgnoreAsciiCase
    } else {
        DigestComparison::Exact
    };

    let credentials = Credentials::new(id, key);
    let request = FetchRequest::builder(args.app.clone(), args.tag.clone())
        .platform(os, arch)
        .bucket(bucket)
        .endpoint(endpoint.clone())
        .credentials(credentials.clone())
        .expected_checksum(args.sha.clone())
        .comparison(comparison)
        .build()?;
    let client = S3Client::new(endpoint, credentials)
        .region(region)
        .secure(cfg.secure && !args.insecure)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs));

    Ok(Resolved { request, client })
}
