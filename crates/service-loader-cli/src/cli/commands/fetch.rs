//! `service-loader fetch <APP> <TAG>` – download, verify, save.

use anyhow::{Context, Result};
use service_loader_core::{config, loader};
use std::io;

use crate::cli::progress::ProgressPrinter;
use crate::cli::settings::{self, ProcessEnv};
use crate::cli::FetchArgs;

pub fn run_fetch(args: &FetchArgs) -> Result<()> {
    let cfg = settings::config_or_default(config::load_or_init());
    tracing::debug!("loaded config: endpoint={} region={}", cfg.endpoint, cfg.region);

    let resolved = settings::resolve(args, &ProcessEnv::capture(), &cfg)?;
    tracing::debug!(request = ?resolved.request, "resolved fetch request");

    let dest = std::env::current_dir().context("cannot determine current directory")?;
    let mut progress = ProgressPrinter::new(io::stdout());
    let report = loader::load(&resolved.client, &resolved.request, &dest, &mut progress)?;

    tracing::info!(
        path = %report.path.display(),
        digest = %report.digest,
        bytes = report.bytes,
        "fetch complete"
    );
    Ok(())
}
