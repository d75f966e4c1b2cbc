//! CLI for service-loader.

mod commands;
mod progress;
mod settings;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use service_loader_core::LoadError;

use commands::{run_checksum, run_completions, run_fetch, run_man};

/// Exit status for a checksum mismatch, distinct from I/O and network failures.
pub const EXIT_CHECKSUM_MISMATCH: i32 = 2;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "service-loader")]
#[command(
    about = "Load release archives from an S3/MinIO bucket and verify them against their SHA-256 checksum",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download <APP>_<TAG>_<OS>_<ARCH>.tar.gz, verify it, and save it in the current directory.
    Fetch(FetchArgs),

    /// Print the SHA-256 of a file in the format of a `.sha256` checksum object.
    Checksum {
        /// Path to the file.
        path: String,
    },

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    /// Application to load.
    #[arg(value_name = "APP")]
    pub app: String,

    /// Release tag to reference.
    #[arg(value_name = "TAG")]
    pub tag: String,

    /// S3/MinIO bucket where the releases exist.
    #[arg(long)]
    pub bucket: Option<String>,

    /// Access key id (default: $AWS_ACCESS_KEY_ID, then config).
    #[arg(long)]
    pub id: Option<String>,

    /// Secret access key (default: $AWS_SECRET_ACCESS_KEY, then config).
    #[arg(long)]
    pub key: Option<String>,

    /// Object store endpoint, `host[:port]` (default: config, then s3.amazonaws.com).
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Signing region (default: config, then us-east-1).
    #[arg(long)]
    pub region: Option<String>,

    /// Use plain HTTP instead of HTTPS.
    #[arg(long)]
    pub insecure: bool,

    /// SHA-256 to validate against instead of downloading the checksum object.
    #[arg(long, value_name = "DIGEST")]
    pub sha: Option<String>,

    /// Target OS (default: $GOOS, then config, then the host OS).
    #[arg(long)]
    pub os: Option<String>,

    /// Target architecture (default: $GOARCH, then config, then the host architecture).
    #[arg(long)]
    pub arch: Option<String>,

    /// Compare digests ignoring ASCII case.
    #[arg(long)]
    pub ignore_digest_case: bool,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch(args) => run_fetch(&args)?,
            CliCommand::Checksum { path } => run_checksum(std::path::Path::new(&path))?,
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

/// Process exit status for a failed run.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<LoadError>() {
        Some(e) if e.is_integrity_failure() => EXIT_CHECKSUM_MISMATCH,
        _ => 1,
    }
}

#[cfg(test)]
mod tests;
