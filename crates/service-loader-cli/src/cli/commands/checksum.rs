//! Checksum command: print a file's SHA-256 as a checksum object line.

use anyhow::Result;
use service_loader_core::checksum;
use std::path::Path;

/// Compute and print `<digest>  <file name>` for the given file; the output
/// can be uploaded as the `.sha256` object next to the archive.
pub fn run_checksum(path: &Path) -> Result<()> {
    let digest = checksum::sha256_path(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    print!("{}", checksum::checksum_line(&digest, &name));
    Ok(())
}
