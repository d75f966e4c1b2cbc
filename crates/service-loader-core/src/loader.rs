//! Fetch → digest → resolve expected → verify → persist.
//!
//! Strictly sequential. The archive is held in one owned buffer from fetch to
//! write; it reaches the filesystem only after verification passes.

use std::path::{Path, PathBuf};

use crate::checksum;
use crate::error::LoadError;
use crate::request::FetchRequest;
use crate::resolve::{self, ChecksumSource};
use crate::storage;
use crate::store::ObjectStore;
use crate::verify::{self, Verification};

/// Stage notifications, in the order they occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent<'a> {
    DownloadingArchive { bucket: &'a str, key: &'a str },
    ArchiveDownloaded { bytes: usize },
    ChecksumComputed { digest: &'a str },
    DownloadingChecksum { bucket: &'a str, key: &'a str },
    UsingSuppliedChecksum,
    ChecksumResolved { digest: &'a str },
    Verified,
    VerificationFailed { expected: &'a str, actual: &'a str },
    Saving { path: &'a Path },
    Saved { path: &'a Path },
}

/// Receives [`LoadEvent`]s as the run progresses.
pub trait LoadObserver {
    fn on_event(&mut self, event: &LoadEvent<'_>);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LoadObserver for NoopObserver {
    fn on_event(&mut self, _event: &LoadEvent<'_>) {}
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub archive_key: String,
    pub path: PathBuf,
    pub digest: String,
    pub bytes: usize,
    pub checksum_source: ChecksumSource,
}

/// Fetch the archive named by `request`, verify it, and write it into `dest_dir`
/// under its archive key.
///
/// On any error nothing is written; a file already at the destination is left as is.
pub fn load<S, O>(
    store: &S,
    request: &FetchRequest,
    dest_dir: &Path,
    observer: &mut O,
) -> Result<LoadReport, LoadError>
where
    S: ObjectStore + ?Sized,
    O: LoadObserver + ?Sized,
{
    let keys = request.keys();
    let archive_key = keys.archive();
    let bucket = request.bucket();

    tracing::info!(bucket, key = %archive_key, "downloading archive");
    observer.on_event(&LoadEvent::DownloadingArchive {
        bucket,
        key: &archive_key,
    });
    let archive = store
        .get_object(bucket, &archive_key)
        .map_err(|source| LoadError::ArchiveFetch {
            bucket: bucket.to_string(),
            key: archive_key.clone(),
            source,
        })?;
    observer.on_event(&LoadEvent::ArchiveDownloaded {
        bytes: archive.len(),
    });

    let computed = checksum::sha256_reader(archive.as_slice()).map_err(LoadError::StreamRead)?;
    tracing::debug!(digest = %computed, bytes = archive.len(), "computed archive checksum");
    observer.on_event(&LoadEvent::ChecksumComputed { digest: &computed });

    let checksum_key = keys.checksum();
    if request.expected_checksum().is_some() {
        observer.on_event(&LoadEvent::UsingSuppliedChecksum);
    } else {
        tracing::info!(bucket, key = %checksum_key, "downloading checksum");
        observer.on_event(&LoadEvent::DownloadingChecksum {
            bucket,
            key: &checksum_key,
        });
    }
    let (expected, checksum_source) = resolve::resolve_expected(store, request, &checksum_key)?;
    observer.on_event(&LoadEvent::ChecksumResolved { digest: &expected });

    match verify::verify(&computed, &expected, request.comparison()) {
        Verification::Pass => {
            tracing::info!(digest = %computed, "checksum verified");
            observer.on_event(&LoadEvent::Verified);
        }
        Verification::Fail { expected, actual } => {
            tracing::warn!(%expected, %actual, key = %archive_key, "checksum mismatch");
            observer.on_event(&LoadEvent::VerificationFailed {
                expected: &expected,
                actual: &actual,
            });
            return Err(LoadError::ChecksumMismatch { expected, actual });
        }
    }

    let path = dest_dir.join(&archive_key);
    observer.on_event(&LoadEvent::Saving { path: &path });
    storage::write_atomic(&path, &archive).map_err(|source| LoadError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = archive.len(), "archive saved");
    observer.on_event(&LoadEvent::Saved { path: &path });

    Ok(LoadReport {
        archive_key,
        path,
        digest: computed,
        bytes: archive.len(),
        checksum_source,
    })
}
