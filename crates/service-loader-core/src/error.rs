//! Errors of a fetch-verify-persist run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::store::StoreError;

/// Why a run stopped. Every variant is terminal; nothing is retried.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The archive object could not be fetched.
    #[error("can't download archive from {bucket}/{key}")]
    ArchiveFetch {
        bucket: String,
        key: String,
        #[source]
        source: StoreError,
    },

    /// The checksum object could not be fetched.
    #[error("can't download checksum from {bucket}/{key}")]
    ChecksumFetch {
        bucket: String,
        key: String,
        #[source]
        source: StoreError,
    },

    /// The checksum object holds no whitespace-delimited token.
    #[error("checksum object {key} does not contain a digest")]
    MalformedChecksumFile { key: String },

    /// Computed and expected digests differ. The archive was not written.
    #[error("checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// The verified archive could not be written locally.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the archive bytes failed while hashing.
    #[error("failed to read archive while computing checksum")]
    StreamRead(#[source] io::Error),
}

impl LoadError {
    /// True for a data-integrity finding rather than an I/O or network fault.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, LoadError::ChecksumMismatch { .. })
    }
}
