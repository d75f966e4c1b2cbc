//! Object key derivation for archives and their checksum objects.

/// Suffix of the archive object (and of the local output file).
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";
/// Suffix of the companion checksum object.
pub const CHECKSUM_SUFFIX: &str = ".sha256";

/// Base name shared by the archive and checksum keys: `{app}_{tag}_{os}_{arch}`.
///
/// Inputs are joined verbatim; no character-set checks are made.
pub fn base_name(application: &str, tag: &str, os: &str, arch: &str) -> String {
    format!("{}_{}_{}_{}", application, tag, os, arch)
}

/// Keys of one release: the archive and the checksum object next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseKeys {
    base: String,
}

impl ReleaseKeys {
    pub fn new(application: &str, tag: &str, os: &str, arch: &str) -> Self {
        Self {
            base: base_name(application, tag, os, arch),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}.tar.gz`; also the local file name.
    pub fn archive(&self) -> String {
        format!("{}{}", self.base, ARCHIVE_SUFFIX)
    }

    /// `{base}.sha256`
    pub fn checksum(&self) -> String {
        format!("{}{}", self.base, CHECKSUM_SUFFIX)
    }
}
