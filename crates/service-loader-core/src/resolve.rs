//! Expected-digest resolution: caller override or the companion checksum object.

use crate::error::LoadError;
use crate::request::FetchRequest;
use crate::store::ObjectStore;

/// Where the expected digest came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumSource {
    /// Supplied by the caller; the store was not consulted.
    Override,
    /// First token of the named checksum object.
    Object { key: String },
}

/// First whitespace-delimited token of a checksum file
/// (`<hex digest>  <file name>`), or `None` if there is none.
pub fn parse_checksum_file(content: &str) -> Option<&str> {
    content.split_whitespace().next()
}

/// Expected digest for `request`.
///
/// An override is returned unchanged without any network call. Otherwise the
/// checksum object under `checksum_key` is fetched and its first token used.
pub fn resolve_expected<S: ObjectStore + ?Sized>(
    store: &S,
    request: &FetchRequest,
    checksum_key: &str,
) -> Result<(String, ChecksumSource), LoadError> {
    if let Some(digest) = request.expected_checksum() {
        tracing::debug!("using caller-supplied checksum");
        return Ok((digest.to_string(), ChecksumSource::Override));
    }

    let raw = store
        .get_object(request.bucket(), checksum_key)
        .map_err(|source| LoadError::ChecksumFetch {
            bucket: request.bucket().to_string(),
            key: checksum_key.to_string(),
            source,
        })?;
    let text = String::from_utf8_lossy(&raw);
    let digest = parse_checksum_file(&text).ok_or_else(|| LoadError::MalformedChecksumFile {
        key: checksum_key.to_string(),
    })?;
    tracing::debug!(key = checksum_key, "resolved checksum from object");

    Ok((
        digest.to_string(),
        ChecksumSource::Object {
            key: checksum_key.to_string(),
        },
    ))
}
