//! Object store access.
//!
//! The loader only needs "get object by key, fully drained into memory";
//! [`ObjectStore`] is that seam. [`S3Client`] implements it over HTTP(S) for
//! AWS S3 and S3-compatible servers such as MinIO.

mod s3;
pub mod sigv4;

pub use s3::{S3Client, DEFAULT_CONNECT_TIMEOUT, DEFAULT_ENDPOINT, DEFAULT_REGION};

use thiserror::Error;

/// Failure to fetch one object.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store answered but has no object under this key.
    #[error("object {bucket}/{key} not found")]
    NotFound { bucket: String, key: String },

    /// Any other non-success HTTP status (access denied, bad request, server error).
    #[error("HTTP {status}")]
    Http { status: u32 },

    /// Transport failure: DNS, connect, TLS, or the body stream broke mid-transfer.
    #[error("connection failed: {0}")]
    Connection(#[from] curl::Error),

    /// The request could not be built (e.g. an endpoint that is not a valid host).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// "Fetch named object, return its bytes."
pub trait ObjectStore {
    /// Fetch `key` from `bucket`, returning the whole body.
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;
}
