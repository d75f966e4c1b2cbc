//! Fetch a platform-specific release archive from an S3-compatible object
//! store, verify it against a SHA-256 checksum, and persist it only on a match.

pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod loader;
pub mod object_key;
pub mod platform;
pub mod request;
pub mod resolve;
pub mod storage;
pub mod store;
pub mod verify;

pub use error::LoadError;
pub use loader::{load, LoadEvent, LoadObserver, LoadReport, NoopObserver};
pub use request::{Credentials, FetchRequest, FetchRequestBuilder};
pub use store::{ObjectStore, S3Client, StoreError};
pub use verify::{DigestComparison, Verification};
