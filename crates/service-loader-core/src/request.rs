//! The immutable description of one fetch run.

use std::fmt;

use crate::object_key::ReleaseKeys;
use crate::verify::DigestComparison;

/// Access key pair for the object store.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Everything a run needs, resolved once at the boundary.
///
/// Built through [`FetchRequest::builder`]; there are no setters afterwards.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    application: String,
    tag: String,
    os: String,
    arch: String,
    bucket: String,
    endpoint: String,
    credentials: Credentials,
    expected_checksum: Option<String>,
    comparison: DigestComparison,
}

impl FetchRequest {
    pub fn builder(application: impl Into<String>, tag: impl Into<String>) -> FetchRequestBuilder {
        FetchRequestBuilder {
            application: application.into(),
            tag: tag.into(),
            os: String::new(),
            arch: String::new(),
            bucket: String::new(),
            endpoint: String::new(),
            credentials: Credentials::new("", ""),
            expected_checksum: None,
            comparison: DigestComparison::default(),
        }
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Caller-supplied digest; `None` means "read the checksum object".
    pub fn expected_checksum(&self) -> Option<&str> {
        self.expected_checksum.as_deref()
    }

    pub fn comparison(&self) -> DigestComparison {
        self.comparison
    }

    /// Archive and checksum keys, recomputed from the request fields.
    pub fn keys(&self) -> ReleaseKeys {
        ReleaseKeys::new(&self.application, &self.tag, &self.os, &self.arch)
    }
}

/// Missing required field when building a [`FetchRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} is required")]
pub struct MissingField(pub &'static str);

#[derive(Debug, Clone)]
pub struct FetchRequestBuilder {
    application: String,
    tag: String,
    os: String,
    arch: String,
    bucket: String,
    endpoint: String,
    credentials: Credentials,
    expected_checksum: Option<String>,
    comparison: DigestComparison,
}

impl FetchRequestBuilder {
    pub fn platform(mut self, os: impl Into<String>, arch: impl Into<String>) -> Self {
        self.os = os.into();
        self.arch = arch.into();
        self
    }

    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Digest to verify against instead of the checksum object. Empty means unset.
    pub fn expected_checksum(mut self, digest: Option<String>) -> Self {
        self.expected_checksum = digest.filter(|d| !d.is_empty());
        self
    }

    pub fn comparison(mut self, comparison: DigestComparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Checks presence of application, tag, bucket, endpoint, os and arch.
    /// Their content is not validated.
    pub fn build(self) -> Result<FetchRequest, MissingField> {
        let required = [
            ("application", &self.application),
            ("tag", &self.tag),
            ("os", &self.os),
            ("arch", &self.arch),
            ("bucket", &self.bucket),
            ("endpoint", &self.endpoint),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(MissingField(name));
            }
        }
        Ok(FetchRequest {
            application: self.application,
            tag: self.tag,
            os: self.os,
            arch: self.arch,
            bucket: self.bucket,
            endpoint: self.endpoint,
            credentials: self.credentials,
            expected_checksum: self.expected_checksum,
            comparison: self.comparison,
        })
    }
}
