//! S3 GetObject over libcurl with SigV4 header authentication.
//!
//! Path-style addressing (`{endpoint}/{bucket}/{key}`) so that MinIO and
//! other S3-compatible servers work without virtual-host DNS.

use chrono::Utc;
use std::time::Duration;
use url::Url;

use super::sigv4::{self, SignableRequest, Signer, EMPTY_PAYLOAD_SHA256};
use super::{ObjectStore, StoreError};
use crate::request::Credentials;

pub const DEFAULT_ENDPOINT: &str = "s3.amazonaws.com";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking S3 client. One request per `get_object` call; no retries.
#[derive(Debug, Clone)]
pub struct S3Client {
    endpoint: String,
    region: String,
    secure: bool,
    credentials: Credentials,
    connect_timeout: Duration,
}

impl S3Client {
    /// `endpoint` is `host[:port]`, or a full `http(s)://host[:port]` base URL.
    pub fn new(endpoint: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            endpoint: endpoint.into(),
            region: DEFAULT_REGION.to_string(),
            secure: true,
            credentials,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Plain HTTP when false. Ignored if the endpoint carries its own scheme.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    fn base_url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        if endpoint.contains("://") {
            endpoint.to_string()
        } else if self.secure {
            format!("https://{}", endpoint)
        } else {
            format!("http://{}", endpoint)
        }
    }

    /// Signed-path form of `/{bucket}/{key}`.
    pub fn canonical_path(bucket: &str, key: &str) -> String {
        sigv4::uri_encode_path(&format!("/{}/{}", bucket, key))
    }

    /// Parsed endpoint base; only its host and port are used.
    fn endpoint_url(&self) -> Result<Url, StoreError> {
        let base = self.base_url();
        Url::parse(&base).map_err(|e| StoreError::InvalidRequest(format!("{}: {}", base, e)))
    }

    /// Full URL of an object, exactly as sent. Not passed through a URL parser,
    /// so no path segment is resolved or re-encoded.
    pub fn object_url(&self, bucket: &str, key: &str) -> Result<String, StoreError> {
        self.endpoint_url()?;
        Ok(format!("{}{}", self.base_url(), Self::canonical_path(bucket, key)))
    }

    /// Value of the Host header as curl will send it.
    fn host_header(url: &Url) -> Result<String, StoreError> {
        let host = url
            .host_str()
            .ok_or_else(|| StoreError::InvalidRequest(format!("URL has no host: {}", url)))?;
        Ok(match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        })
    }
}

impl ObjectStore for S3Client {
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let host = Self::host_header(&self.endpoint_url()?)?;
        let canonical_uri = Self::canonical_path(bucket, key);
        let url = format!("{}{}", self.base_url(), canonical_uri);

        let signer = Signer {
            credentials: &self.credentials,
            region: &self.region,
            service: "s3",
            time: Utc::now(),
        };
        let amz_date = sigv4::amz_date(&signer.time);
        let signed_headers = [
            ("host", host),
            ("x-amz-content-sha256", EMPTY_PAYLOAD_SHA256.to_string()),
            ("x-amz-date", amz_date.clone()),
        ];
        let authorization = signer.authorization(&SignableRequest {
            method: "GET",
            canonical_uri: &canonical_uri,
            headers: &signed_headers,
            payload_sha256: EMPTY_PAYLOAD_SHA256,
        });

        tracing::debug!(url = %url, "GET object");

        let mut easy = curl::easy::Easy::new();
        easy.url(&url)?;
        easy.get(true)?;
        easy.path_as_is(true)?;
        // A redirect would invalidate the signature; surface it as an HTTP status instead.
        easy.follow_location(false)?;
        easy.connect_timeout(self.connect_timeout)?;

        let mut list = curl::easy::List::new();
        list.append(&format!("x-amz-content-sha256: {}", EMPTY_PAYLOAD_SHA256))?;
        list.append(&format!("x-amz-date: {}", amz_date))?;
        list.append(&format!("Authorization: {}", authorization))?;
        easy.http_headers(list)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        match code {
            200..=299 => {
                tracing::debug!(bucket, key, bytes = body.len(), "object fetched");
                Ok(body)
            }
            404 => Err(StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            status => {
                tracing::debug!(
                    status,
                    response = %String::from_utf8_lossy(&body),
                    "object fetch rejected"
                );
                Err(StoreError::Http { status })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_key::ReleaseKeys;

    fn client(endpoint: &str) -> S3Client {
        S3Client::new(endpoint, Credentials::new("id", "secret"))
    }

    #[test]
    fn object_url_https_by_default() {
        let url = client("s3.amazonaws.com")
            .object_url("releases", "svc_v1.0.0_linux_amd64.tar.gz")
            .unwrap();
        assert_eq!(
            url,
            "https://s3.amazonaws.com/releases/svc_v1.0.0_linux_amd64.tar.gz"
        );
    }

    #[test]
    fn object_url_insecure_with_port() {
        let c = client("localhost:9000").secure(false);
        assert_eq!(c.object_url("b", "k.sha256").unwrap(), "http://localhost:9000/b/k.sha256");
        assert_eq!(
            S3Client::host_header(&c.endpoint_url().unwrap()).unwrap(),
            "localhost:9000"
        );
    }

    #[test]
    fn object_url_explicit_scheme_wins() {
        let c = client("http://minio.local:9000/").secure(true);
        assert_eq!(c.object_url("b", "k").unwrap(), "http://minio.local:9000/b/k");
    }

    #[test]
    fn object_url_encodes_reserved_characters() {
        let url = client("s3.amazonaws.com")
            .object_url("b", "app_v1+build 2_linux_amd64.tar.gz")
            .unwrap();
        assert_eq!(
            url,
            "https://s3.amazonaws.com/b/app_v1%2Bbuild%202_linux_amd64.tar.gz"
        );
    }

    #[test]
    fn object_url_keeps_dot_segments_of_key() {
        let key = ReleaseKeys::new("svc", "a/../b", "linux", "amd64").archive();
        assert_eq!(key, "svc_a/../b_linux_amd64.tar.gz");
        let url = client("s3.amazonaws.com").object_url("releases", &key).unwrap();
        assert_eq!(
            url,
            "https://s3.amazonaws.com/releases/svc_a/%2E%2E/b_linux_amd64.tar.gz"
        );

        let escape = client("s3.amazonaws.com")
            .object_url("releases", "../../other/secret.tar.gz")
            .unwrap();
        assert_eq!(
            escape,
            "https://s3.amazonaws.com/releases/%2E%2E/%2E%2E/other/secret.tar.gz"
        );
    }

    #[test]
    fn default_port_is_not_in_host_header() {
        let url = client("s3.amazonaws.com:443").endpoint_url().unwrap();
        assert_eq!(S3Client::host_header(&url).unwrap(), "s3.amazonaws.com");
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = client("bad host").object_url("b", "k").unwrap_err();
        assert!(matches!(err, StoreError::InvalidRequest(_)));
    }
}
