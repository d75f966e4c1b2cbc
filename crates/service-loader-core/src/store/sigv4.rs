//! AWS Signature Version 4 for header-authenticated S3 requests.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::request::Credentials;

type HmacSha256 = Hmac<Sha256>;

pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Hex SHA-256 of an empty payload (every GET this crate issues).
pub const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// `20130524T000000Z`
pub fn amz_date(time: &DateTime<Utc>) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

fn short_date(time: &DateTime<Utc>) -> String {
    time.format("%Y%m%d").to_string()
}

/// Percent-encode a URI path per SigV4: everything except unreserved
/// characters and `/` becomes `%XX` (uppercase hex). Segments that are exactly
/// `.` or `..` have their dots encoded so no client or server resolves them.
pub fn uri_encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for (i, segment) in path.split('/').enumerate() {
        if i > 0 {
            out.push('/');
        }
        if segment == "." || segment == ".." {
            out.push_str(&"%2E".repeat(segment.len()));
            continue;
        }
        for b in segment.bytes() {
            match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    out.push(b as char)
                }
                _ => out.push_str(&format!("%{:02X}", b)),
            }
        }
    }
    out
}

/// Request parts covered by the signature.
#[derive(Debug, Clone)]
pub struct SignableRequest<'a> {
    pub method: &'a str,
    /// Already-encoded path, e.g. `/bucket/key.tar.gz`.
    pub canonical_uri: &'a str,
    /// Header name/value pairs to sign; must include `host`.
    pub headers: &'a [(&'a str, String)],
    pub payload_sha256: &'a str,
}

/// Signing context: who signs, where, and when.
#[derive(Debug, Clone)]
pub struct Signer<'a> {
    pub credentials: &'a Credentials,
    pub region: &'a str,
    pub service: &'a str,
    pub time: DateTime<Utc>,
}

impl<'a> Signer<'a> {
    fn scope(&self) -> String {
        format!(
            "{}/{}/{}/aws4_request",
            short_date(&self.time),
            self.region,
            self.service
        )
    }

    fn sorted_headers(req: &SignableRequest<'_>) -> Vec<(String, String)> {
        let mut headers: Vec<(String, String)> = req
            .headers
            .iter()
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
            .collect();
        headers.sort_by(|a, b| a.0.cmp(&b.0));
        headers
    }

    /// Canonical request text (query string always empty here).
    pub fn canonical_request(&self, req: &SignableRequest<'_>) -> String {
        let headers = Self::sorted_headers(req);
        let mut canonical_headers = String::new();
        for (k, v) in &headers {
            canonical_headers.push_str(k);
            canonical_headers.push(':');
            canonical_headers.push_str(v);
            canonical_headers.push('\n');
        }
        let signed: Vec<&str> = headers.iter().map(|(k, _)| k.as_str()).collect();
        format!(
            "{}\n{}\n\n{}\n{}\n{}",
            req.method,
            req.canonical_uri,
            canonical_headers,
            signed.join(";"),
            req.payload_sha256
        )
    }

    pub fn string_to_sign(&self, canonical_request: &str) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            amz_date(&self.time),
            self.scope(),
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        )
    }

    fn signing_key(&self) -> Vec<u8> {
        let secret = format!("AWS4{}", self.credentials.secret_access_key());
        let k_date = hmac(secret.as_bytes(), short_date(&self.time).as_bytes());
        let k_region = hmac(&k_date, self.region.as_bytes());
        let k_service = hmac(&k_region, self.service.as_bytes());
        hmac(&k_service, b"aws4_request")
    }

    pub fn signature(&self, req: &SignableRequest<'_>) -> String {
        let sts = self.string_to_sign(&self.canonical_request(req));
        hex::encode(hmac(&self.signing_key(), sts.as_bytes()))
    }

    /// Value of the `Authorization` header for `req`.
    pub fn authorization(&self, req: &SignableRequest<'_>) -> String {
        let headers = Self::sorted_headers(req);
        let signed: Vec<&str> = headers.iter().map(|(k, _)| k.as_str()).collect();
        format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM,
            self.credentials.access_key_id(),
            self.scope(),
            signed.join(";"),
            self.signature(req)
        )
    }
}

fn hmac(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
