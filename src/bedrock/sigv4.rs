//! AWS Signature Version 4 request signing.
//!
//! Only the subset this service needs: a fixed header set
//! (content-type, host, x-amz-date) and pre-normalized paths. The
//! canonical-request and key-derivation steps follow the published
//! algorithm exactly.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SIGNED_HEADERS: &str = "content-type;host;x-amz-date";

pub struct SigningParams<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub region: &'a str,
    pub service: &'a str,
}

pub struct RequestToSign<'a> {
    pub method: &'a str,
    pub host: &'a str,
    /// Already-normalized absolute path, e.g. `/retrieveAndGenerate`.
    pub path: &'a str,
    /// Canonical query string (keys sorted, RFC 3986 encoded), or `""`.
    pub query: &'a str,
    pub content_type: &'a str,
    pub body: &'a [u8],
    /// Timestamp in `YYYYMMDD'T'HHMMSS'Z'` form; also sent as `x-amz-date`.
    pub amz_date: &'a str,
}

/// Computes the `Authorization` header value for the request.
pub fn authorization_header(params: &SigningParams, request: &RequestToSign) -> String {
    let date = &request.amz_date[..8];
    let scope = format!(
        "{date}/{}/{}/aws4_request",
        params.region, params.service
    );

    let canonical_headers = format!(
        "content-type:{}\nhost:{}\nx-amz-date:{}\n",
        request.content_type, request.host, request.amz_date
    );
    let canonical_request = format!(
        "{}\n{}\n{}\n{canonical_headers}\n{SIGNED_HEADERS}\n{}",
        request.method,
        request.path,
        request.query,
        hex(&Sha256::digest(request.body))
    );

    let string_to_sign = format!(
        "{ALGORITHM}\n{}\n{scope}\n{}",
        request.amz_date,
        hex(&Sha256::digest(canonical_request.as_bytes()))
    );

    let k_date = hmac_sha256(
        format!("AWS4{}", params.secret_access_key).as_bytes(),
        date.as_bytes(),
    );
    let k_region = hmac_sha256(&k_date, params.region.as_bytes());
    let k_service = hmac_sha256(&k_region, params.service.as_bytes());
    let k_signing = hmac_sha256(&k_service, b"aws4_request");
    let signature = hex(&hmac_sha256(&k_signing, string_to_sign.as_bytes()));

    format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        params.access_key_id
    )
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
