//! TC3-HMAC-SHA256 request signing.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Signature algorithm name.
pub const ALGORITHM: &str = "TC3-HMAC-SHA256";

/// Content type every request is sent with; part of the signature.
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

const SIGNED_HEADERS: &str = "content-type;host";

/// Inputs of one signature.
#[derive(Debug, Clone, Copy)]
pub struct SignRequest<'a> {
    /// Access key id.
    pub secret_id: &'a str,
    /// Access key secret.
    pub secret_key: &'a str,
    /// Product name, e.g. `cdwch`.
    pub service: &'a str,
    /// Host header, e.g. `cdwch.tencentcloudapi.com`.
    pub host: &'a str,
    /// JSON request body.
    pub payload: &'a str,
    /// Unix timestamp in seconds, also sent as `X-TC-Timestamp`.
    pub timestamp: i64,
}

pub(crate) fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

pub(crate) fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn utc_date(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .format("%Y-%m-%d")
        .to_string()
}

/// Canonical request of a JSON POST to `/`.
pub fn canonical_request(host: &str, payload: &str) -> String {
    format!(
        "POST\n/\n\ncontent-type:{}\nhost:{}\n\n{}\n{}",
        CONTENT_TYPE,
        host,
        SIGNED_HEADERS,
        sha256_hex(payload.as_bytes())
    )
}

/// Build the `Authorization` header value for `req`.
pub fn authorization(req: &SignRequest<'_>) -> String {
    let date = utc_date(req.timestamp);
    let scope = format!("{}/{}/tc3_request", date, req.service);

    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        req.timestamp,
        scope,
        sha256_hex(canonical_request(req.host, req.payload).as_bytes())
    );

    let secret_date = hmac_sha256(format!("TC3{}", req.secret_key).as_bytes(), date.as_bytes());
    let secret_service = hmac_sha256(&secret_date, req.service.as_bytes());
    let secret_signing = hmac_sha256(&secret_service, b"tc3_request");
    let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes()));

    format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, req.secret_id, scope, SIGNED_HEADERS, signature
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(payload: &str) -> SignRequest<'_> {
        SignRequest {
            secret_id: "AKIDEXAMPLE",
            secret_key: "secret",
            service: "cdwch",
            host: "cdwch.tencentcloudapi.com",
            payload,
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_sha256_hex_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hmac_known_answer() {
        // RFC 4231 test case 2
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_canonical_request_layout() {
        let canonical = canonical_request("monitor.tencentcloudapi.com", "{}");
        let lines: Vec<&str> = canonical.split('\n').collect();
        assert_eq!(lines[0], "POST");
        assert_eq!(lines[1], "/");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "content-type:application/json; charset=utf-8");
        assert_eq!(lines[4], "host:monitor.tencentcloudapi.com");
        assert_eq!(lines[6], "content-type;host");
        assert_eq!(lines[7], sha256_hex(b"{}"));
    }

    #[test]
    fn test_authorization_header_shape() {
        let header = authorization(&request(r#"{"InstanceId":"cdwch-1"}"#));
        assert!(header.starts_with(
            "TC3-HMAC-SHA256 Credential=AKIDEXAMPLE/2023-11-14/cdwch/tc3_request, SignedHeaders=content-type;host, Signature="
        ));
        let signature = header.rsplit("Signature=").next().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_depends_on_payload_and_key() {
        let a = authorization(&request("{}"));
        assert_eq!(a, authorization(&request("{}")));
        assert_ne!(a, authorization(&request(r#"{"Limit":20}"#)));

        let mut other_key = request("{}");
        other_key.secret_key = "another";
        assert_ne!(a, authorization(&other_key));
    }
}
