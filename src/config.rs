//! Provider configuration: credentials, region, endpoints and timeouts.
//!
//! Every field can be given in the provider configuration block or through
//! a `TENCENTCLOUD_*` environment variable; the configuration block wins.

use crate::error::{ProviderError, Result};
use crate::ratelimit::DEFAULT_LIMIT;
use crate::retry::RetryConfig;
use crate::schema::{Attribute, Schema};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Default API domain suffix.
pub const DEFAULT_DOMAIN: &str = "tencentcloudapi.com";

/// Default per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Environment variable names.
pub mod env {
    /// Access key id.
    pub const SECRET_ID: &str = "TENCENTCLOUD_SECRET_ID";
    /// Access key secret.
    pub const SECRET_KEY: &str = "TENCENTCLOUD_SECRET_KEY";
    /// Temporary session token.
    pub const SECURITY_TOKEN: &str = "TENCENTCLOUD_SECURITY_TOKEN";
    /// Region.
    pub const REGION: &str = "TENCENTCLOUD_REGION";
    /// `HTTP` or `HTTPS`.
    pub const PROTOCOL: &str = "TENCENTCLOUD_PROTOCOL";
    /// Domain suffix.
    pub const DOMAIN: &str = "TENCENTCLOUD_DOMAIN";
    /// Base URL replacing `{protocol}://{service}.{domain}` for every product.
    pub const ENDPOINT: &str = "TENCENTCLOUD_ENDPOINT";
    /// Read retry timeout in seconds.
    pub const READ_RETRY_TIMEOUT: &str = "TENCENTCLOUD_READ_RETRY_TIMEOUT";
    /// Write retry timeout in seconds.
    pub const WRITE_RETRY_TIMEOUT: &str = "TENCENTCLOUD_WRITE_RETRY_TIMEOUT";
}

/// URL scheme used to reach the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    /// Plain HTTP.
    Http,
    /// HTTPS.
    #[default]
    Https,
}

impl Protocol {
    /// URL scheme for this protocol.
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl std::str::FromStr for Protocol {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "HTTP" => Ok(Self::Http),
            "HTTPS" => Ok(Self::Https),
            other => Err(ProviderError::Configuration(format!(
                "protocol must be HTTP or HTTPS, got {:?}",
                other
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    secret_id: Option<String>,
    secret_key: Option<String>,
    security_token: Option<String>,
    region: Option<String>,
    protocol: Option<String>,
    domain: Option<String>,
    endpoint: Option<String>,
    read_retry_timeout: Option<u64>,
    write_retry_timeout: Option<u64>,
    retry_interval_ms: Option<u64>,
    request_timeout: Option<u64>,
    rate_limit: Option<u32>,
}

/// Resolved provider configuration.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Access key id.
    pub secret_id: String,
    /// Access key secret.
    pub secret_key: String,
    /// Temporary session token.
    pub security_token: Option<String>,
    /// Region every call is sent to.
    pub region: String,
    /// URL scheme.
    pub protocol: Protocol,
    /// Domain suffix.
    pub domain: String,
    /// Base URL override, used for private endpoints and tests.
    pub endpoint: Option<String>,
    /// HTTP timeout of a single request.
    pub request_timeout: Duration,
    /// Retry timeouts and interval.
    pub retry: RetryConfig,
    /// Requests per second per action.
    pub rate_limit: u32,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"<redacted>")
            .field("security_token", &self.security_token.as_ref().map(|_| "<redacted>"))
            .field("region", &self.region)
            .field("protocol", &self.protocol)
            .field("domain", &self.domain)
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("retry", &self.retry)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

impl ProviderConfig {
    /// Schema of the provider configuration block.
    pub fn schema() -> Schema {
        Schema::v0()
            .with_attribute(
                "secret_id",
                Attribute::optional_string()
                    .with_description("Access key id. Falls back to TENCENTCLOUD_SECRET_ID."),
            )
            .with_attribute(
                "secret_key",
                Attribute::optional_string()
                    .sensitive()
                    .with_description("Access key secret. Falls back to TENCENTCLOUD_SECRET_KEY."),
            )
            .with_attribute(
                "security_token",
                Attribute::optional_string()
                    .sensitive()
                    .with_description("Session token of temporary credentials."),
            )
            .with_attribute(
                "region",
                Attribute::optional_string()
                    .with_description("Region, e.g. ap-guangzhou. Falls back to TENCENTCLOUD_REGION."),
            )
            .with_attribute(
                "protocol",
                Attribute::optional_string().with_allowed_strings(&["HTTP", "HTTPS"]),
            )
            .with_attribute("domain", Attribute::optional_string())
            .with_attribute(
                "endpoint",
                Attribute::optional_string()
                    .with_description("Base URL override. `{service}` is replaced by the product name."),
            )
            .with_attribute("read_retry_timeout", Attribute::optional_int64())
            .with_attribute("write_retry_timeout", Attribute::optional_int64())
            .with_attribute("retry_interval_ms", Attribute::optional_int64())
            .with_attribute("request_timeout", Attribute::optional_int64())
            .with_attribute("rate_limit", Attribute::optional_int64().with_int_range(1, 1000))
    }

    /// Resolve the configuration from `config`, falling back to the process environment.
    pub fn from_value(config: &Value) -> Result<Self> {
        Self::from_value_with_env(config, |key| std::env::var(key).ok())
    }

    /// Resolve the configuration with a custom environment lookup.
    pub fn from_value_with_env<F>(config: &Value, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw: RawConfig = if config.is_null() {
            RawConfig::default()
        } else {
            serde_json::from_value(config.clone())?
        };

        let pick = |value: Option<String>, key: &str| {
            value
                .filter(|v| !v.is_empty())
                .or_else(|| lookup(key).filter(|v| !v.is_empty()))
        };

        let secret_id = pick(raw.secret_id, env::SECRET_ID);
        let secret_key = pick(raw.secret_key, env::SECRET_KEY);
        let (secret_id, secret_key) = match (secret_id, secret_key) {
            (Some(id), Some(key)) => (id, key),
            _ => {
                return Err(ProviderError::Configuration(
                    "secret_id and secret_key must be provided".to_string(),
                ))
            },
        };
        let region = pick(raw.region, env::REGION).ok_or_else(|| {
            ProviderError::Configuration("region must be provided".to_string())
        })?;
        let protocol = match pick(raw.protocol, env::PROTOCOL) {
            Some(p) => p.parse()?,
            None => Protocol::default(),
        };

        let endpoint = pick(raw.endpoint, env::ENDPOINT).map(|e| e.trim_end_matches('/').to_string());
        if let Some(endpoint) = &endpoint {
            if endpoint_authority(endpoint).is_none() {
                return Err(ProviderError::Configuration(format!(
                    "endpoint must be an absolute URL, got {:?}",
                    endpoint
                )));
            }
        }

        let mut retry = RetryConfig::default();
        if let Some(secs) = seconds(raw.read_retry_timeout, &lookup, env::READ_RETRY_TIMEOUT)? {
            retry.read_timeout = secs;
        }
        if let Some(secs) = seconds(raw.write_retry_timeout, &lookup, env::WRITE_RETRY_TIMEOUT)? {
            retry.write_timeout = secs;
        }
        if let Some(ms) = raw.retry_interval_ms {
            retry.interval = Duration::from_millis(ms);
        }

        Ok(Self {
            secret_id,
            secret_key,
            security_token: pick(raw.security_token, env::SECURITY_TOKEN),
            region,
            protocol,
            domain: pick(raw.domain, env::DOMAIN).unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            endpoint,
            request_timeout: raw
                .request_timeout
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            retry,
            rate_limit: raw.rate_limit.unwrap_or(DEFAULT_LIMIT),
        })
    }

    /// Base URL for `service`, e.g. `https://cdwch.tencentcloudapi.com`.
    pub fn base_url(&self, service: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.replace(SERVICE_PLACEHOLDER, service),
            None => format!("{}://{}", self.protocol.scheme(), self.host(service)),
        }
    }

    /// Host header value for `service`. It is signed, so with an endpoint
    /// override it must be the authority of that endpoint.
    pub fn host(&self, service: &str) -> String {
        self.endpoint
            .as_deref()
            .and_then(|e| endpoint_authority(&e.replace(SERVICE_PLACEHOLDER, service)))
            .unwrap_or_else(|| format!("{}.{}", service, self.domain))
    }
}

/// Placeholder in `endpoint` replaced by the product name.
pub const SERVICE_PLACEHOLDER: &str = "{service}";

/// `host[:port]` of `endpoint`, the value a client sends as `Host`.
fn endpoint_authority(endpoint: &str) -> Option<String> {
    let url = reqwest::Url::parse(&endpoint.replace(SERVICE_PLACEHOLDER, "service")).ok()?;
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn seconds<F>(value: Option<u64>, lookup: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(secs) = value {
        return Ok(Some(Duration::from_secs(secs)));
    }
    match lookup(key) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| {
                ProviderError::Configuration(format!("{} must be an integer, got {:?}", key, raw))
            }),
        _ => Ok(None),
    }
}
