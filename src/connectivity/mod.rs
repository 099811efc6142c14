//! Signed JSON client for the Tencent Cloud API.
//!
//! Every product is reached the same way: a `POST /` of the JSON request to
//! `{protocol}://{service}.{domain}`, with the action and API version in
//! `X-TC-*` headers and a TC3-HMAC-SHA256 `Authorization` header. Responses
//! are wrapped in `{"Response": {...}}`; failures carry `Response.Error`.

pub mod sign;

use crate::config::ProviderConfig;
use crate::error::{
    ApiError, ProviderError, Result, CLIENT_HTTP_STATUS_ERROR, CLIENT_NETWORK_ERROR,
    CLIENT_PARSE_ERROR,
};
use crate::ratelimit::RateLimiter;
use crate::retry::{self, RetryConfig, RetryError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use tracing::{debug, error};

/// A cloud product and the API version its calls use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// Service name, also the host prefix.
    pub service: &'static str,
    /// API version sent as `X-TC-Version`.
    pub version: &'static str,
}

/// Cloud Data Warehouse for ClickHouse.
pub const CDWCH: Product = Product {
    service: "cdwch",
    version: "2020-09-15",
};

/// Cloud Monitor, which also serves the Grafana and Prometheus (TMP) APIs.
pub const MONITOR: Product = Product {
    service: "monitor",
    version: "2018-07-24",
};

const LANGUAGE: &str = "en-US";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: Value,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

/// Client shared by every resource of one configured provider.
#[derive(Debug)]
pub struct TencentCloudClient {
    http: reqwest::Client,
    config: ProviderConfig,
    limiter: RateLimiter,
}

impl TencentCloudClient {
    /// Build a client from resolved configuration.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ProviderError::Configuration(format!("failed to build http client: {}", e)))?;
        let limiter = RateLimiter::new(config.rate_limit);
        Ok(Self {
            http,
            config,
            limiter,
        })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Region calls are sent to.
    pub fn region(&self) -> &str {
        &self.config.region
    }

    /// Retry timeouts and interval.
    pub fn retry_config(&self) -> RetryConfig {
        self.config.retry
    }

    /// Issue `action` against `product` and decode the `Response` object.
    pub async fn call<Req, Resp>(&self, product: Product, action: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        self.limiter.check(action).await;

        let payload = serde_json::to_string(request)?;
        match self.send(product, action, &payload).await {
            Ok((body, response)) => {
                debug!(
                    action,
                    request = %payload,
                    response = %body,
                    "api[{}] success", action
                );
                Ok(serde_json::from_value(response).map_err(|e| {
                    ApiError::client(CLIENT_PARSE_ERROR, format!("{}: {}", action, e))
                })?)
            },
            Err(err) => {
                error!(action, request = %payload, reason = %err, "api[{}] fail", action);
                Err(err.into())
            },
        }
    }

    async fn send(
        &self,
        product: Product,
        action: &str,
        payload: &str,
    ) -> std::result::Result<(String, Value), ApiError> {
        let host = self.config.host(product.service);
        let timestamp = chrono::Utc::now().timestamp();
        let authorization = sign::authorization(&sign::SignRequest {
            secret_id: &self.config.secret_id,
            secret_key: &self.config.secret_key,
            service: product.service,
            host: &host,
            payload,
            timestamp,
        });

        let mut builder = self
            .http
            .post(format!("{}/", self.config.base_url(product.service)))
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header(reqwest::header::CONTENT_TYPE, sign::CONTENT_TYPE)
            .header("X-TC-Action", action)
            .header("X-TC-Version", product.version)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("X-TC-Region", &self.config.region)
            .header("X-TC-Language", LANGUAGE)
            .header(reqwest::header::HOST, &host)
            .body(payload.to_string());
        if let Some(token) = &self.config.security_token {
            builder = builder.header("X-TC-Token", token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::client(CLIENT_NETWORK_ERROR, e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::client(CLIENT_NETWORK_ERROR, e.to_string()))?;
        if !status.is_success() {
            return Err(ApiError::client(
                CLIENT_HTTP_STATUS_ERROR,
                format!("{}: {}", status, body),
            ));
        }

        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| ApiError::client(CLIENT_PARSE_ERROR, format!("{}: {}", e, body)))?;
        let request_id = envelope
            .response
            .get("RequestId")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if let Some(err) = envelope.response.get("Error") {
            let err: ErrorBody = serde_json::from_value(err.clone())
                .map_err(|e| ApiError::client(CLIENT_PARSE_ERROR, e.to_string()))?;
            return Err(ApiError::new(err.code, err.message, request_id));
        }
        Ok((body, envelope.response))
    }

    /// Retry `f` for up to the read timeout.
    pub async fn read_retry<T, F, Fut>(&self, f: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, RetryError>>,
    {
        let cfg = self.config.retry;
        retry::retry(cfg.read_timeout, cfg.interval, f).await
    }

    /// Retry `f` for up to the write timeout.
    pub async fn write_retry<T, F, Fut>(&self, f: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, RetryError>>,
    {
        let cfg = self.config.retry;
        retry::retry(cfg.write_timeout, cfg.interval, f).await
    }

    /// [`call`](Self::call) retried for up to the read timeout.
    pub async fn read_call<Req, Resp>(&self, product: Product, action: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        self.read_retry(move || async move {
            self.call(product, action, request)
                .await
                .map_err(|e| retry::retry_error(e, &[]))
        })
        .await
    }

    /// [`call`](Self::call) retried for up to the write timeout. Codes in
    /// `additional` are retried on top of the default retryable set.
    pub async fn write_call<Req, Resp>(
        &self,
        product: Product,
        action: &str,
        request: &Req,
        additional: &[&str],
    ) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        self.write_retry(move || async move {
            self.call(product, action, request)
                .await
                .map_err(|e| retry::retry_error(e, additional))
        })
        .await
    }
}
