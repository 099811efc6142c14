//! Tencent Cloud Provider
//!
//! A declarative infrastructure provider for Tencent Cloud. It manages
//! ClickHouse (CDWCH) backups, accounts and configuration, Cloud Monitor
//! alarm policies and notice templates, Managed Prometheus alert groups and
//! rules, and Managed Grafana instance settings.
//!
//! # Overview
//!
//! - **Provider**: [`TencentCloudProvider`] implements [`ProviderService`],
//!   the plan / create / read / update / delete / import surface a host
//!   drives.
//! - **Resources and data sources**: one [`Resource`] or [`DataSource`] per
//!   type name, collected in a [`Registry`] under [`services`].
//! - **Cloud API client**: [`TencentCloudClient`] signs every call with
//!   TC3-HMAC-SHA256, rate limits it, and retries transient failures.
//! - **Waiters**: [`waiter::StateChangeConf`] polls asynchronous cloud
//!   operations until they reach a target state.
//! - **Testing**: [`testing::ProviderTester`] drives a provider in-process.
//!
//! # Quick Start
//!
//! ```ignore
//! use tencentcloud_provider::{ProviderService, TencentCloudProvider};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     tencentcloud_provider::init_logging();
//!
//!     let provider = TencentCloudProvider::new();
//!     provider
//!         .configure(json!({
//!             "secret_id": "AKID...",
//!             "secret_key": "...",
//!             "region": "ap-guangzhou"
//!         }))
//!         .await?;
//!
//!     let state = provider
//!         .create(
//!             "tencentcloud_clickhouse_account",
//!             json!({
//!                 "instance_id": "cdwch-xxxxxx",
//!                 "user_name": "analyst",
//!                 "password": "Passw0rd!"
//!             }),
//!         )
//!         .await?;
//!     println!("{}", state["id"]);
//!     Ok(())
//! }
//! ```
//!
//! # Credentials
//!
//! `secret_id`, `secret_key`, `security_token` and `region` fall back to the
//! `TENCENTCLOUD_SECRET_ID`, `TENCENTCLOUD_SECRET_KEY`,
//! `TENCENTCLOUD_SECURITY_TOKEN` and `TENCENTCLOUD_REGION` environment
//! variables when absent from the provider block.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod connectivity;
pub mod error;
pub mod helper;
pub mod logging;
pub mod plan;
pub mod provider;
pub mod ratelimit;
pub mod resource;
pub mod retry;
pub mod schema;
pub mod services;
pub mod state;
pub mod testing;
pub mod types;
pub mod validation;
pub mod waiter;

// Re-export main types at crate root
pub use config::ProviderConfig;
pub use connectivity::TencentCloudClient;
pub use error::{ApiError, ProviderError, Result};
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use provider::{ProviderService, TencentCloudProvider};
pub use resource::{DataSource, Registry, Resource};
pub use schema::ProviderSchema;
pub use state::ResourceData;
pub use types::{AttributeChange, ImportedResource, PlanResult, ProviderMetadata};
pub use validation::{is_valid, validate, validate_result};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
