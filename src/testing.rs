//! Test harness for providers.
//!
//! [`ProviderTester`] drives a [`ProviderService`] in-process. Pointed at a
//! mock HTTP endpoint it exercises the full stack, from schema validation
//! through request signing to response decoding.
//!
//! # Example
//!
//! ```ignore
//! use tencentcloud_provider::testing::ProviderTester;
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_create_account() {
//!     let server = wiremock::MockServer::start().await;
//!     // mount mocks for ActionAlterCkUser and DescribeCkSqlApis ...
//!
//!     let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
//!     let state = tester
//!         .create(
//!             "tencentcloud_clickhouse_account",
//!             json!({"instance_id": "cdwch-1", "user_name": "reader", "password": "pw"}),
//!         )
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(state["id"], "cdwch-1#reader");
//! }
//! ```

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::provider::{ProviderService, TencentCloudProvider};
use crate::resource::Registry;
use crate::schema::{Diagnostic, ProviderSchema};
use crate::types::{ImportedResource, PlanResult};
use serde_json::{json, Value};
use std::fmt::Write as _;

/// Provider settings for a mock endpoint: fixed credentials, a short retry
/// interval and one second retry timeouts.
pub fn endpoint_config(endpoint: &str) -> Value {
    json!({
        "secret_id": "AKIDTEST",
        "secret_key": "test-key",
        "region": "ap-guangzhou",
        "endpoint": endpoint,
        "retry_interval_ms": 10,
        "read_retry_timeout": 1,
        "write_retry_timeout": 1,
    })
}

/// Failure of a harness call that reports diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum TestError {
    /// The call returned error diagnostics.
    #[error("{}", describe_diagnostics(.0))]
    Diagnostics(Vec<Diagnostic>),
    /// The call itself failed.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

fn describe_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut out = format!("Operation failed with {} diagnostic(s):", diagnostics.len());
    for diag in diagnostics {
        let _ = write!(out, "\n  [{:?}] {}", diag.severity, diag.summary);
        if let Some(detail) = &diag.detail {
            let _ = write!(out, ": {}", detail);
        }
        if let Some(attr) = &diag.attribute {
            let _ = write!(out, " (at {})", attr);
        }
    }
    out
}

/// Keep only error diagnostics; none means success.
fn errors_only(diagnostics: Vec<Diagnostic>) -> Result<(), TestError> {
    let errors: Vec<Diagnostic> = diagnostics.into_iter().filter(Diagnostic::is_error).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TestError::Diagnostics(errors))
    }
}

/// Drives a [`ProviderService`] the way a host would, minus the transport.
pub struct ProviderTester<P: ProviderService> {
    provider: P,
}

impl ProviderTester<TencentCloudProvider> {
    /// Every built-in type, configured against `endpoint`.
    pub fn with_endpoint(endpoint: &str) -> Result<Self, ProviderError> {
        Self::with_registry(crate::services::registry(), endpoint)
    }

    /// Only the types in `registry`, configured against `endpoint`.
    pub fn with_registry(registry: Registry, endpoint: &str) -> Result<Self, ProviderError> {
        let provider = TencentCloudProvider::with_registry(registry);
        let config = ProviderConfig::from_value_with_env(&endpoint_config(endpoint), |_| None)?;
        provider.configure_with(config)?;
        Ok(Self::new(provider))
    }
}

impl<P: ProviderService> ProviderTester<P> {
    /// Wraps an already configured provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Full provider schema.
    pub fn schema(&self) -> ProviderSchema {
        self.provider.schema()
    }

    /// Registered resource type names.
    pub fn resource_types(&self) -> Vec<String> {
        self.provider.metadata().resources
    }

    /// Registered data source type names.
    pub fn data_source_types(&self) -> Vec<String> {
        self.provider.metadata().data_sources
    }

    /// Fails on error diagnostics only.
    pub async fn validate_provider_config(&self, config: Value) -> Result<(), TestError> {
        errors_only(self.provider.validate_provider_config(config).await?)
    }

    /// Configure the provider; fails on error diagnostics only.
    pub async fn configure(&self, config: Value) -> Result<(), TestError> {
        errors_only(self.provider.configure(config).await?)
    }

    /// Stop the provider.
    pub async fn stop(&self) -> Result<(), ProviderError> {
        self.provider.stop().await
    }

    /// Fails on error diagnostics only.
    pub async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        errors_only(
            self.provider
                .validate_resource_config(resource_type, config)
                .await?,
        )
    }

    /// Plan with no prior state.
    pub async fn plan_create(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, None, config.clone(), config)
            .await
    }

    /// Plan moving `prior_state` to `config`.
    pub async fn plan_update(
        &self,
        resource_type: &str,
        prior_state: Value,
        config: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, Some(prior_state), config.clone(), config)
            .await
    }

    /// Plan destroying `prior_state`.
    pub async fn plan_delete(
        &self,
        resource_type: &str,
        prior_state: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, Some(prior_state), Value::Null, Value::Null)
            .await
    }

    /// Create from a planned state.
    pub async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value, ProviderError> {
        self.provider.create(resource_type, planned_state).await
    }

    /// Refresh state; `Value::Null` means the object is gone.
    pub async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value, ProviderError> {
        self.provider.read(resource_type, current_state).await
    }

    /// Apply `planned_state` over `prior_state`.
    pub async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        self.provider
            .update(resource_type, prior_state, planned_state)
            .await
    }

    /// Destroy the object in `current_state`.
    pub async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError> {
        self.provider.delete(resource_type, current_state).await
    }

    /// Import by id.
    pub async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        self.provider.import_resource(resource_type, id).await
    }

    /// Read a data source from its configuration.
    pub async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        self.provider
            .read_data_source(data_source_type, config)
            .await
    }

    /// Plan, create, then read back.
    pub async fn lifecycle_create(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let plan = self.plan_create(resource_type, config).await?;
        let created = self.create(resource_type, plan.planned_state).await?;
        self.read(resource_type, created).await
    }

    /// Plan, update, then read back.
    pub async fn lifecycle_update(
        &self,
        resource_type: &str,
        prior_state: Value,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let plan = self
            .plan_update(resource_type, prior_state.clone(), config)
            .await?;
        let updated = self
            .update(resource_type, prior_state, plan.planned_state)
            .await?;
        self.read(resource_type, updated).await
    }

    /// Create from `initial`, update to `changed`, then destroy. Returns the
    /// state read back after the update.
    pub async fn lifecycle_crud(
        &self,
        resource_type: &str,
        initial: Value,
        changed: Value,
    ) -> Result<Value, ProviderError> {
        let created = self.lifecycle_create(resource_type, initial).await?;
        let updated = self
            .lifecycle_update(resource_type, created, changed)
            .await?;
        self.plan_delete(resource_type, updated.clone()).await?;
        self.delete(resource_type, updated.clone()).await?;
        Ok(updated)
    }
}

fn changed_paths(plan: &PlanResult) -> Vec<&str> {
    plan.changes.iter().map(|c| c.path.as_str()).collect()
}

fn error_summaries(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics
        .iter()
        .filter(|d| d.is_error())
        .map(|d| d.summary.as_str())
        .collect()
}

/// Panics unless the plan creates the object.
pub fn assert_plan_creates(plan: &PlanResult) {
    assert!(plan.has_changes(), "Expected plan to create, but got no changes");
    assert!(!plan.requires_replace, "Expected plan to create, not replace");
}

/// Panics if the plan changes anything.
pub fn assert_plan_no_changes(plan: &PlanResult) {
    assert!(
        !plan.has_changes(),
        "Expected no changes, but got {:?}",
        changed_paths(plan)
    );
}

/// Panics unless the plan replaces the object.
pub fn assert_plan_replaces(plan: &PlanResult) {
    assert!(
        plan.requires_replace,
        "Expected plan to require replacement, changes: {:?}",
        changed_paths(plan)
    );
}

/// Panics if the plan requires replacement.
pub fn assert_plan_updates_in_place(plan: &PlanResult) {
    assert!(
        !plan.requires_replace,
        "Expected plan to update in place, but it requires replacement"
    );
}

/// Panics unless the plan changes `path`.
pub fn assert_plan_changes_attribute(plan: &PlanResult, path: &str) {
    let paths = changed_paths(plan);
    assert!(
        paths.contains(&path),
        "Expected plan to change '{}', changed: {:?}",
        path,
        paths
    );
}

/// Panics if the plan changes `path`.
pub fn assert_plan_does_not_change_attribute(plan: &PlanResult, path: &str) {
    assert!(
        !changed_paths(plan).contains(&path),
        "Expected plan to leave '{}' unchanged",
        path
    );
}

/// Panics on any error diagnostic.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors = error_summaries(diagnostics);
    assert!(
        errors.is_empty(),
        "Expected no errors, but got {} error(s): {:?}",
        errors.len(),
        errors
    );
}

/// Panics unless there is at least one error diagnostic.
pub fn assert_has_errors(diagnostics: &[Diagnostic]) {
    assert!(
        !error_summaries(diagnostics).is_empty(),
        "Expected at least one error, but got none"
    );
}

/// Panics unless some error summary contains `substring`.
pub fn assert_error_contains(diagnostics: &[Diagnostic], substring: &str) {
    let errors = error_summaries(diagnostics);
    assert!(
        errors.iter().any(|s| s.contains(substring)),
        "Expected an error containing '{}', errors: {:?}",
        substring,
        errors
    );
}
