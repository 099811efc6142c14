//! The host-facing provider: the [`ProviderService`] trait and the
//! [`TencentCloudProvider`] that implements it.
//!
//! The host drives every resource through the same handful of calls
//! (plan, create, read, update, delete, import, read data source). The
//! provider validates input against the resource schema, then dispatches by
//! type name to the registered [`Resource`](crate::resource::Resource) or
//! [`DataSource`](crate::resource::DataSource).

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::ProviderConfig;
use crate::connectivity::TencentCloudClient;
use crate::error::{ProviderError, Result};
use crate::helper;
use crate::logging::{new_log_id, LogElapsed};
use crate::plan;
use crate::resource::Registry;
use crate::schema::{Diagnostic, ProviderSchema};
use crate::state::ResourceData;
use crate::types::{ImportedResource, PlanResult, ProviderMetadata};
use crate::validation;

/// Operations a host calls on a provider.
///
/// # Example
///
/// ```ignore
/// use tencentcloud_provider::{ProviderService, TencentCloudProvider};
/// use serde_json::json;
///
/// let provider = TencentCloudProvider::new();
/// provider
///     .configure(json!({"region": "ap-guangzhou"}))
///     .await?;
/// let state = provider
///     .create(
///         "tencentcloud_clickhouse_backup",
///         json!({"instance_id": "cdwch-xxxx", "cos_bucket_name": "bucket"}),
///     )
///     .await?;
/// ```
#[async_trait::async_trait]
pub trait ProviderService: Send + Sync + 'static {
    // =========================================================================
    // Schema & Metadata
    // =========================================================================

    /// Return the provider's schema including all resources and data sources.
    fn schema(&self) -> ProviderSchema;

    /// Return the resource and data source names, derived from the schema.
    fn metadata(&self) -> ProviderMetadata {
        let schema = self.schema();
        let mut resources: Vec<String> = schema.resources.keys().cloned().collect();
        let mut data_sources: Vec<String> = schema.data_sources.keys().cloned().collect();
        resources.sort();
        data_sources.sort();
        ProviderMetadata {
            resources,
            data_sources,
        }
    }

    // =========================================================================
    // Provider Lifecycle
    // =========================================================================

    /// Validate the provider configuration before configuring.
    async fn validate_provider_config(&self, config: Value) -> Result<Vec<Diagnostic>> {
        let _ = config;
        Ok(vec![])
    }

    /// Configure the provider with credentials and settings.
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>>;

    /// Stop the provider gracefully.
    async fn stop(&self) -> Result<()> {
        Ok(())
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Validate a resource's configuration before planning.
    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>> {
        let _ = (resource_type, config);
        Ok(vec![])
    }

    /// Upgrade resource state from an older schema version.
    async fn upgrade_resource_state(
        &self,
        resource_type: &str,
        version: i64,
        state: Value,
    ) -> Result<Value> {
        let _ = (resource_type, version);
        Ok(state)
    }

    /// Plan changes for a resource.
    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        proposed_state: Value,
        config: Value,
    ) -> Result<PlanResult>;

    /// Create a new resource.
    async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value>;

    /// Read the current state of a resource. Null means it no longer exists.
    async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value>;

    /// Update an existing resource.
    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value>;

    /// Delete a resource.
    async fn delete(&self, resource_type: &str, current_state: Value) -> Result<()>;

    /// Import existing infrastructure into management.
    async fn import_resource(&self, resource_type: &str, id: &str) -> Result<Vec<ImportedResource>> {
        let _ = id;
        Err(ProviderError::Unimplemented(format!(
            "Import not supported for resource type: {}",
            resource_type
        )))
    }

    // =========================================================================
    // Data Source Operations
    // =========================================================================

    /// Validate a data source's configuration.
    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>> {
        let _ = (data_source_type, config);
        Ok(vec![])
    }

    /// Read data from the cloud.
    async fn read_data_source(&self, data_source_type: &str, config: Value) -> Result<Value> {
        let _ = config;
        Err(ProviderError::UnknownResource(format!(
            "Unknown data source type: {}",
            data_source_type
        )))
    }
}

fn reject_errors(diagnostics: Vec<Diagnostic>) -> Result<()> {
    let errors: Vec<String> = diagnostics
        .into_iter()
        .filter(Diagnostic::is_error)
        .map(|d| match d.detail {
            Some(detail) => format!("{}: {}", d.summary, detail),
            None => d.summary,
        })
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ProviderError::Validation(errors.join("; ")))
    }
}

/// Tencent Cloud provider serving ClickHouse, Cloud Monitor, Grafana and
/// Prometheus resources.
#[derive(Debug)]
pub struct TencentCloudProvider {
    registry: Registry,
    client: RwLock<Option<Arc<TencentCloudClient>>>,
}

impl Default for TencentCloudProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TencentCloudProvider {
    /// Provider with every built-in resource and data source.
    pub fn new() -> Self {
        Self::with_registry(crate::services::registry())
    }

    /// Provider serving only what `registry` holds.
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            client: RwLock::new(None),
        }
    }

    /// Configure from already-resolved settings.
    pub fn configure_with(&self, config: ProviderConfig) -> Result<()> {
        let client = TencentCloudClient::new(config)?;
        *self.client.write() = Some(Arc::new(client));
        Ok(())
    }

    /// The configured API client.
    pub fn client(&self) -> Result<Arc<TencentCloudClient>> {
        self.client.read().clone().ok_or_else(|| {
            ProviderError::FailedPrecondition("provider is not configured".to_string())
        })
    }

    /// The registry this provider dispatches to.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

#[async_trait::async_trait]
impl ProviderService for TencentCloudProvider {
    fn schema(&self) -> ProviderSchema {
        self.registry.provider_schema(ProviderConfig::schema())
    }

    async fn validate_provider_config(&self, config: Value) -> Result<Vec<Diagnostic>> {
        let mut diagnostics = validation::validate(&ProviderConfig::schema(), &config);
        if diagnostics.is_empty() {
            if let Err(err) = ProviderConfig::from_value(&config) {
                diagnostics.push(Diagnostic::error(err.to_string()));
            }
        }
        Ok(diagnostics)
    }

    #[instrument(skip(self, config), name = "provider.configure")]
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>> {
        let diagnostics = validation::validate(&ProviderConfig::schema(), &config);
        if !diagnostics.is_empty() {
            warn!(count = diagnostics.len(), "provider configuration is invalid");
            return Ok(diagnostics);
        }
        let config = ProviderConfig::from_value(&config)?;
        info!(region = %config.region, "Configure completed successfully");
        self.configure_with(config)?;
        Ok(vec![])
    }

    async fn stop(&self) -> Result<()> {
        info!("Stop called");
        *self.client.write() = None;
        Ok(())
    }

    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>> {
        let resource = self.registry.resource(resource_type)?;
        Ok(validation::validate(&resource.schema(), &config))
    }

    #[instrument(skip(self, prior_state, proposed_state, _config), name = "resource.plan")]
    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        proposed_state: Value,
        _config: Value,
    ) -> Result<PlanResult> {
        let resource = self.registry.resource(resource_type)?;
        let schema = resource.schema();
        if !proposed_state.is_null() {
            let mut checked = proposed_state.clone();
            plan::apply_defaults(&schema, &mut checked);
            reject_errors(validation::validate(&schema, &checked))?;
        }
        let result = plan::plan(&schema, prior_state.as_ref(), &proposed_state);
        debug!(
            resource_type,
            changes = result.changes.len(),
            requires_replace = result.requires_replace,
            "Plan completed"
        );
        Ok(result)
    }

    #[instrument(skip(self, planned_state), name = "resource.create", fields(log_id = %new_log_id()))]
    async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value> {
        let resource = self.registry.resource(resource_type)?;
        let schema = resource.schema();
        let mut planned = planned_state;
        plan::apply_defaults(&schema, &mut planned);
        reject_errors(validation::validate(&schema, &planned))?;

        let client = self.client()?;
        let _elapsed = LogElapsed::new(format!("resource.{}.create", resource_type));
        let mut d = ResourceData::new(planned);
        resource.create(&client, &mut d).await?;
        info!(resource_type, id = %d.id(), "Create completed successfully");
        Ok(d.into_state())
    }

    #[instrument(skip(self, current_state), name = "resource.read", fields(log_id = %new_log_id()))]
    async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value> {
        let resource = self.registry.resource(resource_type)?;
        let client = self.client()?;
        let _elapsed = LogElapsed::new(format!("resource.{}.read", resource_type));
        let mut d = ResourceData::new(current_state);
        resource.read(&client, &mut d).await?;
        if d.id().is_empty() {
            warn!(resource_type, "resource not found, removing from state");
        }
        Ok(d.into_state())
    }

    #[instrument(skip(self, prior_state, planned_state), name = "resource.update", fields(log_id = %new_log_id()))]
    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value> {
        let resource = self.registry.resource(resource_type)?;
        let schema = resource.schema();
        let mut planned = planned_state;
        plan::apply_defaults(&schema, &mut planned);
        reject_errors(validation::validate(&schema, &planned))?;

        let mut d = ResourceData::with_prior(prior_state, planned);
        d.check_immutable(resource.immutable_args())?;
        // Force-new fields are replaced by the host, never updated in place.
        d.check_immutable(&schema.force_new_fields())?;

        let client = self.client()?;
        let _elapsed = LogElapsed::new(format!("resource.{}.update", resource_type));
        resource.update(&client, &mut d).await?;
        info!(resource_type, id = %d.id(), "Update completed successfully");
        Ok(d.into_state())
    }

    #[instrument(skip(self, current_state), name = "resource.delete", fields(log_id = %new_log_id()))]
    async fn delete(&self, resource_type: &str, current_state: Value) -> Result<()> {
        let resource = self.registry.resource(resource_type)?;
        let client = self.client()?;
        let _elapsed = LogElapsed::new(format!("resource.{}.delete", resource_type));
        let mut d = ResourceData::new(current_state);
        resource.delete(&client, &mut d).await?;
        info!(resource_type, id = %d.id(), "Delete completed successfully");
        Ok(())
    }

    #[instrument(skip(self), name = "resource.import", fields(log_id = %new_log_id()))]
    async fn import_resource(&self, resource_type: &str, id: &str) -> Result<Vec<ImportedResource>> {
        let resource = self.registry.resource(resource_type)?;
        let client = self.client()?;
        let mut d = ResourceData::from_id(id);
        resource.import(&client, &mut d).await?;
        if d.id().is_empty() {
            return Err(ProviderError::NotFound(format!(
                "cannot import non-existent remote object {}",
                id
            )));
        }
        info!(resource_type, id, "Import completed successfully");
        Ok(vec![ImportedResource::new(resource_type, d.into_state())])
    }

    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>> {
        let data_source = self.registry.data_source(data_source_type)?;
        Ok(validation::validate(&data_source.schema(), &config))
    }

    #[instrument(skip(self, config), name = "data_source.read", fields(log_id = %new_log_id()))]
    async fn read_data_source(&self, data_source_type: &str, config: Value) -> Result<Value> {
        let data_source = self.registry.data_source(data_source_type)?;
        let schema = data_source.schema();
        let mut config = config;
        plan::apply_defaults(&schema, &mut config);
        reject_errors(validation::validate(&schema, &config))?;

        let client = self.client()?;
        let _elapsed = LogElapsed::new(format!("data_source.{}.read", data_source_type));
        let mut d = ResourceData::new(config);
        data_source.read(&client, &mut d).await?;

        if let Some(path) = d.get_str("result_output_file") {
            helper::write_to_file(path, d.get(data_source.result_key()))?;
        }
        debug!(data_source_type, id = %d.id(), "ReadDataSource completed successfully");
        Ok(d.into_state())
    }
}
