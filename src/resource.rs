//! Resource and data source traits, and the registry that maps type names
//! to implementations.

use crate::connectivity::TencentCloudClient;
use crate::error::{ProviderError, Result};
use crate::schema::{ProviderSchema, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A managed cloud object with a create/read/update/delete lifecycle.
///
/// Callbacks read their arguments from `d` and write results back to it.
/// `create` and `update` finish by re-reading the object. `read` clears the
/// id (`d.set_id("")`) when the object no longer exists.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name, e.g. `tencentcloud_clickhouse_backup`.
    fn name(&self) -> &'static str;

    /// Schema of the resource.
    fn schema(&self) -> Schema;

    /// Arguments that cannot be changed in place. Changing one fails the
    /// update before any API call is made.
    fn immutable_args(&self) -> &'static [&'static str] {
        &[]
    }

    /// Create the object and set the id.
    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()>;

    /// Refresh `d` from the API.
    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()>;

    /// Apply changed fields.
    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()>;

    /// Delete the object.
    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()>;

    /// Rebuild state from the id alone. The default reads the object.
    async fn import(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        self.read(client, d).await
    }
}

/// A read-only query against the cloud API.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Type name, e.g. `tencentcloud_clickhouse_instances`.
    fn name(&self) -> &'static str;

    /// Schema of the data source.
    fn schema(&self) -> Schema;

    /// Computed attribute written to `result_output_file` when it is set.
    fn result_key(&self) -> &'static str;

    /// Query the API and fill in computed attributes and the id.
    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()>;
}

/// Resource and data source implementations by type name.
#[derive(Default, Clone)]
pub struct Registry {
    resources: BTreeMap<&'static str, Arc<dyn Resource>>,
    data_sources: BTreeMap<&'static str, Arc<dyn DataSource>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .field("data_sources", &self.data_sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource under its name.
    pub fn with_resource<R: Resource + 'static>(mut self, resource: R) -> Self {
        self.resources.insert(resource.name(), Arc::new(resource));
        self
    }

    /// Register a data source under its name.
    pub fn with_data_source<D: DataSource + 'static>(mut self, data_source: D) -> Self {
        self.data_sources.insert(data_source.name(), Arc::new(data_source));
        self
    }

    /// Look up a resource.
    pub fn resource(&self, name: &str) -> Result<Arc<dyn Resource>> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownResource(name.to_string()))
    }

    /// Look up a data source.
    pub fn data_source(&self, name: &str) -> Result<Arc<dyn DataSource>> {
        self.data_sources
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownResource(format!("data source {}", name)))
    }

    /// Registered resource names, sorted.
    pub fn resource_names(&self) -> Vec<String> {
        self.resources.keys().map(|k| k.to_string()).collect()
    }

    /// Registered data source names, sorted.
    pub fn data_source_names(&self) -> Vec<String> {
        self.data_sources.keys().map(|k| k.to_string()).collect()
    }

    /// Schemas of everything registered, with `provider` as the config schema.
    pub fn provider_schema(&self, provider: Schema) -> ProviderSchema {
        let schema = ProviderSchema::new().with_provider_config(provider);
        let schema = self
            .resources
            .iter()
            .fold(schema, |s, (name, r)| s.with_resource(*name, r.schema()));
        self.data_sources
            .iter()
            .fold(schema, |s, (name, ds)| s.with_data_source(*name, ds.schema()))
    }
}
