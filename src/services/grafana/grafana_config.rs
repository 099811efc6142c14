//! `tencentcloud_monitor_tmp_grafana_config`: the JSON configuration of a
//! Grafana instance.

use super::service::GrafanaService;
use crate::connectivity::TencentCloudClient;
use crate::error::{ProviderError, Result};
use crate::resource::Resource;
use crate::schema::{Attribute, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde_json::Value;

/// Config written on delete.
const EMPTY_CONFIG: &str = "{}";

/// Reject config strings that are not a JSON object.
fn check_config(config: &str) -> Result<()> {
    match serde_json::from_str::<Value>(config) {
        Ok(Value::Object(_)) => Ok(()),
        _ => Err(ProviderError::Validation(format!(
            "config must be a JSON object, got {}",
            config
        ))),
    }
}

/// `tencentcloud_monitor_tmp_grafana_config`: `grafana.ini` overrides.
pub struct TmpGrafanaConfig;

impl TmpGrafanaConfig {
    async fn apply(client: &TencentCloudClient, instance_id: &str, config: &str) -> Result<()> {
        let service = GrafanaService::new(client);
        service.update_config(instance_id, config).await?;
        service.wait_instance_running(instance_id).await
    }
}

#[async_trait]
impl Resource for TmpGrafanaConfig {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_tmp_grafana_config"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute("instance_id", Attribute::required_string().with_description("Grafana instance id."))
            .with_attribute(
                "config",
                Attribute::optional_computed_string().with_description("JSON encoded Grafana configuration."),
            )
    }

    fn immutable_args(&self) -> &'static [&'static str] {
        &["instance_id"]
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        if let Some(config) = d.get_str("config") {
            check_config(config)?;
            Self::apply(client, &instance_id, config).await?;
        }
        d.set_id(instance_id);
        self.read(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        let service = GrafanaService::new(client);
        if !service.instance_exists(&instance_id).await? {
            d.set_id("");
            return Ok(());
        }
        let config = service.describe_config(&instance_id).await?;
        d.set("instance_id", instance_id);
        d.set("config", config);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        if d.has_change("config") {
            let instance_id = d.id().to_string();
            let config = d.get_str("config").unwrap_or(EMPTY_CONFIG);
            check_config(config)?;
            Self::apply(client, &instance_id, config).await?;
        }
        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        Self::apply(client, &instance_id, EMPTY_CONFIG).await
    }
}
