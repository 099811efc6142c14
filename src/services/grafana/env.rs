//! `tencentcloud_monitor_grafana_env_config`.

use super::service::GrafanaService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::resource::Resource;
use crate::schema::{Attribute, AttributeFlags, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// `tencentcloud_monitor_grafana_env_config`
pub struct GrafanaEnvConfig;

impl GrafanaEnvConfig {
    async fn apply(client: &TencentCloudClient, instance_id: &str, envs: &BTreeMap<String, String>) -> Result<()> {
        let service = GrafanaService::new(client);
        service.update_environments(instance_id, envs).await?;
        service.wait_instance_running(instance_id).await
    }
}

#[async_trait]
impl Resource for GrafanaEnvConfig {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_grafana_env_config"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute("instance_id", Attribute::required_string().with_description("Grafana instance id."))
            .with_attribute(
                "envs",
                Attribute::string_map(AttributeFlags::optional())
                    .with_description("Grafana environment variables."),
            )
    }

    fn immutable_args(&self) -> &'static [&'static str] {
        &["instance_id"]
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        let envs: BTreeMap<String, String> = d.decode_key("envs")?;
        Self::apply(client, &instance_id, &envs).await?;
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
        let envs = service.describe_environments(&instance_id).await?;
        d.set("instance_id", instance_id);
        d.set("envs", serde_json::to_value(envs)?);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        if d.has_change("envs") {
            let instance_id = d.id().to_string();
            let envs: BTreeMap<String, String> = d.decode_key("envs")?;
            Self::apply(client, &instance_id, &envs).await?;
        }
        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        Self::apply(client, &instance_id, &BTreeMap::new()).await
    }
}
