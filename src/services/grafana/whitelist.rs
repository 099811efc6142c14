//! `tencentcloud_monitor_grafana_whitelist_config`.

use super::service::GrafanaService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::resource::Resource;
use crate::schema::{Attribute, AttributeFlags, AttributeType, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;

/// `tencentcloud_monitor_grafana_whitelist_config`
pub struct GrafanaWhitelistConfig;

impl GrafanaWhitelistConfig {
    async fn apply(client: &TencentCloudClient, instance_id: &str, whitelist: &[String]) -> Result<()> {
        let service = GrafanaService::new(client);
        service.update_whitelist(instance_id, whitelist).await?;
        service.wait_instance_running(instance_id).await
    }
}

#[async_trait]
impl Resource for GrafanaWhitelistConfig {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_grafana_whitelist_config"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute("instance_id", Attribute::required_string().with_description("Grafana instance id."))
            .with_attribute(
                "whitelist",
                Attribute::list(AttributeType::String, AttributeFlags::optional())
                    .with_description("IP addresses allowed to reach the instance."),
            )
    }

    fn immutable_args(&self) -> &'static [&'static str] {
        &["instance_id"]
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        Self::apply(client, &instance_id, &d.get_string_list("whitelist")).await?;
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
        let whitelist = service.describe_whitelist(&instance_id).await?;
        d.set("instance_id", instance_id);
        d.set("whitelist", whitelist);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        if d.has_change("whitelist") {
            let instance_id = d.id().to_string();
            Self::apply(client, &instance_id, &d.get_string_list("whitelist")).await?;
        }
        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        Self::apply(client, &instance_id, &[]).await
    }
}
