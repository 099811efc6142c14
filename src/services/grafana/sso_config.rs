use super::service::GrafanaService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::resource::Resource;
use crate::schema::{Attribute, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;

/// `tencentcloud_monitor_grafana_sso_config`: whether a Grafana instance
/// signs users in through Tencent Cloud SSO.
pub struct GrafanaSsoConfig;

impl GrafanaSsoConfig {
    async fn apply(client: &TencentCloudClient, instance_id: &str, enable_sso: bool) -> Result<()> {
        let service = GrafanaService::new(client);
        service.enable_sso(instance_id, enable_sso).await?;
        service.wait_instance_running(instance_id).await
    }
}

#[async_trait]
impl Resource for GrafanaSsoConfig {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_grafana_sso_config"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute("instance_id", Attribute::required_string().with_description("Grafana instance id."))
            .with_attribute("enable_sso", Attribute::required_bool().with_description("Enable SSO sign-in."))
    }

    fn immutable_args(&self) -> &'static [&'static str] {
        &["instance_id"]
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        let enable_sso = d.get_bool("enable_sso").unwrap_or(false);
        Self::apply(client, &instance_id, enable_sso).await?;
        d.set_id(instance_id);
        self.read(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        let instance = GrafanaService::new(client)
            .describe_instance(&instance_id)
            .await?;
        let Some(instance) = instance else {
            d.set_id("");
            return Ok(());
        };
        d.set("instance_id", instance_id);
        d.set("enable_sso", instance.enable_sso);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        if d.has_change("enable_sso") {
            let instance_id = d.id().to_string();
            let enable_sso = d.get_bool("enable_sso").unwrap_or(false);
            Self::apply(client, &instance_id, enable_sso).await?;
        }
        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        Self::apply(client, &instance_id, false).await
    }
}
