use super::service::GrafanaService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::resource::Resource;
use crate::schema::{Attribute, AttributeFlags, AttributeType, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;

/// `tencentcloud_monitor_grafana_dns_config`: name servers of a Grafana
/// instance. Deleting clears the list.
pub struct GrafanaDnsConfig;

#[async_trait]
impl Resource for GrafanaDnsConfig {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_grafana_dns_config"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute("instance_id", Attribute::required_string().with_description("Grafana instance id."))
            .with_attribute(
                "name_servers",
                Attribute::list(AttributeType::String, AttributeFlags::optional_computed())
                    .with_description("DNS servers."),
            )
    }

    fn immutable_args(&self) -> &'static [&'static str] {
        &["instance_id"]
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        d.set_id(instance_id);
        self.update(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        let service = GrafanaService::new(client);
        if !service.instance_exists(&instance_id).await? {
            d.set_id("");
            return Ok(());
        }
        let name_servers = service.describe_dns_config(&instance_id).await?;
        d.set("instance_id", instance_id);
        d.set("name_servers", name_servers);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        let service = GrafanaService::new(client);
        service
            .update_dns_config(&instance_id, &d.get_string_list("name_servers"))
            .await?;
        service.wait_instance_running(&instance_id).await?;
        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        let service = GrafanaService::new(client);
        service.update_dns_config(&instance_id, &[]).await?;
        service.wait_instance_running(&instance_id).await
    }
}
