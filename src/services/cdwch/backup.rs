//! `tencentcloud_clickhouse_backup`: switches backups of an instance on, to a
//! COS bucket.

use super::model::{OPERATION_CLOSE, OPERATION_OPEN};
use super::service::CdwchService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::resource::Resource;
use crate::schema::{Attribute, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;

/// `tencentcloud_clickhouse_backup`: opens backups on create and closes them on delete.
pub struct ClickhouseBackup;

#[async_trait]
impl Resource for ClickhouseBackup {
    fn name(&self) -> &'static str {
        "tencentcloud_clickhouse_backup"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute(
                "instance_id",
                Attribute::required_string().with_description("Instance id."),
            )
            .with_attribute(
                "cos_bucket_name",
                Attribute::required_string().with_description("COS bucket name."),
            )
    }

    fn immutable_args(&self) -> &'static [&'static str] {
        &["instance_id"]
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        let bucket = d.require_str("cos_bucket_name")?.to_string();

        CdwchService::new(client)
            .open_back_up(&instance_id, OPERATION_OPEN, Some(&bucket))
            .await?;
        d.set_id(instance_id);
        self.read(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        let schedule = CdwchService::new(client)
            .describe_back_up_schedule(&instance_id)
            .await?;
        if !schedule.back_up_opened {
            d.set_id("");
            return Ok(());
        }

        d.set("instance_id", instance_id);
        if let Some(bucket) = schedule.cos_bucket_name() {
            d.set("cos_bucket_name", bucket);
        }
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        if d.has_change("cos_bucket_name") {
            let bucket = d.require_str("cos_bucket_name")?.to_string();
            CdwchService::new(client)
                .open_back_up(d.id(), OPERATION_OPEN, Some(&bucket))
                .await?;
        }
        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        CdwchService::new(client)
            .open_back_up(d.id(), OPERATION_CLOSE, None)
            .await
    }
}
