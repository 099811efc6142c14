//! `tencentcloud_monitor_tmp_instances`.

use super::model::{DescribePrometheusInstancesRequest, PrometheusTag};
use super::service::TmpService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::helper::{data_resource_ids_hash, null_default};
use crate::resource::DataSource;
use crate::schema::{Attribute, AttributeFlags, AttributeType, Block, NestedBlock, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TagFilterState {
    #[serde(deserialize_with = "null_default")]
    key: String,
    #[serde(deserialize_with = "null_default")]
    value: String,
}

/// `tencentcloud_monitor_tmp_instances`
pub struct TmpInstances;

#[async_trait]
impl DataSource for TmpInstances {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_tmp_instances"
    }

    fn schema(&self) -> Schema {
        let mut instance = Block::new();
        for field in [
            "instance_id",
            "instance_name",
            "zone",
            "vpc_id",
            "subnet_id",
            "grafana_url",
            "created_at",
            "ipv4_address",
            "expire_time",
            "spec_name",
            "auth_token",
            "remote_write",
            "api_root_path",
            "proxy_address",
            "grafana_ip_white_list",
            "grafana_instance_id",
        ] {
            instance = instance.with_attribute(field, Attribute::computed_string());
        }
        for field in [
            "instance_charge_type",
            "region_id",
            "data_retention_time",
            "instance_status",
            "enable_grafana",
            "charge_status",
            "auto_renew_flag",
            "is_near_expire",
            "grafana_status",
            "alert_rule_limit",
            "recording_rule_limit",
            "migration_type",
        ] {
            instance = instance.with_attribute(field, Attribute::computed_int64());
        }
        let mut grant = Block::new();
        for field in [
            "has_charge_operation",
            "has_vpc_display",
            "has_grafana_status_change",
            "has_agent_manage",
            "has_tke_manage",
            "has_api_operation",
        ] {
            grant = grant.with_attribute(field, Attribute::computed_int64());
        }
        let instance = instance
            .with_block(
                "tag_specification",
                NestedBlock::list(
                    Block::new()
                        .with_attribute("key", Attribute::computed_string())
                        .with_attribute("value", Attribute::computed_string()),
                )
                .with_computed(),
            )
            .with_block("grant", NestedBlock::list(grant).with_computed());

        Schema::v0()
            .with_attribute(
                "instance_ids",
                Attribute::set(AttributeType::String, AttributeFlags::optional()),
            )
            .with_attribute(
                "instance_status",
                Attribute::set(AttributeType::Int64, AttributeFlags::optional())
                    .with_description("1 creating, 2 running, 3 abnormal, 4 restarting, 5 destroying, 6 stopped, 7 deleted."),
            )
            .with_attribute("instance_name", Attribute::optional_string())
            .with_attribute("zones", Attribute::set(AttributeType::String, AttributeFlags::optional()))
            .with_block(
                "tag_filters",
                NestedBlock::list(
                    Block::new()
                        .with_attribute("key", Attribute::required_string())
                        .with_attribute("value", Attribute::required_string()),
                ),
            )
            .with_attribute(
                "ipv4_address",
                Attribute::set(AttributeType::String, AttributeFlags::optional()),
            )
            .with_attribute(
                "instance_charge_type",
                Attribute::optional_int64().with_description("2 prepaid, 3 postpaid by hour."),
            )
            .with_block("instance_set", NestedBlock::list(instance).with_computed())
            .with_attribute("result_output_file", Attribute::result_output_file())
    }

    fn result_key(&self) -> &'static str {
        "instance_set"
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let tags: Vec<TagFilterState> = d.decode_key("tag_filters")?;
        let filter = DescribePrometheusInstancesRequest {
            instance_ids: d.get_string_list("instance_ids"),
            instance_status: d
                .get_list("instance_status")
                .iter()
                .filter_map(|v| v.as_i64())
                .collect(),
            instance_name: d.get_str("instance_name").map(str::to_string),
            zones: d.get_string_list("zones"),
            tag_filters: tags
                .into_iter()
                .map(|t| PrometheusTag {
                    key: t.key,
                    value: t.value,
                })
                .collect(),
            ipv4_address: d.get_string_list("ipv4_address"),
            instance_charge_type: d.get_i64("instance_charge_type"),
            ..Default::default()
        };

        let instances = TmpService::new(client).describe_instances(filter).await?;

        let ids: Vec<&str> = instances.iter().map(|i| i.instance_id.as_str()).collect();
        d.set_id(data_resource_ids_hash(&ids));
        d.set("instance_set", serde_json::to_value(&instances)?);
        Ok(())
    }
}
