//! `tencentcloud_monitor_alarm_history`: alarm records in a time window.

use super::model::{DescribeAlarmHistoriesRequest, MonitorTypeNamespace, MODULE};
use super::service::MonitorService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::helper::{data_resource_ids_hash, null_default};
use crate::resource::DataSource;
use crate::schema::{Attribute, AttributeFlags, AttributeType, Block, NestedBlock, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NamespaceState {
    #[serde(deserialize_with = "null_default")]
    monitor_type: String,
    #[serde(deserialize_with = "null_default")]
    namespace: String,
}

pub(super) fn string_set() -> Attribute {
    Attribute::set(AttributeType::String, AttributeFlags::optional())
}

pub(super) fn int_set() -> Attribute {
    Attribute::set(AttributeType::Int64, AttributeFlags::optional())
}

pub(super) fn int_list(d: &ResourceData, key: &str) -> Vec<i64> {
    d.get_list(key).iter().filter_map(|v| v.as_i64()).collect()
}

/// `tencentcloud_monitor_alarm_history`: alarm records over a time range.
pub struct MonitorAlarmHistory;

#[async_trait]
impl DataSource for MonitorAlarmHistory {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_alarm_history"
    }

    fn schema(&self) -> Schema {
        let computed_string = Attribute::computed_string;
        let computed_int = Attribute::computed_int64;

        let history = Block::new()
            .with_attribute("alarm_id", computed_string())
            .with_attribute("monitor_type", computed_string())
            .with_attribute("namespace", computed_string())
            .with_attribute("alarm_object", computed_string())
            .with_attribute("content", computed_string())
            .with_attribute("first_occur_time", computed_int())
            .with_attribute("last_occur_time", computed_int())
            .with_attribute("alarm_status", computed_string())
            .with_attribute("policy_id", computed_string())
            .with_attribute("policy_name", computed_string())
            .with_attribute("vpc", computed_string())
            .with_attribute("project_id", computed_int())
            .with_attribute("project_name", computed_string())
            .with_block(
                "instance_group",
                NestedBlock::list(
                    Block::new()
                        .with_attribute("id", computed_int())
                        .with_attribute("name", computed_string()),
                )
                .with_computed(),
            )
            .with_attribute("receiver_uids", Attribute::set(AttributeType::Int64, AttributeFlags::computed()))
            .with_attribute("receiver_groups", Attribute::set(AttributeType::Int64, AttributeFlags::computed()))
            .with_attribute("notice_ways", Attribute::set(AttributeType::String, AttributeFlags::computed()))
            .with_attribute("origin_id", computed_string())
            .with_attribute("alarm_type", computed_string())
            .with_attribute("event_id", computed_int())
            .with_attribute("region", computed_string())
            .with_attribute("policy_exists", computed_int())
            .with_block(
                "metrics_info",
                NestedBlock::list(
                    Block::new()
                        .with_attribute("qce_namespace", computed_string())
                        .with_attribute("metric_name", computed_string())
                        .with_attribute("period", computed_int())
                        .with_attribute("value", computed_string())
                        .with_attribute("description", computed_string()),
                )
                .with_computed(),
            )
            .with_attribute("dimensions", computed_string())
            .with_attribute("alarm_level", computed_string());

        Schema::v0()
            .with_attribute(
                "module",
                Attribute::optional_string()
                    .with_default(json!(MODULE))
                    .with_description("Value fixed at `monitor`."),
            )
            .with_attribute(
                "order",
                Attribute::optional_string()
                    .with_allowed_strings(&["ASC", "DESC"])
                    .with_description("Sort by first occurrence time."),
            )
            .with_attribute("start_time", Attribute::optional_int64().with_description("Unix seconds."))
            .with_attribute("end_time", Attribute::optional_int64().with_description("Unix seconds."))
            .with_attribute("monitor_types", string_set())
            .with_attribute("alarm_object", Attribute::optional_string())
            .with_attribute(
                "alarm_status",
                string_set().with_description("`ALARM`, `OK`, `NO_CONF`, `NO_DATA`."),
            )
            .with_attribute("project_ids", int_set())
            .with_attribute("instance_group_ids", int_set())
            .with_block(
                "namespaces",
                NestedBlock::list(
                    Block::new()
                        .with_attribute("monitor_type", Attribute::required_string())
                        .with_attribute("namespace", Attribute::required_string()),
                ),
            )
            .with_attribute("metric_names", string_set())
            .with_attribute("policy_name", Attribute::optional_string())
            .with_attribute("content", Attribute::optional_string())
            .with_attribute("receiver_uids", int_set())
            .with_attribute("receiver_groups", int_set())
            .with_attribute("policy_ids", string_set())
            .with_attribute("alarm_levels", string_set())
            .with_block("histories", NestedBlock::list(history).with_computed())
            .with_attribute("result_output_file", Attribute::result_output_file())
    }

    fn result_key(&self) -> &'static str {
        "histories"
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let namespaces: Vec<NamespaceState> = d.decode_key("namespaces")?;
        let filter = DescribeAlarmHistoriesRequest {
            module: d.get_str("module").unwrap_or(MODULE).to_string(),
            order: d.get_str("order").map(str::to_string),
            start_time: d.get_i64("start_time"),
            end_time: d.get_i64("end_time"),
            monitor_types: d.get_string_list("monitor_types"),
            alarm_object: d.get_str("alarm_object").map(str::to_string),
            alarm_status: d.get_string_list("alarm_status"),
            project_ids: int_list(d, "project_ids"),
            instance_group_ids: int_list(d, "instance_group_ids"),
            namespaces: namespaces
                .into_iter()
                .map(|n| MonitorTypeNamespace {
                    monitor_type: n.monitor_type,
                    namespace: n.namespace,
                })
                .collect(),
            metric_names: d.get_string_list("metric_names"),
            policy_name: d.get_str("policy_name").map(str::to_string),
            content: d.get_str("content").map(str::to_string),
            receiver_uids: int_list(d, "receiver_uids"),
            receiver_groups: int_list(d, "receiver_groups"),
            policy_ids: d.get_string_list("policy_ids"),
            alarm_levels: d.get_string_list("alarm_levels"),
            ..Default::default()
        };

        let histories = MonitorService::new(client)
            .describe_alarm_histories(filter)
            .await?;

        let ids: Vec<&str> = histories.iter().map(|h| h.alarm_id.as_str()).collect();
        d.set_id(data_resource_ids_hash(&ids));
        d.set("histories", serde_json::to_value(&histories)?);
        Ok(())
    }
}
