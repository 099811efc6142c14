//! `tencentcloud_monitor_tmp_alert_group`: a group of Prometheus alert
//! rules sharing receivers and a repeat interval.

use super::model::*;
use super::service::TmpService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::helper::{build_id, non_empty, null_default, parse_id};
use crate::resource::Resource;
use crate::schema::{Attribute, AttributeFlags, AttributeType, Block, NestedBlock, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn kv_list(map: BTreeMap<String, String>) -> Vec<PrometheusRuleKV> {
    map.into_iter()
        .map(|(key, value)| PrometheusRuleKV { key, value })
        .collect()
}

fn kv_map(list: Vec<PrometheusRuleKV>) -> BTreeMap<String, String> {
    list.into_iter().map(|kv| (kv.key, kv.value)).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct TimeRangeState {
    #[serde(deserialize_with = "null_default")]
    start: String,
    #[serde(deserialize_with = "null_default")]
    end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct CustomReceiverState {
    #[serde(rename = "type")]
    receiver_type: Option<String>,
    url: Option<String>,
    #[serde(deserialize_with = "null_default")]
    allowed_time_ranges: Vec<TimeRangeState>,
    cluster_id: Option<String>,
    cluster_type: Option<String>,
}

impl From<CustomReceiverState> for CustomReceiver {
    fn from(s: CustomReceiverState) -> Self {
        Self {
            receiver_type: non_empty(s.receiver_type),
            url: non_empty(s.url),
            allowed_time_ranges: s
                .allowed_time_ranges
                .into_iter()
                .map(|r| AllowTimeRange {
                    start: r.start,
                    end: r.end,
                })
                .collect(),
            cluster_id: non_empty(s.cluster_id),
            cluster_type: non_empty(s.cluster_type),
        }
    }
}

impl From<CustomReceiver> for CustomReceiverState {
    fn from(r: CustomReceiver) -> Self {
        Self {
            receiver_type: r.receiver_type,
            url: r.url,
            allowed_time_ranges: r
                .allowed_time_ranges
                .into_iter()
                .map(|r| TimeRangeState {
                    start: r.start,
                    end: r.end,
                })
                .collect(),
            cluster_id: r.cluster_id,
            cluster_type: r.cluster_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct RuleState {
    #[serde(deserialize_with = "null_default")]
    rule_name: String,
    #[serde(deserialize_with = "null_default")]
    labels: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_default")]
    annotations: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_default")]
    duration: String,
    #[serde(deserialize_with = "null_default")]
    expr: String,
    state: Option<i64>,
}

impl From<RuleState> for AlertGroupRule {
    fn from(s: RuleState) -> Self {
        Self {
            rule_name: s.rule_name,
            labels: kv_list(s.labels),
            annotations: kv_list(s.annotations),
            duration: s.duration,
            expr: s.expr,
            state: s.state,
        }
    }
}

impl From<AlertGroupRule> for RuleState {
    fn from(r: AlertGroupRule) -> Self {
        Self {
            rule_name: r.rule_name,
            labels: kv_map(r.labels),
            annotations: kv_map(r.annotations),
            duration: r.duration,
            expr: r.expr,
            state: r.state,
        }
    }
}

fn group_request(d: &ResourceData, instance_id: &str, group_id: Option<&str>) -> Result<AlertGroupRequest> {
    let receivers: Vec<CustomReceiverState> = d.decode_key("custom_receiver")?;
    let rules: Vec<RuleState> = d.decode_key("rules")?;
    Ok(AlertGroupRequest {
        instance_id: instance_id.to_string(),
        group_id: group_id.map(str::to_string),
        group_name: d.get_str("group_name").map(str::to_string),
        amp_receivers: d.get_string_list("amp_receivers"),
        custom_receiver: receivers.into_iter().next().map(Into::into),
        repeat_interval: d.get_str("repeat_interval").map(str::to_string),
        rules: rules.into_iter().map(Into::into).collect(),
    })
}

/// `tencentcloud_monitor_tmp_alert_group`, id `instanceId#groupId`.
pub struct TmpAlertGroup;

#[async_trait]
impl Resource for TmpAlertGroup {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_tmp_alert_group"
    }

    fn schema(&self) -> Schema {
        let custom_receiver = Block::new()
            .with_attribute(
                "type",
                Attribute::optional_string().with_description("`webhook` or `alertmanager`."),
            )
            .with_attribute("url", Attribute::optional_string())
            .with_block(
                "allowed_time_ranges",
                NestedBlock::list(
                    Block::new()
                        .with_attribute(
                            "start",
                            Attribute::optional_string().with_description("Seconds since 0 o'clock."),
                        )
                        .with_attribute(
                            "end",
                            Attribute::optional_string().with_description("Seconds since 0 o'clock."),
                        ),
                ),
            )
            .with_attribute("cluster_id", Attribute::optional_string())
            .with_attribute(
                "cluster_type",
                Attribute::optional_string().with_description("`tke`, `eks` or `tdcc`."),
            );

        let rule = Block::new()
            .with_attribute("rule_name", Attribute::optional_string())
            .with_attribute("labels", Attribute::string_map(AttributeFlags::optional()))
            .with_attribute(
                "annotations",
                Attribute::string_map(AttributeFlags::optional())
                    .with_description("`summary` and `description` map to the alarm object and message."),
            )
            .with_attribute("duration", Attribute::optional_string())
            .with_attribute("expr", Attribute::optional_string().with_description("PromQL alert expression."))
            .with_attribute(
                "state",
                Attribute::optional_int64().with_description("`2` enabled, `3` disabled."),
            );

        Schema::v0()
            .with_attribute("instance_id", Attribute::required_string().with_description("Prometheus instance id."))
            .with_attribute("group_id", Attribute::computed_string())
            .with_attribute("group_name", Attribute::optional_string().with_description("Unique group name."))
            .with_attribute(
                "amp_receivers",
                Attribute::set(AttributeType::String, AttributeFlags::optional())
                    .with_description("Alarm notice template ids."),
            )
            .with_block("custom_receiver", NestedBlock::single(custom_receiver))
            .with_attribute(
                "repeat_interval",
                Attribute::optional_string().with_description("Resend interval, default one hour."),
            )
            .with_block("rules", NestedBlock::list(rule))
    }

    fn immutable_args(&self) -> &'static [&'static str] {
        &["instance_id"]
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        let req = group_request(d, &instance_id, None)?;
        let group_id = TmpService::new(client).create_alert_group(&req).await?;
        d.set_id(build_id(&[&instance_id, &group_id]));
        self.read(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        let (instance_id, group_id) = (parts[0], parts[1]);

        let group = TmpService::new(client)
            .describe_alert_group(instance_id, group_id)
            .await?;
        let Some(group) = group else {
            d.set_id("");
            return Ok(());
        };

        d.set("instance_id", instance_id);
        d.set("group_id", group_id);
        d.set("group_name", group.group_name);
        d.set("amp_receivers", group.amp_receivers);
        let receivers: Vec<CustomReceiverState> = group.custom_receiver.map(Into::into).into_iter().collect();
        d.set("custom_receiver", serde_json::to_value(receivers)?);
        d.set("repeat_interval", group.repeat_interval);
        let rules: Vec<RuleState> = group.rules.into_iter().map(Into::into).collect();
        d.set("rules", serde_json::to_value(rules)?);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        let req = group_request(d, parts[0], Some(parts[1]))?;
        TmpService::new(client).update_alert_group(&req).await?;
        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        TmpService::new(client)
            .delete_alert_group(parts[0], parts[1])
            .await
    }
}
