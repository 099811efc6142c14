//! `tencentcloud_monitor_tmp_alert_rule`.

use super::model::{AlertRuleRequest, PrometheusRuleKV};
use super::service::TmpService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::helper::{build_id, non_empty, null_default, parse_id};
use crate::resource::Resource;
use crate::schema::{Attribute, AttributeFlags, AttributeType, Block, NestedBlock, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct KvState {
    #[serde(deserialize_with = "null_default")]
    key: String,
    #[serde(deserialize_with = "null_default")]
    value: String,
}

fn decode_kvs(d: &ResourceData, key: &str) -> Result<Vec<PrometheusRuleKV>> {
    let kvs: Vec<KvState> = d.decode_key(key)?;
    Ok(kvs
        .into_iter()
        .map(|kv| PrometheusRuleKV {
            key: kv.key,
            value: kv.value,
        })
        .collect())
}

fn encode_kvs(kvs: Vec<PrometheusRuleKV>) -> Result<serde_json::Value> {
    let kvs: Vec<KvState> = kvs
        .into_iter()
        .map(|kv| KvState {
            key: kv.key,
            value: kv.value,
        })
        .collect();
    Ok(serde_json::to_value(kvs)?)
}

fn rule_request(d: &ResourceData, instance_id: &str, rule_id: Option<&str>) -> Result<AlertRuleRequest> {
    Ok(AlertRuleRequest {
        instance_id: instance_id.to_string(),
        rule_id: rule_id.map(str::to_string),
        rule_name: d.require_str("rule_name")?.to_string(),
        expr: d.require_str("expr")?.to_string(),
        receivers: d.get_string_list("receivers"),
        rule_state: d.get_i64("rule_state"),
        duration: d.get_str("duration").map(str::to_string),
        labels: decode_kvs(d, "labels")?,
        annotations: decode_kvs(d, "annotations")?,
        rule_type: non_empty(d.get_str("type").map(str::to_string)),
    })
}

fn kv_block() -> NestedBlock {
    NestedBlock::list(
        Block::new()
            .with_attribute("key", Attribute::required_string())
            .with_attribute("value", Attribute::required_string()),
    )
}

/// `tencentcloud_monitor_tmp_alert_rule`, id `instanceId#ruleId`.
pub struct TmpAlertRule;

#[async_trait]
impl Resource for TmpAlertRule {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_tmp_alert_rule"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute("instance_id", Attribute::required_string().with_description("Prometheus instance id."))
            .with_attribute("rule_name", Attribute::required_string())
            .with_attribute("expr", Attribute::required_string().with_description("PromQL expression."))
            .with_attribute(
                "receivers",
                Attribute::set(AttributeType::String, AttributeFlags::required())
                    .with_description("Alarm notice template ids."),
            )
            .with_attribute(
                "rule_state",
                Attribute::optional_int64().with_description("`2` enabled, `3` disabled."),
            )
            .with_attribute(
                "duration",
                Attribute::optional_string().with_description("How long the expression must hold, e.g. `1m`."),
            )
            .with_block("labels", kv_block())
            .with_block("annotations", kv_block())
            .with_attribute("type", Attribute::optional_string().with_description("Alarm type."))
    }

    fn immutable_args(&self) -> &'static [&'static str] {
        &["instance_id"]
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        let req = rule_request(d, &instance_id, None)?;
        let rule_id = TmpService::new(client).create_alert_rule(&req).await?;
        d.set_id(build_id(&[&instance_id, &rule_id]));
        self.read(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        let (instance_id, rule_id) = (parts[0], parts[1]);

        let rule = TmpService::new(client)
            .describe_alert_rule(instance_id, rule_id)
            .await?;
        let Some(rule) = rule else {
            d.set_id("");
            return Ok(());
        };

        d.set("instance_id", instance_id);
        d.set("rule_name", rule.rule_name);
        d.set("expr", rule.expr);
        d.set("receivers", rule.receivers);
        d.set("rule_state", rule.rule_state);
        d.set("duration", rule.duration);
        d.set("labels", encode_kvs(rule.labels)?);
        d.set("annotations", encode_kvs(rule.annotations)?);
        d.set("type", rule.rule_type);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        if d.has_changes(&[
            "rule_name",
            "expr",
            "receivers",
            "rule_state",
            "duration",
            "labels",
            "annotations",
            "type",
        ]) {
            let req = rule_request(d, parts[0], Some(parts[1]))?;
            TmpService::new(client).update_alert_rule(&req).await?;
        }
        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        TmpService::new(client)
            .delete_alert_rule(parts[0], parts[1])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_request() {
        let d = ResourceData::new(json!({
            "instance_id": "prom-1",
            "rule_name": "high-cpu",
            "expr": "cpu > 90",
            "receivers": ["notice-1"],
            "rule_state": null,
            "duration": "5m",
            "labels": [{"key": "severity", "value": "warning"}],
            "annotations": null,
            "type": ""
        }));
        let req = rule_request(&d, "prom-1", None).unwrap();
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({
                "InstanceId": "prom-1",
                "RuleName": "high-cpu",
                "Expr": "cpu > 90",
                "Receivers": ["notice-1"],
                "Duration": "5m",
                "Labels": [{"Key": "severity", "Value": "warning"}]
            })
        );
    }

    #[test]
    fn test_instance_id_is_immutable() {
        assert_eq!(TmpAlertRule.immutable_args(), &["instance_id"]);
    }
}
