//! `tencentcloud_monitor_alarm_policy`.

use super::model::*;
use super::service::MonitorService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::helper::{format_unix_time, non_empty, null_default};
use crate::resource::Resource;
use crate::schema::{Attribute, AttributeFlags, AttributeType, Block, NestedBlock, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct FilterState {
    #[serde(rename = "type", deserialize_with = "null_default")]
    filter_type: String,
    #[serde(deserialize_with = "null_default")]
    dimensions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct RuleState {
    metric_name: Option<String>,
    period: Option<i64>,
    operator: Option<String>,
    value: Option<String>,
    continue_period: Option<i64>,
    notice_frequency: Option<i64>,
    is_power_notice: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    filter: Vec<FilterState>,
    description: Option<String>,
    unit: Option<String>,
    rule_type: Option<String>,
}

impl From<RuleState> for AlarmPolicyRule {
    fn from(r: RuleState) -> Self {
        Self {
            metric_name: non_empty(r.metric_name),
            period: r.period,
            operator: non_empty(r.operator),
            value: non_empty(r.value),
            continue_period: r.continue_period,
            notice_frequency: r.notice_frequency,
            is_power_notice: r.is_power_notice,
            filter: r.filter.into_iter().next().map(|f| AlarmPolicyFilter {
                filter_type: f.filter_type,
                dimensions: f.dimensions,
            }),
            description: non_empty(r.description),
            unit: non_empty(r.unit),
            rule_type: non_empty(r.rule_type),
        }
    }
}

impl From<AlarmPolicyRule> for RuleState {
    fn from(r: AlarmPolicyRule) -> Self {
        Self {
            metric_name: r.metric_name,
            period: r.period,
            operator: r.operator,
            value: r.value,
            continue_period: r.continue_period,
            notice_frequency: r.notice_frequency,
            is_power_notice: r.is_power_notice,
            filter: r
                .filter
                .filter(|f| !f.filter_type.is_empty() || !f.dimensions.is_empty())
                .map(|f| FilterState {
                    filter_type: f.filter_type,
                    dimensions: f.dimensions,
                })
                .into_iter()
                .collect(),
            description: r.description,
            unit: r.unit,
            rule_type: r.rule_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct ConditionState {
    #[serde(deserialize_with = "null_default")]
    is_union_rule: i64,
    #[serde(deserialize_with = "null_default")]
    rules: Vec<RuleState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct TaskState {
    #[serde(rename = "type", deserialize_with = "null_default")]
    task_type: String,
    #[serde(deserialize_with = "null_default")]
    task_config: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct TagState {
    #[serde(deserialize_with = "null_default")]
    key: String,
    #[serde(deserialize_with = "null_default")]
    value: String,
}

fn condition(d: &ResourceData) -> Result<Option<AlarmPolicyCondition>> {
    let conditions: Vec<ConditionState> = d.decode_key("conditions")?;
    Ok(conditions.into_iter().next().map(|c| AlarmPolicyCondition {
        is_union_rule: c.is_union_rule,
        rules: c.rules.into_iter().map(Into::into).collect(),
    }))
}

fn event_condition(d: &ResourceData) -> Result<Option<AlarmPolicyEventCondition>> {
    let rules: Vec<RuleState> = d.decode_key("event_conditions")?;
    if rules.is_empty() {
        return Ok(None);
    }
    Ok(Some(AlarmPolicyEventCondition {
        rules: rules.into_iter().map(Into::into).collect(),
    }))
}

fn trigger_tasks(d: &ResourceData) -> Result<Vec<AlarmPolicyTriggerTask>> {
    let tasks: Vec<TaskState> = d.decode_key("trigger_tasks")?;
    Ok(tasks
        .into_iter()
        .map(|t| AlarmPolicyTriggerTask {
            task_type: t.task_type,
            task_config: t.task_config,
        })
        .collect())
}

fn rule_block() -> Block {
    Block::new()
        .with_attribute("metric_name", Attribute::optional_string().with_description("Metric name or event name."))
        .with_attribute("period", Attribute::optional_int64().with_description("Statistical period in seconds."))
        .with_attribute("operator", Attribute::optional_string().with_description("Operator, e.g. `gt`, `ge`."))
        .with_attribute("value", Attribute::optional_string().with_description("Threshold."))
        .with_attribute(
            "continue_period",
            Attribute::optional_computed_int64().with_description("Number of periods the condition must hold."),
        )
        .with_attribute(
            "notice_frequency",
            Attribute::optional_computed_int64().with_description("Alarm interval in seconds."),
        )
        .with_attribute(
            "is_power_notice",
            Attribute::optional_computed_int64().with_description("Whether the alarm frequency increases exponentially."),
        )
        .with_block(
            "filter",
            NestedBlock::single(
                Block::new()
                    .with_attribute("type", Attribute::optional_string().with_description("Filter type, e.g. `DIMENSION`."))
                    .with_attribute("dimensions", Attribute::optional_string().with_description("JSON encoded dimensions.")),
            ),
        )
        .with_attribute("description", Attribute::optional_computed_string())
        .with_attribute("unit", Attribute::optional_computed_string())
        .with_attribute("rule_type", Attribute::optional_computed_string())
}

/// `tencentcloud_monitor_alarm_policy`
pub struct MonitorAlarmPolicy;

#[async_trait]
impl Resource for MonitorAlarmPolicy {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_alarm_policy"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute("policy_name", Attribute::required_string().with_description("Policy name."))
            .with_attribute(
                "monitor_type",
                Attribute::required_string()
                    .with_force_new()
                    .with_description("Monitor type, e.g. `MT_QCE`."),
            )
            .with_attribute(
                "namespace",
                Attribute::required_string()
                    .with_force_new()
                    .with_description("Policy type, e.g. `cvm_device`."),
            )
            .with_attribute(
                "remark",
                Attribute::optional_string().with_length(0, 100).with_description("Remark."),
            )
            .with_attribute(
                "enable",
                Attribute::optional_int64()
                    .with_default(json!(1))
                    .with_allowed_ints(&[0, 1])
                    .with_description("Whether the policy is enabled."),
            )
            .with_attribute(
                "project_id",
                Attribute::optional_int64()
                    .with_default(json!(-1))
                    .with_force_new()
                    .with_description("Project id; -1 means no project."),
            )
            .with_attribute(
                "conditon_template_id",
                Attribute::optional_int64()
                    .with_force_new()
                    .with_description("Trigger condition template id."),
            )
            .with_block(
                "conditions",
                NestedBlock::single(
                    Block::new()
                        .with_attribute(
                            "is_union_rule",
                            Attribute::optional_int64().with_allowed_ints(&[0, 1]),
                        )
                        .with_block("rules", NestedBlock::list(rule_block())),
                )
                .with_computed(),
            )
            .with_block("event_conditions", NestedBlock::list(rule_block()).with_computed())
            .with_attribute(
                "notice_ids",
                Attribute::list(AttributeType::String, AttributeFlags::optional())
                    .with_description("Notice template ids."),
            )
            .with_block(
                "trigger_tasks",
                NestedBlock::list(
                    Block::new()
                        .with_attribute("type", Attribute::required_string().with_description("Task type, e.g. `AS`."))
                        .with_attribute("task_config", Attribute::required_string().with_description("JSON task config.")),
                ),
            )
            .with_block(
                "policy_tag",
                NestedBlock::list(
                    Block::new()
                        .with_attribute("key", Attribute::required_string())
                        .with_attribute("value", Attribute::required_string()),
                )
                .with_force_new(),
            )
            .with_attribute("create_time", Attribute::computed_string())
            .with_attribute("update_time", Attribute::computed_string())
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let namespace = d.require_str("namespace")?.to_string();
        let project_id = d.get_i64("project_id").unwrap_or(-1);
        let req = CreateAlarmPolicyRequest {
            module: MODULE.to_string(),
            policy_name: d.require_str("policy_name")?.to_string(),
            monitor_type: d.require_str("monitor_type")?.to_string(),
            namespace: namespace.clone(),
            remark: d.get_str("remark").map(str::to_string),
            enable: d.get_i64("enable").unwrap_or(1),
            project_id: (project_id != -1).then_some(project_id),
            condition_template_id: d.get_i64("conditon_template_id").filter(|id| *id != 0),
            condition: condition(d)?,
            event_condition: event_condition(d)?,
            notice_ids: d.get_string_list("notice_ids"),
            trigger_tasks: trigger_tasks(d)?,
        };

        let service = MonitorService::new(client);
        let created = service.create_alarm_policy(&req).await?;
        d.set_id(created.policy_id.clone());

        let tags: Vec<TagState> = d.decode_key("policy_tag")?;
        for tag in tags {
            let tag = PolicyTag {
                key: tag.key,
                value: tag.value,
            };
            service
                .binding_policy_tag(&created.policy_id, &created.origin_id, &namespace, &tag)
                .await?;
        }
        info!(policy_id = %created.policy_id, "alarm policy created");

        self.read(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let policy = MonitorService::new(client)
            .describe_alarm_policy(d.id())
            .await?;
        let Some(policy) = policy else {
            d.set_id("");
            return Ok(());
        };

        d.set("policy_name", policy.policy_name);
        d.set("monitor_type", policy.monitor_type);
        d.set("namespace", policy.namespace);
        d.set("remark", policy.remark);
        d.set("enable", policy.enable);
        d.set("project_id", policy.project_id);
        if let Ok(id) = policy.condition_template_id.parse::<i64>() {
            if id != 0 {
                d.set("conditon_template_id", id);
            }
        }
        if policy.insert_time != 0 {
            d.set("create_time", format_unix_time(policy.insert_time));
        }
        if policy.update_time != 0 {
            d.set("update_time", format_unix_time(policy.update_time));
        }

        let condition = policy.condition.unwrap_or_default();
        let conditions = vec![ConditionState {
            is_union_rule: condition.is_union_rule,
            rules: condition.rules.into_iter().map(RuleState::from).collect(),
        }];
        d.set("conditions", serde_json::to_value(conditions)?);

        let events: Vec<RuleState> = policy
            .event_condition
            .unwrap_or_default()
            .rules
            .into_iter()
            .map(RuleState::from)
            .collect();
        d.set("event_conditions", serde_json::to_value(events)?);
        d.set("notice_ids", policy.notice_ids);

        let tasks: Vec<TaskState> = policy
            .trigger_tasks
            .into_iter()
            .map(|t| TaskState {
                task_type: t.task_type,
                task_config: t.task_config,
            })
            .collect();
        d.set("trigger_tasks", serde_json::to_value(tasks)?);

        let tags: Vec<TagState> = policy
            .tag_instances
            .into_iter()
            .map(|t| TagState {
                key: t.key,
                value: t.value,
            })
            .collect();
        d.set("policy_tag", serde_json::to_value(tags)?);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let policy_id = d.id().to_string();
        let service = MonitorService::new(client);

        if d.has_change("policy_name") {
            let name = d.require_str("policy_name")?;
            service
                .modify_alarm_policy_info(&policy_id, POLICY_INFO_KEY_NAME, name)
                .await?;
        }
        if d.has_change("remark") {
            let remark = d.get_str("remark").unwrap_or_default();
            service
                .modify_alarm_policy_info(&policy_id, POLICY_INFO_KEY_REMARK, remark)
                .await?;
        }
        if d.has_change("enable") {
            let enable = d.get_i64("enable").unwrap_or(1);
            service.modify_alarm_policy_status(&policy_id, enable).await?;
        }
        if d.has_changes(&["conditions", "event_conditions"]) {
            service
                .modify_alarm_policy_condition(&policy_id, condition(d)?, event_condition(d)?)
                .await?;
        }
        if d.has_change("notice_ids") {
            let notice_ids = d.get_string_list("notice_ids");
            service.modify_alarm_policy_notice(&policy_id, &notice_ids).await?;
        }
        if d.has_change("trigger_tasks") {
            let tasks = trigger_tasks(d)?;
            service.modify_alarm_policy_tasks(&policy_id, &tasks).await?;
        }

        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        MonitorService::new(client)
            .delete_alarm_policy(d.id())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_from_state() {
        let d = ResourceData::new(json!({
            "conditions": [{
                "is_union_rule": 1,
                "rules": [{
                    "metric_name": "CpuUsage",
                    "period": 60,
                    "operator": "ge",
                    "value": "89.9",
                    "continue_period": 1,
                    "notice_frequency": 3600,
                    "is_power_notice": 0,
                    "filter": [],
                    "description": "",
                    "unit": null,
                    "rule_type": null
                }]
            }]
        }));
        let condition = condition(&d).unwrap().unwrap();
        assert_eq!(condition.is_union_rule, 1);
        let rule = &condition.rules[0];
        assert_eq!(rule.metric_name.as_deref(), Some("CpuUsage"));
        assert_eq!(rule.notice_frequency, Some(3600));
        assert!(rule.filter.is_none());
        assert!(rule.description.is_none());
    }

    #[test]
    fn test_empty_event_conditions_are_omitted() {
        let d = ResourceData::new(json!({"event_conditions": null}));
        assert!(event_condition(&d).unwrap().is_none());

        let d = ResourceData::new(json!({"event_conditions": [{"metric_name": "ping_unreachable"}]}));
        let events = event_condition(&d).unwrap().unwrap();
        assert_eq!(events.rules[0].metric_name.as_deref(), Some("ping_unreachable"));
    }

    #[test]
    fn test_empty_filter_is_dropped_on_read() {
        let rule = AlarmPolicyRule {
            filter: Some(AlarmPolicyFilter::default()),
            ..Default::default()
        };
        assert!(RuleState::from(rule).filter.is_empty());
    }

    #[test]
    fn test_schema_defaults() {
        let schema = MonitorAlarmPolicy.schema();
        assert_eq!(schema.block.attributes["enable"].default, Some(json!(1)));
        assert_eq!(schema.block.attributes["project_id"].default, Some(json!(-1)));
        assert!(schema.is_force_new("namespace"));
        assert!(schema.is_force_new("policy_tag"));
        assert!(!schema.is_force_new("policy_name"));
    }
}
