//! Read-only Cloud Monitor queries: alarm policies and trigger condition
//! templates.

use super::alarm_history::{int_list, int_set, string_set};
use super::model::{DescribeAlarmPoliciesRequest, DescribeConditionsTemplateListRequest, MODULE};
use super::service::MonitorService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::helper::data_resource_ids_hash;
use crate::resource::DataSource;
use crate::schema::{Attribute, AttributeFlags, AttributeType, Block, NestedBlock, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde_json::json;

fn computed_list(block: Block) -> NestedBlock {
    NestedBlock::list(block).with_computed()
}

fn computed_set(element: AttributeType) -> Attribute {
    Attribute::set(element, AttributeFlags::computed())
}

fn module_attribute() -> Attribute {
    Attribute::optional_string()
        .with_default(json!(MODULE))
        .with_description("Value fixed at `monitor`.")
}

fn order_attribute() -> Attribute {
    Attribute::optional_string().with_allowed_strings(&["asc", "desc"])
}

fn rule_block() -> Block {
    let computed_string = Attribute::computed_string;
    let computed_int = Attribute::computed_int64;
    Block::new()
        .with_attribute("metric_name", computed_string())
        .with_attribute("period", computed_int())
        .with_attribute("operator", computed_string())
        .with_attribute("value", computed_string())
        .with_attribute("continue_period", computed_int())
        .with_attribute("notice_frequency", computed_int())
        .with_attribute("is_power_notice", computed_int())
        .with_block(
            "filter",
            computed_list(
                Block::new()
                    .with_attribute("type", computed_string())
                    .with_attribute("dimensions", computed_string()),
            ),
        )
        .with_attribute("description", computed_string())
        .with_attribute("unit", computed_string())
        .with_attribute("rule_type", computed_string())
}

/// `tencentcloud_monitor_alarm_policy`: alarm policies matching a filter.
pub struct MonitorAlarmPolicies;

#[async_trait]
impl DataSource for MonitorAlarmPolicies {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_alarm_policy"
    }

    fn schema(&self) -> Schema {
        let computed_string = Attribute::computed_string;
        let computed_int = Attribute::computed_int64;

        let policy = Block::new()
            .with_attribute("policy_id", computed_string())
            .with_attribute("policy_name", computed_string())
            .with_attribute("remark", computed_string())
            .with_attribute("monitor_type", computed_string())
            .with_attribute("enable", computed_int())
            .with_attribute("use_sum", computed_int())
            .with_attribute("project_id", computed_int())
            .with_attribute("project_name", computed_string())
            .with_attribute("namespace", computed_string())
            .with_attribute("condition_template_id", computed_string())
            .with_block(
                "condition",
                computed_list(
                    Block::new()
                        .with_attribute("is_union_rule", computed_int())
                        .with_block("rules", computed_list(rule_block())),
                ),
            )
            .with_block(
                "event_condition",
                computed_list(Block::new().with_block("rules", computed_list(rule_block()))),
            )
            .with_attribute("notice_ids", Attribute::list(AttributeType::String, AttributeFlags::computed()))
            .with_block(
                "trigger_tasks",
                computed_list(
                    Block::new()
                        .with_attribute("type", computed_string())
                        .with_attribute("task_config", computed_string()),
                ),
            )
            .with_attribute("last_edit_uin", computed_string())
            .with_attribute("update_time", computed_int())
            .with_attribute("insert_time", computed_int())
            .with_attribute("region", Attribute::list(AttributeType::String, AttributeFlags::computed()))
            .with_attribute("namespace_show_name", computed_string())
            .with_attribute("is_default", computed_int())
            .with_attribute("can_set_default", computed_int())
            .with_attribute("instance_group_id", computed_int())
            .with_attribute("instance_sum", computed_int())
            .with_attribute("instance_group_name", computed_string())
            .with_attribute("rule_type", computed_string())
            .with_attribute("origin_id", computed_string())
            .with_block(
                "tag_instances",
                computed_list(
                    Block::new()
                        .with_attribute("key", computed_string())
                        .with_attribute("value", computed_string())
                        .with_attribute("instance_sum", computed_int())
                        .with_attribute("service_type", computed_string())
                        .with_attribute("region_id", computed_int())
                        .with_attribute("binding_status", computed_int())
                        .with_attribute("tag_status", computed_int()),
                ),
            )
            .with_attribute("filter_dimensions_param", computed_string())
            .with_attribute("is_one_click", computed_int())
            .with_attribute("one_click_status", computed_int())
            .with_attribute("advanced_metric_number", computed_int())
            .with_attribute("is_bind_all", computed_int())
            .with_block(
                "tags",
                computed_list(
                    Block::new()
                        .with_attribute("key", computed_string())
                        .with_attribute("value", computed_string()),
                ),
            );

        Schema::v0()
            .with_attribute("module", module_attribute())
            .with_attribute("policy_name", Attribute::optional_string().with_description("Fuzzy match on name."))
            .with_attribute("monitor_types", string_set().with_description("`MT_QCE` for cloud products."))
            .with_attribute("namespaces", string_set())
            .with_attribute(
                "dimensions",
                Attribute::optional_string().with_description("JSON array of instance dimensions."),
            )
            .with_attribute("receiver_uids", int_set())
            .with_attribute("receiver_groups", int_set())
            .with_attribute("policy_type", string_set())
            .with_attribute("field", Attribute::optional_string().with_description("Sort field, e.g. `UpdateTime`."))
            .with_attribute("order", Attribute::optional_string().with_allowed_strings(&["ASC", "DESC"]))
            .with_attribute("project_ids", int_set())
            .with_attribute("notice_ids", string_set())
            .with_attribute("rule_types", string_set().with_description("`STATIC` or `DYNAMIC`."))
            .with_attribute("enable", int_set().with_description("`1` enabled, `0` disabled."))
            .with_attribute("not_binding_notice_rule", Attribute::optional_int64())
            .with_attribute("instance_group_id", Attribute::optional_int64())
            .with_attribute("need_correspondence", Attribute::optional_int64())
            .with_attribute("one_click_policy_type", string_set())
            .with_attribute("not_bind_all", Attribute::optional_int64())
            .with_attribute("not_instance_group", Attribute::optional_int64())
            .with_attribute("prom_ins_id", Attribute::optional_string())
            .with_attribute("receiver_on_call_form_ids", string_set())
            .with_block("policies", computed_list(policy))
            .with_attribute("result_output_file", Attribute::result_output_file())
    }

    fn result_key(&self) -> &'static str {
        "policies"
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let filter = DescribeAlarmPoliciesRequest {
            module: d.get_str("module").unwrap_or(MODULE).to_string(),
            policy_name: d.get_str("policy_name").map(str::to_string),
            monitor_types: d.get_string_list("monitor_types"),
            namespaces: d.get_string_list("namespaces"),
            dimensions: d.get_str("dimensions").map(str::to_string),
            receiver_uids: int_list(d, "receiver_uids"),
            receiver_groups: int_list(d, "receiver_groups"),
            policy_type: d.get_string_list("policy_type"),
            field: d.get_str("field").map(str::to_string),
            order: d.get_str("order").map(str::to_string),
            project_ids: int_list(d, "project_ids"),
            notice_ids: d.get_string_list("notice_ids"),
            rule_types: d.get_string_list("rule_types"),
            enable: int_list(d, "enable"),
            not_binding_notice_rule: d.get_i64("not_binding_notice_rule"),
            instance_group_id: d.get_i64("instance_group_id"),
            need_correspondence: d.get_i64("need_correspondence"),
            one_click_policy_type: d.get_string_list("one_click_policy_type"),
            not_bind_all: d.get_i64("not_bind_all"),
            not_instance_group: d.get_i64("not_instance_group"),
            prom_ins_id: d.get_str("prom_ins_id").map(str::to_string),
            receiver_on_call_form_ids: d.get_string_list("receiver_on_call_form_ids"),
            ..Default::default()
        };

        let policies = MonitorService::new(client).describe_alarm_policies(filter).await?;

        let ids: Vec<&str> = policies.iter().map(|p| p.policy_id.as_str()).collect();
        d.set_id(data_resource_ids_hash(&ids));
        d.set("policies", serde_json::to_value(&policies)?);
        Ok(())
    }
}

/// `tencentcloud_monitor_alarm_conditions_template`: trigger condition
/// templates and the policy groups bound to them.
pub struct MonitorAlarmConditionsTemplates;

#[async_trait]
impl DataSource for MonitorAlarmConditionsTemplates {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_alarm_conditions_template"
    }

    fn schema(&self) -> Schema {
        let computed_string = Attribute::computed_string;
        let computed_int = Attribute::computed_int64;

        let condition = Block::new()
            .with_attribute("alarm_notify_period", computed_int())
            .with_attribute("alarm_notify_type", computed_int())
            .with_attribute("calc_type", computed_string())
            .with_attribute("calc_value", computed_string())
            .with_attribute("continue_time", computed_string())
            .with_attribute("metric_id", computed_int())
            .with_attribute("metric_display_name", computed_string())
            .with_attribute("period", computed_int())
            .with_attribute("rule_id", computed_int())
            .with_attribute("unit", computed_string())
            .with_attribute("is_advanced", computed_int())
            .with_attribute("is_open", computed_int())
            .with_attribute("product_id", computed_string());

        let event_condition = Block::new()
            .with_attribute("alarm_notify_period", computed_string())
            .with_attribute("alarm_notify_type", computed_string())
            .with_attribute("event_id", computed_string())
            .with_attribute("event_display_name", computed_string())
            .with_attribute("rule_id", computed_string());

        let receiver_info = Block::new()
            .with_attribute("end_time", computed_int())
            .with_attribute("need_send_notice", computed_int())
            .with_attribute("notify_way", computed_set(AttributeType::String))
            .with_attribute("person_interval", computed_int())
            .with_attribute("receiver_group_list", computed_set(AttributeType::Int64))
            .with_attribute("receiver_type", computed_string())
            .with_attribute("receiver_user_list", computed_set(AttributeType::Int64))
            .with_attribute("recover_notify", computed_set(AttributeType::String))
            .with_attribute("round_interval", computed_int())
            .with_attribute("round_number", computed_int())
            .with_attribute("send_for", computed_set(AttributeType::String))
            .with_attribute("start_time", computed_int())
            .with_attribute("uid_list", computed_set(AttributeType::Int64));

        let policy_group = Block::new()
            .with_attribute("can_set_default", Attribute::computed_bool())
            .with_attribute("group_id", computed_int())
            .with_attribute("group_name", computed_string())
            .with_attribute("insert_time", computed_int())
            .with_attribute("is_default", computed_int())
            .with_attribute("enable", Attribute::computed_bool())
            .with_attribute("last_edit_uin", computed_int())
            .with_attribute("no_shielded_instance_count", computed_int())
            .with_attribute("parent_group_id", computed_int())
            .with_attribute("project_id", computed_int())
            .with_block("receiver_infos", computed_list(receiver_info))
            .with_attribute("remark", computed_string())
            .with_attribute("update_time", computed_int())
            .with_attribute("total_instance_count", computed_int())
            .with_attribute("view_name", computed_string())
            .with_attribute("is_union_rule", computed_int());

        let template_group = Block::new()
            .with_block("conditions", computed_list(condition))
            .with_block("event_conditions", computed_list(event_condition))
            .with_block("policy_groups", computed_list(policy_group))
            .with_attribute("group_id", computed_int())
            .with_attribute("group_name", computed_string())
            .with_attribute("insert_time", computed_int())
            .with_attribute("last_edit_uin", computed_int())
            .with_attribute("remark", computed_string())
            .with_attribute("update_time", computed_int())
            .with_attribute("view_name", computed_string())
            .with_attribute("is_union_rule", computed_int());

        Schema::v0()
            .with_attribute("module", module_attribute())
            .with_attribute(
                "view_name",
                Attribute::optional_string().with_description("View name, e.g. `cvm_device`."),
            )
            .with_attribute("group_name", Attribute::optional_string().with_description("Template name filter."))
            .with_attribute("group_id", Attribute::optional_string().with_description("Template id filter."))
            .with_attribute("update_time_order", order_attribute())
            .with_attribute("policy_count_order", order_attribute())
            .with_block("template_group_list", computed_list(template_group))
            .with_attribute("result_output_file", Attribute::result_output_file())
    }

    fn result_key(&self) -> &'static str {
        "template_group_list"
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let filter = DescribeConditionsTemplateListRequest {
            module: d.get_str("module").unwrap_or(MODULE).to_string(),
            view_name: d.get_str("view_name").map(str::to_string),
            group_name: d.get_str("group_name").map(str::to_string),
            group_id: d.get_str("group_id").map(str::to_string),
            update_time_order: d.get_str("update_time_order").map(str::to_string),
            policy_count_order: d.get_str("policy_count_order").map(str::to_string),
            ..Default::default()
        };

        let groups = MonitorService::new(client)
            .describe_conditions_templates(filter)
            .await?;

        let ids: Vec<String> = groups.iter().map(|g| g.group_id.to_string()).collect();
        d.set_id(data_resource_ids_hash(&ids));
        d.set("template_group_list", serde_json::to_value(&groups)?);
        Ok(())
    }
}
