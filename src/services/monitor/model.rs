//! Request and response shapes of the Cloud Monitor alarm API.
//!
//! Field names follow the API; only non-obvious ones are documented.
#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// Value of the `Module` field every alarm call carries.
pub const MODULE: &str = "monitor";

pub const POLICY_INFO_KEY_NAME: &str = "NAME";
pub const POLICY_INFO_KEY_REMARK: &str = "REMARK";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlarmPolicyFilter {
    #[serde(rename = "Type")]
    pub filter_type: String,
    pub dimensions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlarmPolicyRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continue_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_frequency: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_power_notice: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<AlarmPolicyFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlarmPolicyCondition {
    pub is_union_rule: i64,
    pub rules: Vec<AlarmPolicyRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlarmPolicyEventCondition {
    pub rules: Vec<AlarmPolicyRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlarmPolicyTriggerTask {
    #[serde(rename = "Type")]
    pub task_type: String,
    pub task_config: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PolicyTag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateAlarmPolicyRequest {
    pub module: String,
    pub policy_name: String,
    pub monitor_type: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub enable: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_template_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<AlarmPolicyCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_condition: Option<AlarmPolicyEventCondition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notice_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trigger_tasks: Vec<AlarmPolicyTriggerTask>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateAlarmPolicyResponse {
    pub policy_id: String,
    pub origin_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyIdRequest<'a> {
    pub module: &'a str,
    pub policy_id: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlarmPolicy {
    pub policy_id: String,
    pub policy_name: String,
    pub remark: String,
    pub monitor_type: String,
    pub enable: i64,
    pub project_id: i64,
    pub namespace: String,
    /// Numeric id sent as a string; empty or `0` when unset.
    pub condition_template_id: String,
    pub condition: Option<AlarmPolicyCondition>,
    pub event_condition: Option<AlarmPolicyEventCondition>,
    pub notice_ids: Vec<String>,
    pub trigger_tasks: Vec<AlarmPolicyTriggerTask>,
    pub insert_time: i64,
    pub update_time: i64,
    pub tag_instances: Vec<PolicyTag>,
    pub origin_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeAlarmPolicyResponse {
    pub policy: Option<AlarmPolicy>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BindingPolicyTagRequest<'a> {
    pub module: &'a str,
    pub policy_id: &'a str,
    pub group_id: &'a str,
    pub service_type: &'a str,
    pub tag: &'a PolicyTag,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyAlarmPolicyInfoRequest<'a> {
    pub module: &'a str,
    pub policy_id: &'a str,
    pub key: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyAlarmPolicyStatusRequest<'a> {
    pub module: &'a str,
    pub policy_id: &'a str,
    pub enable: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyAlarmPolicyConditionRequest<'a> {
    pub module: &'a str,
    pub policy_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<AlarmPolicyCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_condition: Option<AlarmPolicyEventCondition>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyAlarmPolicyNoticeRequest<'a> {
    pub module: &'a str,
    pub policy_id: &'a str,
    pub notice_ids: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyAlarmPolicyTasksRequest<'a> {
    pub module: &'a str,
    pub policy_id: &'a str,
    pub trigger_tasks: &'a [AlarmPolicyTriggerTask],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteAlarmPolicyRequest<'a> {
    pub module: &'a str,
    pub policy_ids: Vec<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserNotice {
    pub receiver_type: String,
    pub start_time: i64,
    pub end_time: i64,
    pub notice_way: Vec<String>,
    pub user_ids: Vec<i64>,
    pub group_ids: Vec<i64>,
    pub phone_order: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_circle_times: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_inner_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_circle_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_phone_arrive_notice: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_call_type: Option<String>,
    pub weekday: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UrlNotice {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    pub weekday: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ClsNotice {
    pub region: String,
    pub log_set_id: String,
    pub topic_id: String,
    pub enable: i64,
}

/// Body shared by `CreateAlarmNotice` and `ModifyAlarmNotice`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmNoticeRequest {
    pub module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_id: Option<String>,
    pub name: String,
    pub notice_type: String,
    pub notice_language: String,
    pub user_notices: Vec<UserNotice>,
    #[serde(rename = "URLNotices")]
    pub url_notices: Vec<UrlNotice>,
    #[serde(rename = "CLSNotices")]
    pub cls_notices: Vec<ClsNotice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateAlarmNoticeResponse {
    pub notice_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeAlarmNoticesRequest<'a> {
    pub module: &'a str,
    pub page_number: i64,
    pub page_size: i64,
    pub order: &'a str,
    pub notice_ids: Vec<&'a str>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlarmNotice {
    pub id: String,
    pub name: String,
    pub updated_at: String,
    pub updated_by: String,
    pub notice_type: String,
    pub notice_language: String,
    pub user_notices: Vec<UserNotice>,
    #[serde(rename = "URLNotices")]
    pub url_notices: Vec<UrlNotice>,
    #[serde(rename = "CLSNotices")]
    pub cls_notices: Vec<ClsNotice>,
    pub is_preset: i64,
    pub policy_ids: Vec<String>,
    #[serde(rename = "AMPConsumerId")]
    pub amp_consumer_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeAlarmNoticesResponse {
    pub notices: Vec<AlarmNotice>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteAlarmNoticesRequest<'a> {
    pub module: &'a str,
    pub notice_ids: Vec<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MonitorTypeNamespace {
    pub monitor_type: String,
    pub namespace: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeAlarmHistoriesRequest {
    pub module: String,
    pub page_number: i64,
    pub page_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub monitor_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_object: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alarm_status: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instance_group_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<MonitorTypeNamespace>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metric_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub receiver_uids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub receiver_groups: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub policy_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alarm_levels: Vec<String>,
}

// The history shapes are only ever read from the API and written to state,
// so they decode PascalCase and encode snake_case.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct InstanceGroup {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct AlarmHistoryMetric {
    pub qce_namespace: String,
    pub metric_name: String,
    pub period: i64,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct AlarmHistory {
    pub alarm_id: String,
    pub monitor_type: String,
    pub namespace: String,
    pub alarm_object: String,
    pub content: String,
    pub first_occur_time: i64,
    pub last_occur_time: i64,
    pub alarm_status: String,
    pub policy_id: String,
    pub policy_name: String,
    #[serde(rename(deserialize = "VPC", serialize = "vpc"))]
    pub vpc: String,
    pub project_id: i64,
    pub project_name: String,
    pub instance_group: Vec<InstanceGroup>,
    pub receiver_uids: Vec<i64>,
    pub receiver_groups: Vec<i64>,
    pub notice_ways: Vec<String>,
    pub origin_id: String,
    pub alarm_type: String,
    pub event_id: i64,
    pub region: String,
    pub policy_exists: i64,
    pub metrics_info: Vec<AlarmHistoryMetric>,
    pub dimensions: String,
    pub alarm_level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeAlarmHistoriesResponse {
    pub histories: Vec<AlarmHistory>,
    pub total_count: i64,
}

/// Emits an optional nested object as a zero- or one-element list, the shape
/// state uses for single nested blocks.
fn one_or_none<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: Serialize,
{
    value.as_slice().serialize(serializer)
}

/// Filter of `DescribeAlarmPolicies`; paging is filled in by the service.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeAlarmPoliciesRequest {
    pub module: String,
    pub page_number: i64,
    pub page_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub monitor_types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub receiver_uids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub receiver_groups: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub policy_type: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notice_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rule_types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enable: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_binding_notice_rule: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_correspondence: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub one_click_policy_type: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_bind_all: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_instance_group: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prom_ins_id: Option<String>,
    #[serde(rename = "ReceiverOnCallFormIDs", skip_serializing_if = "Vec::is_empty")]
    pub receiver_on_call_form_ids: Vec<String>,
}

// The listing shapes below are read from the API and written to state, like
// the history shapes.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct PolicyFilterSummary {
    #[serde(rename(deserialize = "Type", serialize = "type"))]
    pub filter_type: String,
    pub dimensions: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct PolicyRuleSummary {
    pub metric_name: String,
    pub period: i64,
    pub operator: String,
    pub value: String,
    pub continue_period: i64,
    pub notice_frequency: i64,
    pub is_power_notice: i64,
    #[serde(serialize_with = "one_or_none")]
    pub filter: Option<PolicyFilterSummary>,
    pub description: String,
    pub unit: String,
    pub rule_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct PolicyConditionSummary {
    pub is_union_rule: i64,
    pub rules: Vec<PolicyRuleSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct PolicyEventConditionSummary {
    pub rules: Vec<PolicyRuleSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct TriggerTaskSummary {
    #[serde(rename(deserialize = "Type", serialize = "type"))]
    pub task_type: String,
    pub task_config: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct TagInstanceSummary {
    pub key: String,
    pub value: String,
    pub instance_sum: i64,
    pub service_type: String,
    pub region_id: i64,
    pub binding_status: i64,
    pub tag_status: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct TagSummary {
    pub key: String,
    pub value: String,
}

/// One entry of `DescribeAlarmPolicies`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct AlarmPolicySummary {
    pub policy_id: String,
    pub policy_name: String,
    pub remark: String,
    pub monitor_type: String,
    pub enable: i64,
    pub use_sum: i64,
    pub project_id: i64,
    pub project_name: String,
    pub namespace: String,
    pub condition_template_id: String,
    #[serde(serialize_with = "one_or_none")]
    pub condition: Option<PolicyConditionSummary>,
    #[serde(serialize_with = "one_or_none")]
    pub event_condition: Option<PolicyEventConditionSummary>,
    pub notice_ids: Vec<String>,
    pub trigger_tasks: Vec<TriggerTaskSummary>,
    pub last_edit_uin: String,
    pub update_time: i64,
    pub insert_time: i64,
    pub region: Vec<String>,
    pub namespace_show_name: String,
    pub is_default: i64,
    pub can_set_default: i64,
    pub instance_group_id: i64,
    pub instance_sum: i64,
    pub instance_group_name: String,
    pub rule_type: String,
    pub origin_id: String,
    pub tag_instances: Vec<TagInstanceSummary>,
    pub filter_dimensions_param: String,
    pub is_one_click: i64,
    pub one_click_status: i64,
    pub advanced_metric_number: i64,
    pub is_bind_all: i64,
    pub tags: Vec<TagSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeAlarmPoliciesResponse {
    pub policies: Vec<AlarmPolicySummary>,
    pub total_count: i64,
}

/// Filter of `DescribeConditionsTemplateList`; paging is filled in by the service.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeConditionsTemplateListRequest {
    pub module: String,
    pub offset: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(rename = "GroupID", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_count_order: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct TemplateCondition {
    pub alarm_notify_period: i64,
    pub alarm_notify_type: i64,
    pub calc_type: String,
    pub calc_value: String,
    pub continue_time: String,
    #[serde(rename(deserialize = "MetricID", serialize = "metric_id"))]
    pub metric_id: i64,
    pub metric_display_name: String,
    pub period: i64,
    #[serde(rename(deserialize = "RuleID", serialize = "rule_id"))]
    pub rule_id: i64,
    pub unit: String,
    pub is_advanced: i64,
    pub is_open: i64,
    pub product_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct TemplateEventCondition {
    pub alarm_notify_period: String,
    pub alarm_notify_type: String,
    #[serde(rename(deserialize = "EventID", serialize = "event_id"))]
    pub event_id: String,
    pub event_display_name: String,
    #[serde(rename(deserialize = "RuleID", serialize = "rule_id"))]
    pub rule_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct ReceiverInfo {
    pub end_time: i64,
    pub need_send_notice: i64,
    pub notify_way: Vec<String>,
    pub person_interval: i64,
    pub receiver_group_list: Vec<i64>,
    pub receiver_type: String,
    pub receiver_user_list: Vec<i64>,
    pub recover_notify: Vec<String>,
    pub round_interval: i64,
    pub round_number: i64,
    pub send_for: Vec<String>,
    pub start_time: i64,
    #[serde(rename(deserialize = "UIDList", serialize = "uid_list"))]
    pub uid_list: Vec<i64>,
}

/// A legacy policy group bound to a conditions template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct TemplatePolicyGroup {
    pub can_set_default: bool,
    #[serde(rename(deserialize = "GroupID", serialize = "group_id"))]
    pub group_id: i64,
    pub group_name: String,
    pub insert_time: i64,
    pub is_default: i64,
    pub enable: bool,
    pub last_edit_uin: i64,
    pub no_shielded_instance_count: i64,
    #[serde(rename(deserialize = "ParentGroupID", serialize = "parent_group_id"))]
    pub parent_group_id: i64,
    #[serde(rename(deserialize = "ProjectID", serialize = "project_id"))]
    pub project_id: i64,
    pub receiver_infos: Vec<ReceiverInfo>,
    pub remark: String,
    pub update_time: i64,
    pub total_instance_count: i64,
    pub view_name: String,
    pub is_union_rule: i64,
}

/// One entry of `DescribeConditionsTemplateList`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct TemplateGroup {
    pub conditions: Vec<TemplateCondition>,
    pub event_conditions: Vec<TemplateEventCondition>,
    pub policy_groups: Vec<TemplatePolicyGroup>,
    #[serde(rename(deserialize = "GroupID", serialize = "group_id"))]
    pub group_id: i64,
    pub group_name: String,
    pub insert_time: i64,
    pub last_edit_uin: i64,
    pub remark: String,
    pub update_time: i64,
    pub view_name: String,
    pub is_union_rule: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeConditionsTemplateListResponse {
    pub template_group_list: Vec<TemplateGroup>,
    pub total: i64,
}
