//! Request and response shapes of the `cdwch` API.
//!
//! Field names follow the API; only non-obvious ones are documented.
#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

pub const OPERATION_OPEN: &str = "open";
pub const OPERATION_CLOSE: &str = "close";
pub const OPERATION_CREATE: &str = "create";
pub const OPERATION_UPDATE: &str = "update";
pub const OPERATION_DELETE: &str = "delete";

pub const SCHEDULE_TYPE_DATA: &str = "data";
pub const SCHEDULE_TYPE_META: &str = "meta";

pub const API_TYPE_GET_SYSTEM_USERS: &str = "GetSystemUsers";
pub const API_TYPE_ADD_SYSTEM_USER: &str = "AddSystemUser";
pub const API_TYPE_UPDATE_SYSTEM_USER: &str = "UpdateSystemUser";
pub const API_TYPE_DELETE_SYSTEM_USER: &str = "DeleteSystemUser";

/// Instance states `DescribeInstanceState` reports while a change is applied.
pub const INSTANCE_STATE_PENDING: &[&str] = &["Init", "Modify", "Changing", "Restarting"];
pub const INSTANCE_STATE_SERVING: &str = "Serving";
pub const INSTANCE_STATE_FAILED: &[&str] = &["Deleted", "Deleting", "Isolated"];

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceIdRequest<'a> {
    pub instance_id: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeInstanceStateResponse {
    pub instance_state: Option<String>,
    pub instance_state_desc: Option<String>,
    pub flow_msg: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BackupTableContent {
    pub database: String,
    pub table: String,
    pub total_bytes: i64,
    #[serde(rename = "VCluster")]
    pub v_cluster: String,
    pub ips: String,
    pub zoo_path: String,
    pub rip: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScheduleStrategy {
    pub cos_bucket_name: Option<String>,
    pub retain_days: i64,
    pub week_days: String,
    pub execute_hour: i64,
    pub schedule_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeBackUpScheduleResponse {
    pub back_up_opened: bool,
    pub meta_strategy: Option<ScheduleStrategy>,
    pub data_strategy: Option<ScheduleStrategy>,
    pub back_up_contents: Vec<BackupTableContent>,
    pub back_up_status: i64,
    pub error_msg: Option<String>,
}

impl DescribeBackUpScheduleResponse {
    /// Bucket the backups are written to, from whichever schedule carries it.
    pub fn cos_bucket_name(&self) -> Option<&str> {
        [&self.data_strategy, &self.meta_strategy]
            .into_iter()
            .flatten()
            .find_map(|s| s.cos_bucket_name.as_deref())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OpenBackUpRequest<'a> {
    pub instance_id: &'a str,
    pub operation_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cos_bucket_name: Option<&'a str>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateBackUpScheduleRequest {
    pub instance_id: String,
    pub schedule_type: String,
    pub operation_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retain_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execute_hour: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub back_up_tables: Vec<BackupTableContent>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeBackUpJobRequest {
    pub instance_id: String,
    pub page_size: i64,
    pub page_num: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BackUpJobDisplay {
    pub job_id: i64,
    pub snapshot: String,
    pub back_up_size: i64,
    pub back_up_time: String,
    pub expire_time: String,
    pub job_status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeBackUpJobResponse {
    pub back_up_jobs: Vec<BackUpJobDisplay>,
    pub total_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeBackUpTablesResponse {
    pub available_tables: Vec<BackupTableContent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeCkSqlApisRequest<'a> {
    pub instance_id: &'a str,
    pub api_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<&'a str>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeCkSqlApisResponse {
    /// JSON document whose shape depends on the api type.
    pub return_data: Option<String>,
}

/// One ClickHouse system user as returned by `GetSystemUsers`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AccountInfo {
    pub instance_id: String,
    pub user_name: String,
    pub describe: String,
    pub host: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CkUserAlterInfo {
    pub instance_id: String,
    pub user_name: String,
    pub pass_word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub describe: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActionAlterCkUserRequest<'a> {
    pub user_info: &'a CkUserAlterInfo,
    pub api_type: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InstanceConfigInfo {
    pub conf_key: String,
    pub conf_value: String,
    pub default: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeInstanceKeyValConfigsResponse {
    pub config_items: Vec<InstanceConfigInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceConfigItem {
    pub conf_key: String,
    pub conf_value: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyInstanceKeyValConfigsRequest {
    pub instance_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_items: Vec<InstanceConfigItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub update_items: Vec<InstanceConfigItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub del_items: Vec<InstanceConfigItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ClusterConfigsInfo {
    pub file_name: String,
    /// Base64 encoded file content.
    pub ori_param: String,
    pub file_path: String,
    pub need_restart: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeClusterConfigsResponse {
    pub cluster_conf_list: Vec<ClusterConfigsInfo>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigSubmitContext {
    pub file_name: String,
    pub new_conf_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_conf_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyClusterConfigsRequest {
    pub instance_id: String,
    pub modify_conf_context: Vec<ConfigSubmitContext>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchTags {
    pub tag_key: String,
    pub tag_value: String,
    pub all_value: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeInstancesNewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_instance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_instance_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_tags: Vec<SearchTags>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vips: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_simple: Option<bool>,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InstanceInfo {
    pub instance_id: String,
    pub instance_name: String,
    pub status: String,
    pub status_desc: String,
    pub version: String,
    pub region: String,
    pub zone: String,
    pub vpc_id: String,
    pub subnet_id: String,
    pub pay_mode: String,
    pub create_time: String,
    pub expire_time: String,
    pub access_info: String,
    pub eip: String,
    #[serde(rename = "HA")]
    pub ha: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeInstancesNewResponse {
    pub total_count: i64,
    pub instances_list: Vec<InstanceInfo>,
}
