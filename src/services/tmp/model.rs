//! Request and response shapes of the managed Prometheus (TMP) calls.
//!
//! Field names follow the API; only non-obvious ones are documented.
#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PrometheusRuleKV {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AllowTimeRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CustomReceiver {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub receiver_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_time_ranges: Vec<AllowTimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlertGroupRule {
    pub rule_name: String,
    pub labels: Vec<PrometheusRuleKV>,
    pub annotations: Vec<PrometheusRuleKV>,
    pub duration: String,
    pub expr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<i64>,
}

/// Body of `CreatePrometheusAlertGroup` and `UpdatePrometheusAlertGroup`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlertGroupRequest {
    pub instance_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(rename = "AMPReceivers", skip_serializing_if = "Vec::is_empty")]
    pub amp_receivers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_receiver: Option<CustomReceiver>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<AlertGroupRule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateAlertGroupResponse {
    pub group_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeAlertGroupsRequest<'a> {
    pub instance_id: &'a str,
    pub group_id: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlertGroup {
    pub group_id: String,
    pub group_name: String,
    #[serde(rename = "AMPReceivers")]
    pub amp_receivers: Vec<String>,
    pub custom_receiver: Option<CustomReceiver>,
    pub repeat_interval: String,
    pub rules: Vec<AlertGroupRule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeAlertGroupsResponse {
    pub alert_group_set: Vec<AlertGroup>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteAlertGroupsRequest<'a> {
    pub instance_id: &'a str,
    pub group_ids: Vec<&'a str>,
}

/// Body of `CreateAlertRule` and `UpdateAlertRule`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlertRuleRequest {
    pub instance_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    pub rule_name: String,
    pub expr: String,
    pub receivers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_state: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<PrometheusRuleKV>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<PrometheusRuleKV>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateAlertRuleResponse {
    pub rule_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeAlertRulesRequest<'a> {
    pub instance_id: &'a str,
    pub rule_id: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlertRule {
    pub rule_id: String,
    pub rule_name: String,
    pub rule_state: i64,
    #[serde(rename = "Type")]
    pub rule_type: String,
    pub labels: Vec<PrometheusRuleKV>,
    pub annotations: Vec<PrometheusRuleKV>,
    pub expr: String,
    pub duration: String,
    pub receivers: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeAlertRulesResponse {
    pub alert_rule_set: Vec<AlertRule>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteAlertRulesRequest<'a> {
    pub instance_id: &'a str,
    pub rule_ids: Vec<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PrometheusTag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribePrometheusInstancesRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instance_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instance_status: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_filters: Vec<PrometheusTag>,
    #[serde(rename = "IPv4Address", skip_serializing_if = "Vec::is_empty")]
    pub ipv4_address: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_charge_type: Option<i64>,
    pub offset: i64,
    pub limit: i64,
}

// Instance listings are only read from the API and written to state.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct TagSpecification {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct InstanceGrant {
    pub has_charge_operation: i64,
    pub has_vpc_display: i64,
    pub has_grafana_status_change: i64,
    pub has_agent_manage: i64,
    pub has_tke_manage: i64,
    pub has_api_operation: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "snake_case"), default)]
pub struct PrometheusInstance {
    pub instance_id: String,
    pub instance_name: String,
    pub instance_charge_type: i64,
    pub region_id: i64,
    pub zone: String,
    pub vpc_id: String,
    pub subnet_id: String,
    pub data_retention_time: i64,
    pub instance_status: i64,
    #[serde(rename(deserialize = "GrafanaURL", serialize = "grafana_url"))]
    pub grafana_url: String,
    pub created_at: String,
    pub enable_grafana: i64,
    #[serde(rename(deserialize = "IPv4Address", serialize = "ipv4_address"))]
    pub ipv4_address: String,
    pub tag_specification: Vec<TagSpecification>,
    pub expire_time: String,
    pub charge_status: i64,
    pub spec_name: String,
    pub auto_renew_flag: i64,
    pub is_near_expire: i64,
    pub auth_token: String,
    pub remote_write: String,
    pub api_root_path: String,
    pub proxy_address: String,
    pub grafana_status: i64,
    pub grafana_ip_white_list: String,
    #[serde(serialize_with = "grant_as_list")]
    pub grant: Option<InstanceGrant>,
    pub grafana_instance_id: String,
    pub alert_rule_limit: i64,
    pub recording_rule_limit: i64,
    pub migration_type: i64,
}

/// `grant` is a one-element nested block in state.
fn grant_as_list<S: serde::Serializer>(grant: &Option<InstanceGrant>, s: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeSeq;
    let mut seq = s.serialize_seq(Some(usize::from(grant.is_some())))?;
    if let Some(g) = grant {
        seq.serialize_element(g)?;
    }
    seq.end()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribePrometheusInstancesResponse {
    pub instance_set: Vec<PrometheusInstance>,
    pub total_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alert_group_request_body() {
        let req = AlertGroupRequest {
            instance_id: "prom-1".into(),
            group_name: Some("node".into()),
            amp_receivers: vec!["notice-1".into()],
            custom_receiver: Some(CustomReceiver {
                receiver_type: Some("webhook".into()),
                url: Some("http://10.0.0.1/hook".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["AMPReceivers"], json!(["notice-1"]));
        assert_eq!(body["CustomReceiver"], json!({"Type": "webhook", "Url": "http://10.0.0.1/hook"}));
        assert!(body.get("GroupId").is_none());
        assert!(body.get("Rules").is_none());
    }

    #[test]
    fn test_instance_state_shape() {
        let instance: PrometheusInstance = serde_json::from_value(json!({
            "InstanceId": "prom-1",
            "GrafanaURL": "https://grafana.example.com",
            "IPv4Address": "10.0.0.8",
            "TagSpecification": [{"Key": "env", "Value": "prod"}],
            "Grant": {"HasApiOperation": 1}
        }))
        .unwrap();
        let state = serde_json::to_value(&instance).unwrap();
        assert_eq!(state["grafana_url"], "https://grafana.example.com");
        assert_eq!(state["ipv4_address"], "10.0.0.8");
        assert_eq!(state["tag_specification"][0]["key"], "env");
        assert_eq!(state["grant"][0]["has_api_operation"], 1);

        let bare: PrometheusInstance = serde_json::from_value(json!({"InstanceId": "prom-2"})).unwrap();
        assert_eq!(serde_json::to_value(&bare).unwrap()["grant"], json!([]));
    }
}
