//! Request and response shapes of the Grafana instance calls.
//!
//! Field names follow the API; only non-obvious ones are documented.
#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// `InstanceStatus` of a running Grafana instance.
pub const GRAFANA_STATUS_RUNNING: &str = "2";
/// `InstanceStatus` of an abnormal Grafana instance.
pub const GRAFANA_STATUS_ABNORMAL: &str = "3";
/// Creating, changing, upgrading and restarting.
pub const GRAFANA_STATUS_PENDING: &[&str] = &["1", "7", "8", "9"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceIdRequest<'a> {
    pub instance_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeGrafanaInstancesRequest<'a> {
    pub instance_ids: Vec<&'a str>,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GrafanaInstance {
    pub instance_id: String,
    pub instance_name: String,
    pub instance_status: i64,
    #[serde(rename = "EnableSSO")]
    pub enable_sso: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeGrafanaInstancesResponse {
    pub instances: Vec<GrafanaInstance>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateGrafanaWhiteListRequest<'a> {
    pub instance_id: &'a str,
    pub whitelist: &'a [String],
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeGrafanaWhiteListResponse {
    pub white_list: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateDnsConfigRequest<'a> {
    pub instance_id: &'a str,
    pub name_servers: &'a [String],
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeDnsConfigResponse {
    pub name_servers: Vec<String>,
}

/// `Envs` is a JSON object encoded as a string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateGrafanaEnvironmentsRequest<'a> {
    pub instance_id: &'a str,
    pub envs: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeGrafanaEnvironmentsResponse {
    pub envs: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateGrafanaConfigRequest<'a> {
    pub instance_id: &'a str,
    pub config: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeGrafanaConfigResponse {
    pub config: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnableGrafanaSsoRequest<'a> {
    pub instance_id: &'a str,
    #[serde(rename = "EnableSSO")]
    pub enable_sso: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GrafanaAccountRole {
    pub organization: String,
    pub role: String,
}

/// Body of `CreateSSOAccount` and `UpdateSSOAccount`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SsoAccountRequest<'a> {
    pub instance_id: &'a str,
    pub user_id: &'a str,
    pub role: Vec<GrafanaAccountRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SsoAccountIdRequest<'a> {
    pub instance_id: &'a str,
    pub user_id: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GrafanaAccount {
    pub user_id: String,
    pub role: Vec<GrafanaAccountRole>,
    pub notes: String,
    pub created_at: String,
    pub instance_id: String,
    pub uin: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeSsoAccountResponse {
    pub account_set: Vec<GrafanaAccount>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sso_field_names() {
        let req = EnableGrafanaSsoRequest {
            instance_id: "grafana-1",
            enable_sso: true,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"InstanceId": "grafana-1", "EnableSSO": true})
        );

        let resp: DescribeGrafanaInstancesResponse = serde_json::from_value(json!({
            "Instances": [{"InstanceId": "grafana-1", "InstanceStatus": 2, "EnableSSO": true}]
        }))
        .unwrap();
        assert!(resp.instances[0].enable_sso);
        assert_eq!(resp.instances[0].instance_status, 2);
    }
}
