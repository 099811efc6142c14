//! Grafana instance configuration calls on the `monitor` API.

use super::model::*;
use crate::connectivity::{TencentCloudClient, MONITOR};
use crate::error::Result;
use crate::waiter::StateChangeConf;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::info;

/// Grafana instance calls over a shared client.
pub struct GrafanaService<'a> {
    client: &'a TencentCloudClient,
}

impl<'a> GrafanaService<'a> {
    /// Wraps `client`.
    pub fn new(client: &'a TencentCloudClient) -> Self {
        Self { client }
    }

    async fn write<Req: Serialize + ?Sized>(&self, action: &str, req: &Req) -> Result<()> {
        let _: Value = self.client.write_call(MONITOR, action, req, &[]).await?;
        Ok(())
    }

    /// The instance, `None` when it does not exist.
    pub async fn describe_instance(&self, instance_id: &str) -> Result<Option<GrafanaInstance>> {
        let req = DescribeGrafanaInstancesRequest {
            instance_ids: vec![instance_id],
            offset: 0,
            limit: 10,
        };
        let resp: DescribeGrafanaInstancesResponse = self
            .client
            .read_call(MONITOR, "DescribeGrafanaInstances", &req)
            .await?;
        Ok(resp.instances.into_iter().next())
    }

    /// Whether the instance still exists.
    pub async fn instance_exists(&self, instance_id: &str) -> Result<bool> {
        Ok(self.describe_instance(instance_id).await?.is_some())
    }

    /// Block until the instance is running again after a change.
    pub async fn wait_instance_running(&self, instance_id: &str) -> Result<()> {
        let retry = self.client.retry_config();
        let conf = StateChangeConf::new(
            GRAFANA_STATUS_PENDING,
            &[GRAFANA_STATUS_RUNNING],
            retry.write_timeout,
            retry.interval,
        )
        .with_fail(&[GRAFANA_STATUS_ABNORMAL])
        .with_delay(retry.interval);
        conf.wait_for_state(move || async move {
            Ok(self
                .describe_instance(instance_id)
                .await?
                .map(|i| ((), i.instance_status.to_string())))
        })
        .await
    }

    /// Public network whitelist entries.
    pub async fn describe_whitelist(&self, instance_id: &str) -> Result<Vec<String>> {
        let resp: DescribeGrafanaWhiteListResponse = self
            .client
            .read_call(MONITOR, "DescribeGrafanaWhiteList", &InstanceIdRequest { instance_id })
            .await?;
        Ok(resp.white_list)
    }

    /// Replaces the whitelist.
    pub async fn update_whitelist(&self, instance_id: &str, whitelist: &[String]) -> Result<()> {
        let req = UpdateGrafanaWhiteListRequest {
            instance_id,
            whitelist,
        };
        self.write("UpdateGrafanaWhiteList", &req).await
    }

    /// Custom name servers.
    pub async fn describe_dns_config(&self, instance_id: &str) -> Result<Vec<String>> {
        let resp: DescribeDnsConfigResponse = self
            .client
            .read_call(MONITOR, "DescribeDNSConfig", &InstanceIdRequest { instance_id })
            .await?;
        Ok(resp.name_servers)
    }

    /// Replaces the name servers.
    pub async fn update_dns_config(&self, instance_id: &str, name_servers: &[String]) -> Result<()> {
        let req = UpdateDnsConfigRequest {
            instance_id,
            name_servers,
        };
        self.write("UpdateDNSConfig", &req).await
    }

    /// Environment variables; an empty `Envs` string reads as no variables.
    pub async fn describe_environments(&self, instance_id: &str) -> Result<BTreeMap<String, String>> {
        let resp: DescribeGrafanaEnvironmentsResponse = self
            .client
            .read_call(MONITOR, "DescribeGrafanaEnvironments", &InstanceIdRequest { instance_id })
            .await?;
        if resp.envs.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&resp.envs)?)
    }

    /// Replaces all environment variables.
    pub async fn update_environments(&self, instance_id: &str, envs: &BTreeMap<String, String>) -> Result<()> {
        let req = UpdateGrafanaEnvironmentsRequest {
            instance_id,
            envs: serde_json::to_string(envs)?,
        };
        self.write("UpdateGrafanaEnvironments", &req).await
    }

    /// `grafana.ini` overrides as a JSON string.
    pub async fn describe_config(&self, instance_id: &str) -> Result<String> {
        let resp: DescribeGrafanaConfigResponse = self
            .client
            .read_call(MONITOR, "DescribeGrafanaConfig", &InstanceIdRequest { instance_id })
            .await?;
        Ok(resp.config)
    }

    /// Replaces the `grafana.ini` overrides.
    pub async fn update_config(&self, instance_id: &str, config: &str) -> Result<()> {
        let req = UpdateGrafanaConfigRequest { instance_id, config };
        self.write("UpdateGrafanaConfig", &req).await
    }

    /// Switch CAM SSO on or off.
    pub async fn enable_sso(&self, instance_id: &str, enable_sso: bool) -> Result<()> {
        let req = EnableGrafanaSsoRequest {
            instance_id,
            enable_sso,
        };
        self.write("EnableGrafanaSSO", &req).await?;
        info!(instance_id, enable_sso, "grafana sso switched");
        Ok(())
    }

    /// Adds an SSO account.
    pub async fn create_sso_account(&self, req: &SsoAccountRequest<'_>) -> Result<()> {
        self.write("CreateSSOAccount", req).await
    }

    /// The SSO account of `user_id`, `None` when it does not exist.
    pub async fn describe_sso_account(&self, instance_id: &str, user_id: &str) -> Result<Option<GrafanaAccount>> {
        let req = SsoAccountIdRequest { instance_id, user_id };
        let resp: DescribeSsoAccountResponse = self
            .client
            .read_call(MONITOR, "DescribeSSOAccount", &req)
            .await?;
        Ok(resp.account_set.into_iter().find(|a| a.user_id == user_id))
    }

    /// Replaces the roles and notes of an SSO account.
    pub async fn update_sso_account(&self, req: &SsoAccountRequest<'_>) -> Result<()> {
        self.write("UpdateSSOAccount", req).await
    }

    /// Removes an SSO account.
    pub async fn delete_sso_account(&self, instance_id: &str, user_id: &str) -> Result<()> {
        let req = SsoAccountIdRequest { instance_id, user_id };
        self.write("DeleteSSOAccount", &req).await
    }
}
