//! Managed Prometheus (`tmp`) calls.

use super::model::*;
use crate::connectivity::{TencentCloudClient, MONITOR};
use crate::error::Result;
use serde_json::Value;
use tracing::info;

/// Page size of `DescribePrometheusInstances`.
pub const INSTANCE_PAGE_SIZE: i64 = 20;

/// Prometheus alert groups, alert rules and instance listing. These live on
/// the `monitor` API.
pub struct TmpService<'a> {
    client: &'a TencentCloudClient,
}

impl<'a> TmpService<'a> {
    /// Wraps `client`.
    pub fn new(client: &'a TencentCloudClient) -> Self {
        Self { client }
    }

    /// Creates an alert group and returns its id.
    pub async fn create_alert_group(&self, req: &AlertGroupRequest) -> Result<String> {
        let resp: CreateAlertGroupResponse = self
            .client
            .write_call(MONITOR, "CreatePrometheusAlertGroup", req, &[])
            .await?;
        info!(instance_id = %req.instance_id, group_id = %resp.group_id, "alert group created");
        Ok(resp.group_id)
    }

    /// The group, `None` when it does not exist.
    pub async fn describe_alert_group(&self, instance_id: &str, group_id: &str) -> Result<Option<AlertGroup>> {
        let req = DescribeAlertGroupsRequest { instance_id, group_id };
        let resp: DescribeAlertGroupsResponse = self
            .client
            .read_call(MONITOR, "DescribePrometheusAlertGroups", &req)
            .await?;
        Ok(resp.alert_group_set.into_iter().next())
    }

    /// Replaces an alert group.
    pub async fn update_alert_group(&self, req: &AlertGroupRequest) -> Result<()> {
        let _: Value = self
            .client
            .write_call(MONITOR, "UpdatePrometheusAlertGroup", req, &[])
            .await?;
        Ok(())
    }

    /// Deletes one alert group.
    pub async fn delete_alert_group(&self, instance_id: &str, group_id: &str) -> Result<()> {
        let req = DeleteAlertGroupsRequest {
            instance_id,
            group_ids: vec![group_id],
        };
        let _: Value = self
            .client
            .write_call(MONITOR, "DeletePrometheusAlertGroups", &req, &[])
            .await?;
        Ok(())
    }

    /// Creates an alert rule and returns its id.
    pub async fn create_alert_rule(&self, req: &AlertRuleRequest) -> Result<String> {
        let resp: CreateAlertRuleResponse = self
            .client
            .write_call(MONITOR, "CreateAlertRule", req, &[])
            .await?;
        info!(instance_id = %req.instance_id, rule_id = %resp.rule_id, "alert rule created");
        Ok(resp.rule_id)
    }

    /// The rule, `None` when it does not exist.
    pub async fn describe_alert_rule(&self, instance_id: &str, rule_id: &str) -> Result<Option<AlertRule>> {
        let req = DescribeAlertRulesRequest { instance_id, rule_id };
        let resp: DescribeAlertRulesResponse = self
            .client
            .read_call(MONITOR, "DescribeAlertRules", &req)
            .await?;
        Ok(resp.alert_rule_set.into_iter().next())
    }

    /// Replaces an alert rule.
    pub async fn update_alert_rule(&self, req: &AlertRuleRequest) -> Result<()> {
        let _: Value = self
            .client
            .write_call(MONITOR, "UpdateAlertRule", req, &[])
            .await?;
        Ok(())
    }

    /// Deletes one alert rule.
    pub async fn delete_alert_rule(&self, instance_id: &str, rule_id: &str) -> Result<()> {
        let req = DeleteAlertRulesRequest {
            instance_id,
            rule_ids: vec![rule_id],
        };
        let _: Value = self
            .client
            .write_call(MONITOR, "DeleteAlertRules", &req, &[])
            .await?;
        Ok(())
    }

    /// Every instance matching `filter`, across pages.
    pub async fn describe_instances(
        &self,
        mut filter: DescribePrometheusInstancesRequest,
    ) -> Result<Vec<PrometheusInstance>> {
        filter.offset = 0;
        filter.limit = INSTANCE_PAGE_SIZE;
        let mut instances = Vec::new();
        loop {
            let resp: DescribePrometheusInstancesResponse = self
                .client
                .read_call(MONITOR, "DescribePrometheusInstances", &filter)
                .await?;
            let n = resp.instance_set.len() as i64;
            instances.extend(resp.instance_set);
            if n < INSTANCE_PAGE_SIZE {
                break;
            }
            filter.offset += INSTANCE_PAGE_SIZE;
        }
        Ok(instances)
    }
}
