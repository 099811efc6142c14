//! Cloud Monitor alarm calls. Every write retries `InternalError` on top of
//! the default retryable codes.

use super::model::*;
use crate::connectivity::{TencentCloudClient, MONITOR};
use crate::error::Result;
use crate::retry::INTERNAL_ERROR;
use serde::Serialize;
use serde_json::Value;

/// Page size of `DescribeAlarmHistories`.
pub const HISTORY_PAGE_SIZE: i64 = 20;

/// Page size of `DescribeAlarmPolicies`.
pub const POLICY_PAGE_SIZE: i64 = 20;

/// Page size of `DescribeConditionsTemplateList`.
pub const TEMPLATE_PAGE_SIZE: i64 = 20;

/// Alarm policy and notice calls over a shared client.
pub struct MonitorService<'a> {
    client: &'a TencentCloudClient,
}

impl<'a> MonitorService<'a> {
    /// Wraps `client`.
    pub fn new(client: &'a TencentCloudClient) -> Self {
        Self { client }
    }

    async fn write<Req: Serialize + ?Sized>(&self, action: &str, req: &Req) -> Result<()> {
        let _: Value = self
            .client
            .write_call(MONITOR, action, req, &[INTERNAL_ERROR])
            .await?;
        Ok(())
    }

    /// Creates a policy.
    pub async fn create_alarm_policy(&self, req: &CreateAlarmPolicyRequest) -> Result<CreateAlarmPolicyResponse> {
        self.client
            .write_call(MONITOR, "CreateAlarmPolicy", req, &[INTERNAL_ERROR])
            .await
    }

    /// The policy, `None` when it does not exist.
    pub async fn describe_alarm_policy(&self, policy_id: &str) -> Result<Option<AlarmPolicy>> {
        let req = PolicyIdRequest {
            module: MODULE,
            policy_id,
        };
        let resp: Result<DescribeAlarmPolicyResponse> = self
            .client
            .write_call(MONITOR, "DescribeAlarmPolicy", &req, &[INTERNAL_ERROR])
            .await;
        match resp {
            Ok(resp) => Ok(resp.policy),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Binds one tag to the policy.
    pub async fn binding_policy_tag(
        &self,
        policy_id: &str,
        group_id: &str,
        service_type: &str,
        tag: &PolicyTag,
    ) -> Result<()> {
        let req = BindingPolicyTagRequest {
            module: MODULE,
            policy_id,
            group_id,
            service_type,
            tag,
        };
        self.write("BindingPolicyTag", &req).await
    }

    /// Sets one of `NAME` or `REMARK`.
    pub async fn modify_alarm_policy_info(&self, policy_id: &str, key: &str, value: &str) -> Result<()> {
        let req = ModifyAlarmPolicyInfoRequest {
            module: MODULE,
            policy_id,
            key,
            value,
        };
        self.write("ModifyAlarmPolicyInfo", &req).await
    }

    /// Enable with 1, disable with 0.
    pub async fn modify_alarm_policy_status(&self, policy_id: &str, enable: i64) -> Result<()> {
        let req = ModifyAlarmPolicyStatusRequest {
            module: MODULE,
            policy_id,
            enable,
        };
        self.write("ModifyAlarmPolicyStatus", &req).await
    }

    /// Replaces the metric and event conditions.
    pub async fn modify_alarm_policy_condition(
        &self,
        policy_id: &str,
        condition: Option<AlarmPolicyCondition>,
        event_condition: Option<AlarmPolicyEventCondition>,
    ) -> Result<()> {
        let req = ModifyAlarmPolicyConditionRequest {
            module: MODULE,
            policy_id,
            condition,
            event_condition,
        };
        self.write("ModifyAlarmPolicyCondition", &req).await
    }

    /// Replaces the bound notice templates.
    pub async fn modify_alarm_policy_notice(&self, policy_id: &str, notice_ids: &[String]) -> Result<()> {
        let req = ModifyAlarmPolicyNoticeRequest {
            module: MODULE,
            policy_id,
            notice_ids,
        };
        self.write("ModifyAlarmPolicyNotice", &req).await
    }

    /// Replaces the trigger tasks.
    pub async fn modify_alarm_policy_tasks(
        &self,
        policy_id: &str,
        trigger_tasks: &[AlarmPolicyTriggerTask],
    ) -> Result<()> {
        let req = ModifyAlarmPolicyTasksRequest {
            module: MODULE,
            policy_id,
            trigger_tasks,
        };
        self.write("ModifyAlarmPolicyTasks", &req).await
    }

    /// Deletes one policy.
    pub async fn delete_alarm_policy(&self, policy_id: &str) -> Result<()> {
        let req = DeleteAlarmPolicyRequest {
            module: MODULE,
            policy_ids: vec![policy_id],
        };
        self.write("DeleteAlarmPolicy", &req).await
    }

    /// Creates a notice template and returns its id.
    pub async fn create_alarm_notice(&self, req: &AlarmNoticeRequest) -> Result<String> {
        let resp: CreateAlarmNoticeResponse = self
            .client
            .write_call(MONITOR, "CreateAlarmNotice", req, &[INTERNAL_ERROR])
            .await?;
        Ok(resp.notice_id)
    }

    /// The notice template, `None` when it does not exist.
    pub async fn describe_alarm_notice(&self, notice_id: &str) -> Result<Option<AlarmNotice>> {
        let req = DescribeAlarmNoticesRequest {
            module: MODULE,
            page_number: 1,
            page_size: 200,
            order: "ASC",
            notice_ids: vec![notice_id],
        };
        let resp: DescribeAlarmNoticesResponse = self
            .client
            .read_call(MONITOR, "DescribeAlarmNotices", &req)
            .await?;
        Ok(resp.notices.into_iter().find(|n| n.id == notice_id))
    }

    /// Replaces a notice template.
    pub async fn modify_alarm_notice(&self, req: &AlarmNoticeRequest) -> Result<()> {
        self.write("ModifyAlarmNotice", req).await
    }

    /// Deletes one notice template.
    pub async fn delete_alarm_notice(&self, notice_id: &str) -> Result<()> {
        let req = DeleteAlarmNoticesRequest {
            module: MODULE,
            notice_ids: vec![notice_id],
        };
        self.write("DeleteAlarmNotices", &req).await
    }

    /// Alarm records matching `filter`, across pages.
    pub async fn describe_alarm_histories(&self, mut filter: DescribeAlarmHistoriesRequest) -> Result<Vec<AlarmHistory>> {
        if filter.module.is_empty() {
            filter.module = MODULE.to_string();
        }
        filter.page_number = 1;
        filter.page_size = HISTORY_PAGE_SIZE;
        let mut histories = Vec::new();
        loop {
            let resp: DescribeAlarmHistoriesResponse = self
                .client
                .read_call(MONITOR, "DescribeAlarmHistories", &filter)
                .await?;
            let n = resp.histories.len() as i64;
            histories.extend(resp.histories);
            if n < HISTORY_PAGE_SIZE {
                break;
            }
            filter.page_number += 1;
        }
        Ok(histories)
    }

    /// Policies matching `filter`, across pages.
    pub async fn describe_alarm_policies(
        &self,
        mut filter: DescribeAlarmPoliciesRequest,
    ) -> Result<Vec<AlarmPolicySummary>> {
        if filter.module.is_empty() {
            filter.module = MODULE.to_string();
        }
        filter.page_number = 1;
        filter.page_size = POLICY_PAGE_SIZE;
        let mut policies = Vec::new();
        loop {
            let resp: DescribeAlarmPoliciesResponse = self
                .client
                .read_call(MONITOR, "DescribeAlarmPolicies", &filter)
                .await?;
            let n = resp.policies.len() as i64;
            policies.extend(resp.policies);
            if n < POLICY_PAGE_SIZE {
                break;
            }
            filter.page_number += 1;
        }
        Ok(policies)
    }

    /// Trigger condition templates matching `filter`, across pages.
    pub async fn describe_conditions_templates(
        &self,
        mut filter: DescribeConditionsTemplateListRequest,
    ) -> Result<Vec<TemplateGroup>> {
        if filter.module.is_empty() {
            filter.module = MODULE.to_string();
        }
        filter.offset = 0;
        filter.limit = TEMPLATE_PAGE_SIZE;
        let mut groups = Vec::new();
        loop {
            let resp: DescribeConditionsTemplateListResponse = self
                .client
                .read_call(MONITOR, "DescribeConditionsTemplateList", &filter)
                .await?;
            let n = resp.template_group_list.len() as i64;
            groups.extend(resp.template_group_list);
            if n < TEMPLATE_PAGE_SIZE {
                break;
            }
            filter.offset += TEMPLATE_PAGE_SIZE;
        }
        Ok(groups)
    }
}
