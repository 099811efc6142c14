//! Thin wrapper over the `cdwch` API calls used by the ClickHouse resources.

use super::model::*;
use crate::connectivity::{TencentCloudClient, CDWCH};
use crate::error::{ApiError, Result, CLIENT_PARSE_ERROR};
use crate::waiter::StateChangeConf;
use serde_json::Value;
use tracing::info;

/// Page size of the paged describe calls.
pub const PAGE_SIZE: i64 = 20;

/// ClickHouse API calls over a shared client.
pub struct CdwchService<'a> {
    client: &'a TencentCloudClient,
}

impl<'a> CdwchService<'a> {
    /// Wraps `client`.
    pub fn new(client: &'a TencentCloudClient) -> Self {
        Self { client }
    }

    /// Current `InstanceState`, `None` when the API reports none.
    pub async fn describe_instance_state(&self, instance_id: &str) -> Result<Option<String>> {
        let resp: DescribeInstanceStateResponse = self
            .client
            .read_call(CDWCH, "DescribeInstanceState", &InstanceIdRequest { instance_id })
            .await?;
        Ok(resp.instance_state.filter(|s| !s.is_empty()))
    }

    /// Block until the instance is `Serving` again after a change.
    pub async fn wait_instance_serving(&self, instance_id: &str) -> Result<()> {
        let retry = self.client.retry_config();
        let conf = StateChangeConf::new(
            INSTANCE_STATE_PENDING,
            &[INSTANCE_STATE_SERVING],
            retry.write_timeout,
            retry.interval,
        )
        .with_fail(INSTANCE_STATE_FAILED)
        .with_delay(retry.interval);
        conf.wait_for_state(move || async move {
            Ok(self
                .describe_instance_state(instance_id)
                .await?
                .map(|state| ((), state)))
        })
        .await
    }

    /// Backup switch, schedules and table selection of an instance.
    pub async fn describe_back_up_schedule(&self, instance_id: &str) -> Result<DescribeBackUpScheduleResponse> {
        self.client
            .read_call(CDWCH, "DescribeBackUpSchedule", &InstanceIdRequest { instance_id })
            .await
    }

    /// Open or close backups; `cos_bucket_name` is needed when opening.
    pub async fn open_back_up(
        &self,
        instance_id: &str,
        operation_type: &str,
        cos_bucket_name: Option<&str>,
    ) -> Result<()> {
        let req = OpenBackUpRequest {
            instance_id,
            operation_type,
            cos_bucket_name,
        };
        let _: Value = self.client.write_call(CDWCH, "OpenBackUp", &req, &[]).await?;
        info!(instance_id, operation_type, "backup switched");
        Ok(())
    }

    /// Create, update or delete a schedule, depending on `req.operation_type`.
    pub async fn create_back_up_schedule(&self, req: &CreateBackUpScheduleRequest) -> Result<()> {
        let _: Value = self
            .client
            .write_call(CDWCH, "CreateBackUpSchedule", req, &[])
            .await?;
        Ok(())
    }

    /// All backup jobs in the time window, across pages.
    pub async fn describe_back_up_jobs(
        &self,
        instance_id: &str,
        begin_time: Option<String>,
        end_time: Option<String>,
    ) -> Result<Vec<BackUpJobDisplay>> {
        let mut req = DescribeBackUpJobRequest {
            instance_id: instance_id.to_string(),
            page_size: PAGE_SIZE,
            page_num: 1,
            begin_time,
            end_time,
        };
        let mut jobs = Vec::new();
        loop {
            let resp: DescribeBackUpJobResponse =
                self.client.read_call(CDWCH, "DescribeBackUpJob", &req).await?;
            let n = resp.back_up_jobs.len() as i64;
            jobs.extend(resp.back_up_jobs);
            if n < PAGE_SIZE {
                break;
            }
            req.page_num += 1;
        }
        Ok(jobs)
    }

    /// Tables that can be selected for backup.
    pub async fn describe_back_up_tables(&self, instance_id: &str) -> Result<Vec<BackupTableContent>> {
        let resp: DescribeBackUpTablesResponse = self
            .client
            .read_call(CDWCH, "DescribeBackUpTables", &InstanceIdRequest { instance_id })
            .await?;
        Ok(resp.available_tables)
    }

    /// The system user `user_name`, `None` when it does not exist.
    pub async fn describe_account(&self, instance_id: &str, user_name: &str) -> Result<Option<AccountInfo>> {
        let req = DescribeCkSqlApisRequest {
            instance_id,
            api_type: API_TYPE_GET_SYSTEM_USERS,
            user_name: Some(user_name),
            cluster: None,
        };
        let resp: DescribeCkSqlApisResponse = self.client.read_call(CDWCH, "DescribeCkSqlApis", &req).await?;
        let data = resp.return_data.ok_or_else(|| {
            ApiError::client(CLIENT_PARSE_ERROR, "DescribeCkSqlApis response is null")
        })?;
        let accounts: Vec<AccountInfo> = if data.trim().is_empty() || data.trim() == "null" {
            Vec::new()
        } else {
            serde_json::from_str(&data)?
        };
        Ok(accounts.into_iter().find(|a| a.user_name == user_name))
    }

    /// Add or update a system user, depending on `api_type`.
    pub async fn alter_ck_user(&self, api_type: &str, user_info: &CkUserAlterInfo) -> Result<()> {
        let req = ActionAlterCkUserRequest { user_info, api_type };
        let _: Value = self.client.write_call(CDWCH, "ActionAlterCkUser", &req, &[]).await?;
        Ok(())
    }

    /// Drops the system user `user_name`.
    pub async fn delete_account(&self, instance_id: &str, user_name: &str) -> Result<()> {
        let req = DescribeCkSqlApisRequest {
            instance_id,
            api_type: API_TYPE_DELETE_SYSTEM_USER,
            user_name: Some(user_name),
            cluster: None,
        };
        let _: Value = self.client.write_call(CDWCH, "DescribeCkSqlApis", &req, &[]).await?;
        Ok(())
    }

    /// Key/value settings of the instance.
    pub async fn describe_keyval_configs(&self, instance_id: &str) -> Result<Vec<InstanceConfigInfo>> {
        let resp: DescribeInstanceKeyValConfigsResponse = self
            .client
            .read_call(CDWCH, "DescribeInstanceKeyValConfigs", &InstanceIdRequest { instance_id })
            .await?;
        Ok(resp.config_items)
    }

    /// Add, update or delete key/value settings.
    pub async fn modify_keyval_configs(&self, req: &ModifyInstanceKeyValConfigsRequest) -> Result<()> {
        let _: Value = self
            .client
            .write_call(CDWCH, "ModifyInstanceKeyValConfigs", req, &[])
            .await?;
        Ok(())
    }

    /// XML configuration files of the instance.
    pub async fn describe_cluster_configs(&self, instance_id: &str) -> Result<Vec<ClusterConfigsInfo>> {
        let resp: DescribeClusterConfigsResponse = self
            .client
            .read_call(CDWCH, "DescribeClusterConfigs", &InstanceIdRequest { instance_id })
            .await?;
        Ok(resp.cluster_conf_list)
    }

    /// Replace the content of one XML configuration file.
    pub async fn modify_cluster_configs(&self, req: &ModifyClusterConfigsRequest) -> Result<()> {
        let _: Value = self
            .client
            .write_call(CDWCH, "ModifyClusterConfigs", req, &[])
            .await?;
        Ok(())
    }

    /// Instances matching `filter`, across pages.
    pub async fn describe_instances(&self, mut filter: DescribeInstancesNewRequest) -> Result<Vec<InstanceInfo>> {
        filter.offset = 0;
        filter.limit = PAGE_SIZE;
        let mut instances = Vec::new();
        loop {
            let resp: DescribeInstancesNewResponse =
                self.client.read_call(CDWCH, "DescribeInstancesNew", &filter).await?;
            let n = resp.instances_list.len() as i64;
            instances.extend(resp.instances_list);
            if n < PAGE_SIZE || (resp.total_count > 0 && instances.len() as i64 >= resp.total_count) {
                break;
            }
            filter.offset += PAGE_SIZE;
        }
        Ok(instances)
    }
}
