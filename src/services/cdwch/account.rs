//! `tencentcloud_clickhouse_account`: a ClickHouse system user.

use super::model::{CkUserAlterInfo, API_TYPE_ADD_SYSTEM_USER, API_TYPE_UPDATE_SYSTEM_USER};
use super::service::CdwchService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::helper::{build_id, non_empty, parse_id};
use crate::resource::Resource;
use crate::schema::{Attribute, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;

/// `tencentcloud_clickhouse_account`: a system user, id `instanceId#userName`.
pub struct ClickhouseAccount;

impl ClickhouseAccount {
    fn user_info(d: &ResourceData, instance_id: &str, user_name: &str) -> CkUserAlterInfo {
        CkUserAlterInfo {
            instance_id: instance_id.to_string(),
            user_name: user_name.to_string(),
            pass_word: d.get_str("password").unwrap_or_default().to_string(),
            describe: non_empty(d.get_str("describe").map(str::to_string)),
        }
    }
}

#[async_trait]
impl Resource for ClickhouseAccount {
    fn name(&self) -> &'static str {
        "tencentcloud_clickhouse_account"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute(
                "instance_id",
                Attribute::required_string().with_description("Instance id."),
            )
            .with_attribute(
                "user_name",
                Attribute::required_string().with_description("User name."),
            )
            .with_attribute(
                "password",
                Attribute::required_string()
                    .sensitive()
                    .with_description("Password."),
            )
            .with_attribute(
                "describe",
                Attribute::optional_string().with_description("Description of the user."),
            )
    }

    fn immutable_args(&self) -> &'static [&'static str] {
        &["instance_id", "user_name"]
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        let user_name = d.require_str("user_name")?.to_string();

        let info = Self::user_info(d, &instance_id, &user_name);
        CdwchService::new(client)
            .alter_ck_user(API_TYPE_ADD_SYSTEM_USER, &info)
            .await?;

        d.set_id(build_id(&[&instance_id, &user_name]));
        self.read(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        let (instance_id, user_name) = (parts[0], parts[1]);

        let account = CdwchService::new(client)
            .describe_account(instance_id, user_name)
            .await?;
        let Some(account) = account else {
            d.set_id("");
            return Ok(());
        };

        d.set("instance_id", instance_id);
        d.set("user_name", account.user_name);
        d.set("describe", account.describe);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;

        if d.has_changes(&["password", "describe"]) {
            let info = Self::user_info(d, parts[0], parts[1]);
            CdwchService::new(client)
                .alter_ck_user(API_TYPE_UPDATE_SYSTEM_USER, &info)
                .await?;
        }
        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        CdwchService::new(client)
            .delete_account(parts[0], parts[1])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_info_drops_empty_describe() {
        let d = ResourceData::new(json!({
            "instance_id": "cdwch-1",
            "user_name": "reader",
            "password": "s3cret!",
            "describe": ""
        }));
        let info = ClickhouseAccount::user_info(&d, "cdwch-1", "reader");
        assert_eq!(info.pass_word, "s3cret!");
        assert!(info.describe.is_none());
    }

    #[test]
    fn test_password_is_sensitive() {
        let schema = ClickhouseAccount.schema();
        assert!(schema.block.attributes["password"].flags.sensitive);
    }
}
