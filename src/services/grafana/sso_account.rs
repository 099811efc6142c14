//! `tencentcloud_monitor_grafana_sso_account`: a Tencent Cloud sub-account
//! allowed into a Grafana instance, with per-organization roles.

use super::model::{GrafanaAccountRole, SsoAccountRequest};
use super::service::GrafanaService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::helper::{build_id, non_empty, null_default, parse_id};
use crate::resource::Resource;
use crate::schema::{Attribute, Block, NestedBlock, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct RoleState {
    #[serde(deserialize_with = "null_default")]
    organization: String,
    #[serde(deserialize_with = "null_default")]
    role: String,
}

fn roles(d: &ResourceData) -> Result<Vec<GrafanaAccountRole>> {
    let roles: Vec<RoleState> = d.decode_key("role")?;
    Ok(roles
        .into_iter()
        .map(|r| GrafanaAccountRole {
            organization: r.organization,
            role: r.role,
        })
        .collect())
}

/// `tencentcloud_monitor_grafana_sso_account`, id `instanceId#userId`.
pub struct GrafanaSsoAccount;

impl GrafanaSsoAccount {
    fn request<'a>(d: &ResourceData, instance_id: &'a str, user_id: &'a str) -> Result<SsoAccountRequest<'a>> {
        Ok(SsoAccountRequest {
            instance_id,
            user_id,
            role: roles(d)?,
            notes: non_empty(d.get_str("notes").map(str::to_string)),
        })
    }
}

#[async_trait]
impl Resource for GrafanaSsoAccount {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_grafana_sso_account"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute("instance_id", Attribute::required_string().with_description("Grafana instance id."))
            .with_attribute("user_id", Attribute::required_string().with_description("Sub-account uin."))
            .with_attribute("notes", Attribute::optional_computed_string())
            .with_block(
                "role",
                NestedBlock::list(
                    Block::new()
                        .with_attribute("organization", Attribute::required_string().with_description("Grafana organization id."))
                        .with_attribute(
                            "role",
                            Attribute::required_string()
                                .with_allowed_strings(&["Admin", "Editor", "Viewer"])
                                .with_description("Role in the organization."),
                        ),
                )
                .with_computed(),
            )
    }

    fn immutable_args(&self) -> &'static [&'static str] {
        &["instance_id", "user_id"]
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        let user_id = d.require_str("user_id")?.to_string();

        let service = GrafanaService::new(client);
        let req = Self::request(d, &instance_id, &user_id)?;
        service.create_sso_account(&req).await?;
        service.wait_instance_running(&instance_id).await?;

        d.set_id(build_id(&[&instance_id, &user_id]));
        self.read(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        let (instance_id, user_id) = (parts[0], parts[1]);

        let account = GrafanaService::new(client)
            .describe_sso_account(instance_id, user_id)
            .await?;
        let Some(account) = account else {
            d.set_id("");
            return Ok(());
        };

        d.set("instance_id", instance_id);
        d.set("user_id", account.user_id);
        d.set("notes", account.notes);
        let roles: Vec<RoleState> = account
            .role
            .into_iter()
            .map(|r| RoleState {
                organization: r.organization,
                role: r.role,
            })
            .collect();
        d.set("role", serde_json::to_value(roles)?);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        if d.has_changes(&["notes", "role"]) {
            let service = GrafanaService::new(client);
            let req = Self::request(d, parts[0], parts[1])?;
            service.update_sso_account(&req).await?;
            service.wait_instance_running(parts[0]).await?;
        }
        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        let service = GrafanaService::new(client);
        service.delete_sso_account(parts[0], parts[1]).await?;
        service.wait_instance_running(parts[0]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_request() {
        let d = ResourceData::new(json!({
            "instance_id": "grafana-1",
            "user_id": "100001",
            "notes": "",
            "role": [{"organization": "1", "role": "Viewer"}]
        }));
        let req = GrafanaSsoAccount::request(&d, "grafana-1", "100001").unwrap();
        assert!(req.notes.is_none());
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "InstanceId": "grafana-1",
                "UserId": "100001",
                "Role": [{"Organization": "1", "Role": "Viewer"}]
            })
        );
    }
}
