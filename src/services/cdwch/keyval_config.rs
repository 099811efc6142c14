//! `tencentcloud_clickhouse_keyval_config`: one key/value setting of an
//! instance. Every change restarts the instance, so writes wait for it to
//! be `Serving` again.

use super::model::{InstanceConfigItem, ModifyInstanceKeyValConfigsRequest};
use super::service::CdwchService;
use crate::connectivity::TencentCloudClient;
use crate::error::{ProviderError, Result};
use crate::helper::{build_id, parse_id};
use crate::resource::Resource;
use crate::schema::{Attribute, Block, NestedBlock, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct Item {
    conf_key: String,
    conf_value: String,
}

impl From<Item> for InstanceConfigItem {
    fn from(item: Item) -> Self {
        Self {
            conf_key: item.conf_key,
            conf_value: item.conf_value,
        }
    }
}

fn item(d: &ResourceData) -> Result<Item> {
    d.decode_key::<Vec<Item>>("items")?
        .into_iter()
        .next()
        .filter(|i| !i.conf_key.is_empty())
        .ok_or_else(|| ProviderError::Validation("argument `items` is required".to_string()))
}

/// `tencentcloud_clickhouse_keyval_config`: one key/value setting, id `instanceId#confKey`.
pub struct ClickhouseKeyvalConfig;

impl ClickhouseKeyvalConfig {
    async fn modify(
        &self,
        client: &TencentCloudClient,
        req: ModifyInstanceKeyValConfigsRequest,
    ) -> Result<()> {
        let service = CdwchService::new(client);
        service.modify_keyval_configs(&req).await?;
        service.wait_instance_serving(&req.instance_id).await?;
        info!(instance_id = %req.instance_id, "key/value config applied");
        Ok(())
    }
}

#[async_trait]
impl Resource for ClickhouseKeyvalConfig {
    fn name(&self) -> &'static str {
        "tencentcloud_clickhouse_keyval_config"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute(
                "instance_id",
                Attribute::required_string().with_description("Instance id."),
            )
            .with_block(
                "items",
                NestedBlock::single(
                    Block::new()
                        .with_attribute(
                            "conf_key",
                            Attribute::required_string().with_description("Config key."),
                        )
                        .with_attribute(
                            "conf_value",
                            Attribute::required_string().with_description("Config value."),
                        ),
                )
                .with_min_items(1),
            )
    }

    fn immutable_args(&self) -> &'static [&'static str] {
        &["instance_id"]
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        let item = item(d)?;
        let conf_key = item.conf_key.clone();

        self.modify(
            client,
            ModifyInstanceKeyValConfigsRequest {
                instance_id: instance_id.clone(),
                add_items: vec![item.into()],
                ..Default::default()
            },
        )
        .await?;

        d.set_id(build_id(&[&instance_id, &conf_key]));
        self.read(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        let (instance_id, conf_key) = (parts[0], parts[1]);

        let configs = CdwchService::new(client)
            .describe_keyval_configs(instance_id)
            .await?;
        let Some(config) = configs.into_iter().find(|c| c.conf_key == conf_key) else {
            d.set_id("");
            return Ok(());
        };

        d.set("instance_id", instance_id);
        let items = vec![Item {
            conf_key: config.conf_key,
            conf_value: config.conf_value,
        }];
        d.set("items", serde_json::to_value(items)?);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;

        if d.has_change("items") {
            let item = item(d)?;
            if item.conf_key != parts[1] {
                return Err(ProviderError::Validation(
                    "argument `items.conf_key` cannot be changed".to_string(),
                ));
            }
            self.modify(
                client,
                ModifyInstanceKeyValConfigsRequest {
                    instance_id: parts[0].to_string(),
                    update_items: vec![item.into()],
                    ..Default::default()
                },
            )
            .await?;
        }
        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        let conf_value = d
            .decode_key::<Vec<Item>>("items")?
            .into_iter()
            .next()
            .map(|i| i.conf_value)
            .unwrap_or_default();

        self.modify(
            client,
            ModifyInstanceKeyValConfigsRequest {
                instance_id: parts[0].to_string(),
                del_items: vec![InstanceConfigItem {
                    conf_key: parts[1].to_string(),
                    conf_value,
                }],
                ..Default::default()
            },
        )
        .await
    }
}
