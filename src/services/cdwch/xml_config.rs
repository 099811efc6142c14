//! `tencentcloud_clickhouse_xml_config`: content of one XML config file of an
//! instance. Files always exist, so create adopts the file and writes the
//! configured content, and delete only forgets it.

use super::model::{ConfigSubmitContext, ModifyClusterConfigsRequest};
use super::service::CdwchService;
use crate::connectivity::TencentCloudClient;
use crate::error::{ProviderError, Result};
use crate::helper::{build_id, non_empty, parse_id};
use crate::resource::Resource;
use crate::schema::{Attribute, Block, NestedBlock, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfContext {
    file_name: String,
    new_conf_value: String,
    file_path: Option<String>,
}

fn conf_context(d: &ResourceData) -> Result<ConfContext> {
    d.decode_key::<Vec<ConfContext>>("modify_conf_context")?
        .into_iter()
        .next()
        .filter(|c| !c.file_name.is_empty())
        .ok_or_else(|| ProviderError::Validation("argument `modify_conf_context` is required".to_string()))
}

/// `tencentcloud_clickhouse_xml_config`: content of an existing XML file. Delete only forgets it.
pub struct ClickhouseXmlConfig;

impl ClickhouseXmlConfig {
    async fn apply(&self, client: &TencentCloudClient, instance_id: &str, ctx: ConfContext) -> Result<()> {
        let service = CdwchService::new(client);
        let current = service
            .describe_cluster_configs(instance_id)
            .await?
            .into_iter()
            .find(|c| c.file_name == ctx.file_name)
            .ok_or_else(|| {
                ProviderError::NotFound(format!(
                    "config file {} not found on instance {}",
                    ctx.file_name, instance_id
                ))
            })?;

        let req = ModifyClusterConfigsRequest {
            instance_id: instance_id.to_string(),
            modify_conf_context: vec![ConfigSubmitContext {
                file_name: ctx.file_name,
                new_conf_value: ctx.new_conf_value,
                old_conf_value: Some(current.ori_param),
                file_path: non_empty(ctx.file_path).or_else(|| non_empty(Some(current.file_path))),
            }],
        };
        service.modify_cluster_configs(&req).await?;
        service.wait_instance_serving(instance_id).await
    }
}

#[async_trait]
impl Resource for ClickhouseXmlConfig {
    fn name(&self) -> &'static str {
        "tencentcloud_clickhouse_xml_config"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute(
                "instance_id",
                Attribute::required_string().with_description("Instance id."),
            )
            .with_block(
                "modify_conf_context",
                NestedBlock::single(
                    Block::new()
                        .with_attribute(
                            "file_name",
                            Attribute::required_string().with_description("Configuration file name."),
                        )
                        .with_attribute(
                            "new_conf_value",
                            Attribute::required_string()
                                .with_description("New content of the configuration file, base64 encoded."),
                        )
                        .with_attribute(
                            "file_path",
                            Attribute::optional_computed_string().with_description("Path of the configuration file."),
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
        let ctx = conf_context(d)?;
        let file_name = ctx.file_name.clone();

        self.apply(client, &instance_id, ctx).await?;
        d.set_id(build_id(&[&instance_id, &file_name]));
        self.read(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;
        let (instance_id, file_name) = (parts[0], parts[1]);

        let configs = CdwchService::new(client)
            .describe_cluster_configs(instance_id)
            .await?;
        let Some(config) = configs.into_iter().find(|c| c.file_name == file_name) else {
            d.set_id("");
            return Ok(());
        };

        d.set("instance_id", instance_id);
        let ctx = vec![ConfContext {
            file_name: config.file_name,
            new_conf_value: config.ori_param,
            file_path: non_empty(Some(config.file_path)),
        }];
        d.set("modify_conf_context", serde_json::to_value(ctx)?);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let id = d.id().to_string();
        let parts = parse_id(&id, 2)?;

        if d.has_change("modify_conf_context") {
            let ctx = conf_context(d)?;
            if ctx.file_name != parts[1] {
                return Err(ProviderError::Validation(
                    "argument `modify_conf_context.file_name` cannot be changed".to_string(),
                ));
            }
            self.apply(client, parts[0], ctx).await?;
        }
        self.read(client, d).await
    }

    async fn delete(&self, _client: &TencentCloudClient, _d: &mut ResourceData) -> Result<()> {
        Ok(())
    }
}
