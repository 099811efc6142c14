//! Read-only ClickHouse queries: backup jobs, backup-able tables and
//! instances.

use super::backup_strategy::{back_up_table_block, BackUpTable};
use super::model::{DescribeInstancesNewRequest, SearchTags};
use super::service::CdwchService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::helper::{data_resource_ids_hash, non_empty};
use crate::resource::DataSource;
use crate::schema::{Attribute, AttributeFlags, AttributeType, Block, NestedBlock, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

fn computed_list(block: Block) -> NestedBlock {
    NestedBlock::list(block).with_computed()
}

#[derive(Debug, Serialize)]
struct BackUpJob {
    job_id: i64,
    snapshot: String,
    back_up_size: i64,
    back_up_time: String,
    expire_time: String,
    job_status: String,
}

/// `tencentcloud_clickhouse_backup_jobs`
pub struct ClickhouseBackupJobs;

#[async_trait]
impl DataSource for ClickhouseBackupJobs {
    fn name(&self) -> &'static str {
        "tencentcloud_clickhouse_backup_jobs"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute("instance_id", Attribute::required_string().with_description("Instance id."))
            .with_attribute(
                "begin_time",
                Attribute::optional_string().with_description("Begin time, `YYYY-MM-DD HH:mm:ss`."),
            )
            .with_attribute(
                "end_time",
                Attribute::optional_string().with_description("End time, `YYYY-MM-DD HH:mm:ss`."),
            )
            .with_block(
                "back_up_jobs",
                computed_list(
                    Block::new()
                        .with_attribute("job_id", Attribute::computed_int64())
                        .with_attribute("snapshot", Attribute::computed_string())
                        .with_attribute("back_up_size", Attribute::computed_int64())
                        .with_attribute("back_up_time", Attribute::computed_string())
                        .with_attribute("expire_time", Attribute::computed_string())
                        .with_attribute("job_status", Attribute::computed_string()),
                ),
            )
            .with_attribute("result_output_file", Attribute::result_output_file())
    }

    fn result_key(&self) -> &'static str {
        "back_up_jobs"
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        let begin_time = d.get_str("begin_time").map(str::to_string);
        let end_time = d.get_str("end_time").map(str::to_string);

        let jobs: Vec<BackUpJob> = CdwchService::new(client)
            .describe_back_up_jobs(&instance_id, begin_time, end_time)
            .await?
            .into_iter()
            .map(|j| BackUpJob {
                job_id: j.job_id,
                snapshot: j.snapshot,
                back_up_size: j.back_up_size,
                back_up_time: j.back_up_time,
                expire_time: j.expire_time,
                job_status: j.job_status,
            })
            .collect();

        let mut ids = vec![instance_id];
        ids.extend(jobs.iter().map(|j| j.job_id.to_string()));
        d.set_id(data_resource_ids_hash(&ids));
        d.set("back_up_jobs", serde_json::to_value(jobs)?);
        Ok(())
    }
}

/// `tencentcloud_clickhouse_backup_tables`
pub struct ClickhouseBackupTables;

#[async_trait]
impl DataSource for ClickhouseBackupTables {
    fn name(&self) -> &'static str {
        "tencentcloud_clickhouse_backup_tables"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute("instance_id", Attribute::required_string().with_description("Instance id."))
            .with_block("available_tables", computed_list(back_up_table_block()))
            .with_attribute("result_output_file", Attribute::result_output_file())
    }

    fn result_key(&self) -> &'static str {
        "available_tables"
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        let tables: Vec<BackUpTable> = CdwchService::new(client)
            .describe_back_up_tables(&instance_id)
            .await?
            .into_iter()
            .map(BackUpTable::from)
            .collect();

        d.set_id(instance_id);
        d.set("available_tables", serde_json::to_value(tables)?);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct Instance {
    instance_id: String,
    instance_name: String,
    status: String,
    status_desc: String,
    version: String,
    region: String,
    zone: String,
    vpc_id: String,
    subnet_id: String,
    pay_mode: String,
    create_time: String,
    expire_time: String,
    access_info: String,
    eip: String,
    ha: String,
}

/// `tencentcloud_clickhouse_instances`
pub struct ClickhouseInstances;

#[async_trait]
impl DataSource for ClickhouseInstances {
    fn name(&self) -> &'static str {
        "tencentcloud_clickhouse_instances"
    }

    fn schema(&self) -> Schema {
        let mut instance = Block::new();
        for field in [
            "instance_id",
            "instance_name",
            "status",
            "status_desc",
            "version",
            "region",
            "zone",
            "vpc_id",
            "subnet_id",
            "pay_mode",
            "create_time",
            "expire_time",
            "access_info",
            "eip",
            "ha",
        ] {
            instance = instance.with_attribute(field, Attribute::computed_string());
        }

        Schema::v0()
            .with_attribute(
                "instance_id",
                Attribute::optional_string().with_description("Search by instance id, exact match."),
            )
            .with_attribute(
                "instance_name",
                Attribute::optional_string().with_description("Search by instance name, fuzzy match."),
            )
            .with_attribute(
                "tags",
                Attribute::string_map(AttributeFlags::optional())
                    .with_description("Tag filter; every tag must match."),
            )
            .with_attribute(
                "vips",
                Attribute::list(AttributeType::String, AttributeFlags::optional())
                    .with_description("VIP addresses to filter by."),
            )
            .with_attribute(
                "is_simple",
                Attribute::optional_bool().with_description("Return simplified information."),
            )
            .with_block("instance_list", computed_list(instance))
            .with_attribute("result_output_file", Attribute::result_output_file())
    }

    fn result_key(&self) -> &'static str {
        "instance_list"
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let tags: BTreeMap<String, String> = d.decode_key("tags")?;
        let filter = DescribeInstancesNewRequest {
            search_instance_id: non_empty(d.get_str("instance_id").map(str::to_string)),
            search_instance_name: non_empty(d.get_str("instance_name").map(str::to_string)),
            search_tags: tags
                .into_iter()
                .map(|(tag_key, tag_value)| SearchTags {
                    tag_key,
                    tag_value,
                    all_value: 0,
                })
                .collect(),
            vips: d.get_string_list("vips"),
            is_simple: d.get_bool("is_simple"),
            ..Default::default()
        };

        let instances: Vec<Instance> = CdwchService::new(client)
            .describe_instances(filter)
            .await?
            .into_iter()
            .map(|i| Instance {
                instance_id: i.instance_id,
                instance_name: i.instance_name,
                status: i.status,
                status_desc: i.status_desc,
                version: i.version,
                region: i.region,
                zone: i.zone,
                vpc_id: i.vpc_id,
                subnet_id: i.subnet_id,
                pay_mode: i.pay_mode,
                create_time: i.create_time,
                expire_time: i.expire_time,
                access_info: i.access_info,
                eip: i.eip,
                ha: i.ha,
            })
            .collect();

        let ids: Vec<&str> = instances.iter().map(|i| i.instance_id.as_str()).collect();
        d.set_id(data_resource_ids_hash(&ids));
        d.set("instance_list", serde_json::to_value(instances)?);
        Ok(())
    }
}
