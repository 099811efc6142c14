//! `tencentcloud_clickhouse_backup_strategy`: data and metadata backup
//! schedules of an instance.

use super::model::*;
use super::service::CdwchService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::helper::null_default;
use crate::resource::Resource;
use crate::schema::{Attribute, Block, NestedBlock, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A table covered by the data backup, as held in state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackUpTable {
    /// Database name.
    #[serde(deserialize_with = "null_default")]
    pub database: String,
    /// Table name.
    #[serde(deserialize_with = "null_default")]
    pub table: String,
    /// Size in bytes.
    #[serde(deserialize_with = "null_default")]
    pub total_bytes: i64,
    /// Virtual cluster.
    #[serde(deserialize_with = "null_default")]
    pub v_cluster: String,
    /// Node addresses.
    #[serde(deserialize_with = "null_default")]
    pub ips: String,
    /// ZooKeeper path.
    #[serde(deserialize_with = "null_default")]
    pub zoo_path: String,
    /// Replica address.
    #[serde(deserialize_with = "null_default")]
    pub rip: String,
}

impl From<BackupTableContent> for BackUpTable {
    fn from(t: BackupTableContent) -> Self {
        Self {
            database: t.database,
            table: t.table,
            total_bytes: t.total_bytes,
            v_cluster: t.v_cluster,
            ips: t.ips,
            zoo_path: t.zoo_path,
            rip: t.rip,
        }
    }
}

impl From<BackUpTable> for BackupTableContent {
    fn from(t: BackUpTable) -> Self {
        Self {
            database: t.database,
            table: t.table,
            total_bytes: t.total_bytes,
            v_cluster: t.v_cluster,
            ips: t.ips,
            zoo_path: t.zoo_path,
            rip: t.rip,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Strategy {
    #[serde(deserialize_with = "null_default")]
    week_days: String,
    #[serde(deserialize_with = "null_default")]
    retain_days: i64,
    #[serde(deserialize_with = "null_default")]
    execute_hour: i64,
    #[serde(deserialize_with = "null_default", skip_serializing_if = "Option::is_none")]
    back_up_tables: Option<Vec<BackUpTable>>,
}

impl Strategy {
    fn request(self, instance_id: &str, schedule_type: &str, operation_type: &str) -> CreateBackUpScheduleRequest {
        CreateBackUpScheduleRequest {
            instance_id: instance_id.to_string(),
            schedule_type: schedule_type.to_string(),
            operation_type: operation_type.to_string(),
            schedule_id: None,
            week_days: Some(self.week_days),
            retain_days: Some(self.retain_days),
            execute_hour: Some(self.execute_hour),
            back_up_tables: self
                .back_up_tables
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

fn delete_request(instance_id: &str, schedule_type: &str, schedule_id: i64) -> CreateBackUpScheduleRequest {
    CreateBackUpScheduleRequest {
        instance_id: instance_id.to_string(),
        schedule_type: schedule_type.to_string(),
        operation_type: OPERATION_DELETE.to_string(),
        schedule_id: Some(schedule_id),
        ..Default::default()
    }
}

pub(crate) fn back_up_table_block() -> Block {
    Block::new()
        .with_attribute("database", Attribute::required_string().with_description("Database."))
        .with_attribute("table", Attribute::required_string().with_description("Table."))
        .with_attribute("total_bytes", Attribute::required_int64().with_description("Table total bytes."))
        .with_attribute("v_cluster", Attribute::optional_string().with_description("Virtual cluster."))
        .with_attribute("ips", Attribute::required_string().with_description("Ips."))
        .with_attribute("zoo_path", Attribute::optional_string().with_description("Zk path."))
        .with_attribute("rip", Attribute::optional_string().with_description("Ip address of cvm."))
}

fn schedule_block() -> Block {
    Block::new()
        .with_attribute(
            "week_days",
            Attribute::required_string().with_description("Week days, comma separated, e.g. `1,3,5`."),
        )
        .with_attribute(
            "retain_days",
            Attribute::required_int64().with_description("Days backups are kept."),
        )
        .with_attribute(
            "execute_hour",
            Attribute::required_int64()
                .with_int_range(0, 23)
                .with_description("Hour the backup starts."),
        )
}

/// `tencentcloud_clickhouse_backup_strategy`: data and metadata schedules of one instance.
pub struct ClickhouseBackupStrategy;

#[async_trait]
impl Resource for ClickhouseBackupStrategy {
    fn name(&self) -> &'static str {
        "tencentcloud_clickhouse_backup_strategy"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute(
                "instance_id",
                Attribute::required_string().with_description("Instance id."),
            )
            .with_block(
                "data_backup_strategy",
                NestedBlock::list(
                    schedule_block().with_block(
                        "back_up_tables",
                        NestedBlock::list(back_up_table_block()).with_min_items(1),
                    ),
                ),
            )
            .with_block("meta_backup_strategy", NestedBlock::single(schedule_block()))
    }

    fn immutable_args(&self) -> &'static [&'static str] {
        &["instance_id"]
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.require_str("instance_id")?.to_string();
        let service = CdwchService::new(client);

        for (key, schedule_type) in STRATEGY_KEYS {
            for strategy in d.decode_key::<Vec<Strategy>>(key)? {
                service
                    .create_back_up_schedule(&strategy.request(&instance_id, schedule_type, OPERATION_CREATE))
                    .await?;
            }
        }

        d.set_id(instance_id);
        self.read(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        let schedule = CdwchService::new(client)
            .describe_back_up_schedule(&instance_id)
            .await?;
        if schedule.data_strategy.is_none() && schedule.meta_strategy.is_none() {
            d.set_id("");
            return Ok(());
        }

        d.set("instance_id", instance_id);
        if let Some(data) = &schedule.data_strategy {
            let strategy = Strategy {
                week_days: data.week_days.clone(),
                retain_days: data.retain_days,
                execute_hour: data.execute_hour,
                back_up_tables: Some(
                    schedule
                        .back_up_contents
                        .iter()
                        .cloned()
                        .map(BackUpTable::from)
                        .collect(),
                ),
            };
            d.set("data_backup_strategy", serde_json::to_value(vec![strategy])?);
        } else {
            d.set("data_backup_strategy", Vec::<Value>::new());
        }
        if let Some(meta) = &schedule.meta_strategy {
            let strategy = Strategy {
                week_days: meta.week_days.clone(),
                retain_days: meta.retain_days,
                execute_hour: meta.execute_hour,
                back_up_tables: None,
            };
            d.set("meta_backup_strategy", serde_json::to_value(vec![strategy])?);
        } else {
            d.set("meta_backup_strategy", Vec::<Value>::new());
        }
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        let service = CdwchService::new(client);
        let current = service.describe_back_up_schedule(&instance_id).await?;

        for (key, schedule_type) in STRATEGY_KEYS {
            if !d.has_change(key) {
                continue;
            }
            let existing = match schedule_type {
                SCHEDULE_TYPE_DATA => current.data_strategy.as_ref(),
                _ => current.meta_strategy.as_ref(),
            };
            let strategies: Vec<Strategy> = d.decode_key(key)?;
            if strategies.is_empty() {
                // Removed from configuration.
                if let Some(s) = existing {
                    service
                        .create_back_up_schedule(&delete_request(&instance_id, schedule_type, s.schedule_id))
                        .await?;
                }
                continue;
            }
            for strategy in strategies {
                let mut req = match existing {
                    Some(s) => {
                        let mut req = strategy.request(&instance_id, schedule_type, OPERATION_UPDATE);
                        req.schedule_id = Some(s.schedule_id);
                        req
                    },
                    None => strategy.request(&instance_id, schedule_type, OPERATION_CREATE),
                };
                if schedule_type == SCHEDULE_TYPE_META {
                    req.back_up_tables.clear();
                }
                service.create_back_up_schedule(&req).await?;
            }
        }

        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let instance_id = d.id().to_string();
        let service = CdwchService::new(client);
        let current = service.describe_back_up_schedule(&instance_id).await?;

        let schedules = [
            (SCHEDULE_TYPE_DATA, current.data_strategy.as_ref()),
            (SCHEDULE_TYPE_META, current.meta_strategy.as_ref()),
        ];
        for (schedule_type, strategy) in schedules {
            let Some(strategy) = strategy else { continue };
            service
                .create_back_up_schedule(&delete_request(&instance_id, schedule_type, strategy.schedule_id))
                .await?;
        }
        Ok(())
    }
}

const STRATEGY_KEYS: [(&str, &str); 2] = [
    ("data_backup_strategy", SCHEDULE_TYPE_DATA),
    ("meta_backup_strategy", SCHEDULE_TYPE_META),
];
