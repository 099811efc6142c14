//! Cloud Data Warehouse for ClickHouse (`cdwch`).

mod account;
mod backup;
mod backup_strategy;
mod data_sources;
mod keyval_config;
pub mod model;
pub mod service;
mod xml_config;

pub use account::ClickhouseAccount;
pub use backup::ClickhouseBackup;
pub use backup_strategy::ClickhouseBackupStrategy;
pub use data_sources::{ClickhouseBackupJobs, ClickhouseBackupTables, ClickhouseInstances};
pub use keyval_config::ClickhouseKeyvalConfig;
pub use service::CdwchService;
pub use xml_config::ClickhouseXmlConfig;

use crate::resource::Registry;

/// Register every ClickHouse resource and data source.
pub fn register(registry: Registry) -> Registry {
    registry
        .with_resource(ClickhouseBackup)
        .with_resource(ClickhouseBackupStrategy)
        .with_resource(ClickhouseAccount)
        .with_resource(ClickhouseKeyvalConfig)
        .with_resource(ClickhouseXmlConfig)
        .with_data_source(ClickhouseBackupJobs)
        .with_data_source(ClickhouseBackupTables)
        .with_data_source(ClickhouseInstances)
}
