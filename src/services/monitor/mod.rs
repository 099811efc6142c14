//! Cloud Monitor alarm policies, notice templates and alarm history.

mod alarm_history;
mod alarm_notice;
mod alarm_policy;
mod data_sources;
pub mod model;
pub mod service;

pub use alarm_history::MonitorAlarmHistory;
pub use alarm_notice::MonitorAlarmNotice;
pub use alarm_policy::MonitorAlarmPolicy;
pub use data_sources::{MonitorAlarmConditionsTemplates, MonitorAlarmPolicies};
pub use service::MonitorService;

use crate::resource::Registry;

/// Adds the Cloud Monitor alarm resources and data sources.
pub fn register(registry: Registry) -> Registry {
    registry
        .with_resource(MonitorAlarmPolicy)
        .with_resource(MonitorAlarmNotice)
        .with_data_source(MonitorAlarmHistory)
        .with_data_source(MonitorAlarmPolicies)
        .with_data_source(MonitorAlarmConditionsTemplates)
}
