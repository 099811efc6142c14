//! Managed Prometheus (TMP): alert groups, alert rules and instances.

mod alert_group;
mod alert_rule;
mod instances;
pub mod model;
pub mod service;

pub use alert_group::TmpAlertGroup;
pub use alert_rule::TmpAlertRule;
pub use instances::TmpInstances;
pub use service::TmpService;

use crate::resource::Registry;

/// Register the Prometheus resources and data source.
pub fn register(registry: Registry) -> Registry {
    registry
        .with_resource(TmpAlertGroup)
        .with_resource(TmpAlertRule)
        .with_data_source(TmpInstances)
}
