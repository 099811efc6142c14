//! Managed Grafana instance configuration. Every change waits for the
//! instance to return to running.

mod dns;
mod env;
mod grafana_config;
pub mod model;
pub mod service;
mod sso_account;
mod sso_config;
mod whitelist;

pub use dns::GrafanaDnsConfig;
pub use env::GrafanaEnvConfig;
pub use grafana_config::TmpGrafanaConfig;
pub use service::GrafanaService;
pub use sso_account::GrafanaSsoAccount;
pub use sso_config::GrafanaSsoConfig;
pub use whitelist::GrafanaWhitelistConfig;

use crate::resource::Registry;

/// Register every Grafana resource.
pub fn register(registry: Registry) -> Registry {
    registry
        .with_resource(GrafanaWhitelistConfig)
        .with_resource(GrafanaDnsConfig)
        .with_resource(GrafanaEnvConfig)
        .with_resource(TmpGrafanaConfig)
        .with_resource(GrafanaSsoConfig)
        .with_resource(GrafanaSsoAccount)
}
