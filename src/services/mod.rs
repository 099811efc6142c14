//! Resources and data sources, one module per cloud product.

pub mod cdwch;
pub mod grafana;
pub mod monitor;
pub mod tmp;

use crate::resource::Registry;

/// Every resource and data source this provider serves.
pub fn registry() -> Registry {
    let registry = Registry::default();
    let registry = cdwch::register(registry);
    let registry = monitor::register(registry);
    let registry = tmp::register(registry);
    grafana::register(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names() {
        let registry = registry();
        let resources = registry.resource_names();
        let data_sources = registry.data_source_names();
        for name in [
            "tencentcloud_clickhouse_backup",
            "tencentcloud_clickhouse_backup_strategy",
            "tencentcloud_clickhouse_account",
            "tencentcloud_clickhouse_keyval_config",
            "tencentcloud_clickhouse_xml_config",
            "tencentcloud_monitor_alarm_policy",
            "tencentcloud_monitor_alarm_notice",
            "tencentcloud_monitor_tmp_alert_group",
            "tencentcloud_monitor_tmp_alert_rule",
            "tencentcloud_monitor_grafana_whitelist_config",
            "tencentcloud_monitor_grafana_dns_config",
            "tencentcloud_monitor_grafana_env_config",
            "tencentcloud_monitor_tmp_grafana_config",
            "tencentcloud_monitor_grafana_sso_config",
            "tencentcloud_monitor_grafana_sso_account",
        ] {
            assert!(resources.iter().any(|r| r == name), "missing resource {}", name);
        }
        for name in [
            "tencentcloud_clickhouse_backup_jobs",
            "tencentcloud_clickhouse_backup_tables",
            "tencentcloud_clickhouse_instances",
            "tencentcloud_monitor_alarm_history",
            "tencentcloud_monitor_alarm_policy",
            "tencentcloud_monitor_alarm_conditions_template",
            "tencentcloud_monitor_tmp_instances",
        ] {
            assert!(data_sources.iter().any(|d| d == name), "missing data source {}", name);
        }
        assert_eq!(resources.len(), 15);
        assert_eq!(data_sources.len(), 7);
    }
}
