use serde_json::{json, Value};
use tencentcloud_provider::testing::ProviderTester;
use tencentcloud_provider::ProviderError;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RULE: &str = "tencentcloud_monitor_tmp_alert_rule";
const WHITELIST: &str = "tencentcloud_monitor_grafana_whitelist_config";
const POLICY: &str = "tencentcloud_monitor_alarm_policy";

fn ok(body: Value) -> ResponseTemplate {
    let mut response = body;
    response["RequestId"] = json!("req-ok");
    ResponseTemplate::new(200).set_body_json(json!({ "Response": response }))
}

fn grafana_instance(status: i64) -> ResponseTemplate {
    ok(json!({
        "Instances": [{
            "InstanceId": "grafana-1",
            "InstanceName": "ops",
            "InstanceStatus": status,
            "EnableSSO": false
        }]
    }))
}

fn policy_body(name: &str) -> Value {
    json!({
        "Policy": {
            "PolicyId": "policy-1",
            "PolicyName": name,
            "MonitorType": "MT_QCE",
            "Namespace": "cvm_device",
            "Remark": "",
            "Enable": 1,
            "ProjectId": -1,
            "ConditionTemplateId": "",
            "Condition": {
                "IsUnionRule": 0,
                "Rules": [{
                    "MetricName": "CpuUsage",
                    "Period": 60,
                    "Operator": "ge",
                    "Value": "90",
                    "ContinuePeriod": 1,
                    "NoticeFrequency": 3600,
                    "IsPowerNotice": 0
                }]
            },
            "NoticeIds": ["notice-1"],
            "InsertTime": 1700000000,
            "UpdateTime": 1700000000,
            "OriginId": "1001"
        }
    })
}

/// `n` listing entries whose ids start at `first`.
fn numbered(n: usize, first: usize, entry: impl Fn(usize) -> Value) -> Vec<Value> {
    (first..first + n).map(entry).collect()
}

fn rule_body() -> Value {
    json!({
        "AlertRuleSet": [{
            "RuleId": "rule-1",
            "RuleName": "high-cpu",
            "RuleState": 2,
            "Type": "",
            "Labels": [{"Key": "severity", "Value": "critical"}],
            "Annotations": [],
            "Expr": "avg(cpu_usage) > 90",
            "Duration": "1m",
            "Receivers": ["notice-1"]
        }]
    })
}

#[tokio::test]
async fn test_alert_rule_create_and_read() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "CreateAlertRule"))
        .and(body_partial_json(json!({
            "InstanceId": "prom-1",
            "RuleName": "high-cpu",
            "Expr": "avg(cpu_usage) > 90",
            "Receivers": ["notice-1"],
            "Labels": [{"Key": "severity", "Value": "critical"}]
        })))
        .respond_with(ok(json!({"RuleId": "rule-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeAlertRules"))
        .and(body_partial_json(json!({"InstanceId": "prom-1", "RuleId": "rule-1"})))
        .respond_with(ok(rule_body()))
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .create(
            RULE,
            json!({
                "instance_id": "prom-1",
                "rule_name": "high-cpu",
                "expr": "avg(cpu_usage) > 90",
                "receivers": ["notice-1"],
                "duration": "1m",
                "labels": [{"key": "severity", "value": "critical"}]
            }),
        )
        .await
        .unwrap();

    assert_eq!(state["id"], "prom-1#rule-1");
    assert_eq!(state["rule_state"], 2);
    assert_eq!(state["labels"][0]["value"], "critical");
    assert_eq!(state["receivers"], json!(["notice-1"]));
}

#[tokio::test]
async fn test_alert_rule_delete_then_read_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DeleteAlertRules"))
        .and(body_partial_json(json!({"InstanceId": "prom-1", "RuleIds": ["rule-1"]})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeAlertRules"))
        .respond_with(ok(json!({"AlertRuleSet": []})))
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let current = json!({
        "id": "prom-1#rule-1",
        "instance_id": "prom-1",
        "rule_name": "high-cpu",
        "expr": "up == 0",
        "receivers": ["notice-1"]
    });
    tester.delete(RULE, current.clone()).await.unwrap();
    let state = tester.read(RULE, current).await.unwrap();
    assert!(state.is_null());
}

#[tokio::test]
async fn test_alert_rule_import() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeAlertRules"))
        .respond_with(ok(rule_body()))
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let imported = tester.import_resource(RULE, "prom-1#rule-1").await.unwrap();
    let state = &imported[0].state;
    assert_eq!(state["instance_id"], "prom-1");
    assert_eq!(state["rule_name"], "high-cpu");
    assert_eq!(state["expr"], "avg(cpu_usage) > 90");
}

#[tokio::test]
async fn test_grafana_whitelist_waits_for_running() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "UpdateGrafanaWhiteList"))
        .and(body_partial_json(json!({"InstanceId": "grafana-1", "Whitelist": ["10.0.0.1"]})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeGrafanaInstances"))
        .respond_with(grafana_instance(1))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeGrafanaInstances"))
        .respond_with(grafana_instance(2))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeGrafanaWhiteList"))
        .respond_with(ok(json!({"WhiteList": ["10.0.0.1"]})))
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .create(WHITELIST, json!({"instance_id": "grafana-1", "whitelist": ["10.0.0.1"]}))
        .await
        .unwrap();
    assert_eq!(state["id"], "grafana-1");
    assert_eq!(state["whitelist"], json!(["10.0.0.1"]));
}

#[tokio::test]
async fn test_grafana_abnormal_instance_fails_wait() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "UpdateGrafanaWhiteList"))
        .respond_with(ok(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeGrafanaInstances"))
        .respond_with(grafana_instance(3))
        .expect(1)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let err = tester
        .create(WHITELIST, json!({"instance_id": "grafana-1", "whitelist": []}))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::FailedPrecondition(_)), "{:?}", err);
    assert!(err.to_string().contains("'3'"), "{}", err);
}

#[tokio::test]
async fn test_grafana_config_rejects_non_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let err = tester
        .create(
            "tencentcloud_monitor_tmp_grafana_config",
            json!({"instance_id": "grafana-1", "config": "[1, 2]"}),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Validation(_)), "{:?}", err);
}

#[tokio::test]
async fn test_alarm_notice_rejects_bad_notice_type() {
    let server = MockServer::start().await;
    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let err = tester
        .validate_resource_config(
            "tencentcloud_monitor_alarm_notice",
            json!({"name": "ops", "notice_type": "SOMETIMES", "notice_language": "en-US"}),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("notice_type"), "{}", err);
}

#[tokio::test]
async fn test_alarm_policy_crud() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "CreateAlarmPolicy"))
        .and(body_partial_json(json!({
            "Module": "monitor",
            "PolicyName": "cpu",
            "MonitorType": "MT_QCE",
            "Namespace": "cvm_device",
            "Enable": 1,
            "NoticeIds": ["notice-1"]
        })))
        .respond_with(ok(json!({"PolicyId": "policy-1", "OriginId": "1001"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeAlarmPolicy"))
        .and(body_partial_json(json!({"Module": "monitor", "PolicyId": "policy-1"})))
        .respond_with(ok(policy_body("cpu")))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeAlarmPolicy"))
        .respond_with(ok(policy_body("cpu-renamed")))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "ModifyAlarmPolicyInfo"))
        .and(body_partial_json(json!({"PolicyId": "policy-1", "Key": "NAME", "Value": "cpu-renamed"})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DeleteAlarmPolicy"))
        .and(body_partial_json(json!({"Module": "monitor", "PolicyIds": ["policy-1"]})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .create(
            POLICY,
            json!({
                "policy_name": "cpu",
                "monitor_type": "MT_QCE",
                "namespace": "cvm_device",
                "notice_ids": ["notice-1"],
                "conditions": [{
                    "is_union_rule": 0,
                    "rules": [{
                        "metric_name": "CpuUsage",
                        "period": 60,
                        "operator": "ge",
                        "value": "90",
                        "continue_period": 1,
                        "notice_frequency": 3600,
                        "is_power_notice": 0
                    }]
                }]
            }),
        )
        .await
        .unwrap();
    assert_eq!(state["id"], "policy-1");
    assert_eq!(state["policy_name"], "cpu");
    assert_eq!(state["project_id"], -1);
    assert_eq!(state["conditions"][0]["rules"][0]["metric_name"], "CpuUsage");

    let mut planned = state.clone();
    planned["policy_name"] = json!("cpu-renamed");
    let updated = tester.update(POLICY, state, planned).await.unwrap();
    assert_eq!(updated["policy_name"], "cpu-renamed");

    let reread = tester.read(POLICY, updated.clone()).await.unwrap();
    assert_eq!(reread["policy_name"], "cpu-renamed");
    assert_eq!(reread["notice_ids"], json!(["notice-1"]));

    assert_ok!(tester.delete(POLICY, reread).await);
}

#[tokio::test]
async fn test_alarm_policy_namespace_change_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let prior = json!({
        "id": "policy-1",
        "policy_name": "cpu",
        "monitor_type": "MT_QCE",
        "namespace": "cvm_device",
        "enable": 1,
        "project_id": -1
    });
    let mut planned = prior.clone();
    planned["namespace"] = json!("cvm_device_v2");

    let err = assert_err!(tester.update(POLICY, prior, planned).await);
    assert!(matches!(err, ProviderError::Validation(_)), "{:?}", err);
    assert!(err.to_string().contains("`namespace` cannot be changed"), "{}", err);
}

#[tokio::test]
async fn test_alarm_history_pages_with_default_module() {
    let server = MockServer::start().await;
    let history = |i: usize| json!({"AlarmId": format!("alarm-{}", i), "AlarmStatus": "ALARM"});
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeAlarmHistories"))
        .and(body_partial_json(json!({"Module": "monitor", "PageNumber": 1, "PageSize": 20})))
        .respond_with(ok(json!({"Histories": numbered(20, 0, history), "TotalCount": 23})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeAlarmHistories"))
        .and(body_partial_json(json!({"Module": "monitor", "PageNumber": 2, "PageSize": 20})))
        .respond_with(ok(json!({"Histories": numbered(3, 20, history), "TotalCount": 23})))
        .expect(1)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .read_data_source("tencentcloud_monitor_alarm_history", json!({"start_time": 1700000000}))
        .await
        .unwrap();
    assert_eq!(state["module"], "monitor");
    let histories = state["histories"].as_array().unwrap();
    assert_eq!(histories.len(), 23);
    assert_eq!(histories[22]["alarm_id"], "alarm-22");
}

#[tokio::test]
async fn test_alarm_policy_data_source_pages() {
    let server = MockServer::start().await;
    let policy = |i: usize| json!({"PolicyId": format!("policy-{}", i), "Namespace": "cvm_device"});
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeAlarmPolicies"))
        .and(body_partial_json(json!({
            "Module": "monitor",
            "Namespaces": ["cvm_device"],
            "PageNumber": 1,
            "PageSize": 20
        })))
        .respond_with(ok(json!({"Policies": numbered(20, 0, policy), "TotalCount": 21})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeAlarmPolicies"))
        .and(body_partial_json(json!({"PageNumber": 2})))
        .respond_with(ok(json!({
            "Policies": [{
                "PolicyId": "policy-20",
                "PolicyName": "cpu",
                "Namespace": "cvm_device",
                "Condition": {"IsUnionRule": 1, "Rules": [{"MetricName": "CpuUsage", "Period": 60}]},
                "TagInstances": [{"Key": "team", "Value": "ops", "InstanceSum": 2}]
            }],
            "TotalCount": 21
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .read_data_source(POLICY, json!({"namespaces": ["cvm_device"]}))
        .await
        .unwrap();
    let policies = state["policies"].as_array().unwrap();
    assert_eq!(policies.len(), 21);
    let last = &policies[20];
    assert_eq!(last["policy_name"], "cpu");
    assert_eq!(last["condition"][0]["is_union_rule"], 1);
    assert_eq!(last["condition"][0]["rules"][0]["metric_name"], "CpuUsage");
    assert_eq!(last["tag_instances"][0]["instance_sum"], 2);
    assert_eq!(policies[0]["condition"], json!([]));
}

#[tokio::test]
async fn test_conditions_template_data_source() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeConditionsTemplateList"))
        .and(body_partial_json(json!({
            "Module": "monitor",
            "ViewName": "cvm_device",
            "Offset": 0,
            "Limit": 20
        })))
        .respond_with(ok(json!({
            "TemplateGroupList": [{
                "GroupID": 4001,
                "GroupName": "cpu-high",
                "ViewName": "cvm_device",
                "IsUnionRule": 0,
                "Conditions": [{"MetricID": 33, "MetricDisplayName": "CPU", "CalcType": "1", "CalcValue": "90", "Period": 60}],
                "EventConditions": [],
                "PolicyGroups": [{"GroupID": 9, "GroupName": "legacy", "Enable": true}]
            }],
            "Total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .read_data_source(
            "tencentcloud_monitor_alarm_conditions_template",
            json!({"view_name": "cvm_device"}),
        )
        .await
        .unwrap();
    let group = &state["template_group_list"][0];
    assert_eq!(group["group_id"], 4001);
    assert_eq!(group["conditions"][0]["metric_id"], 33);
    assert_eq!(group["conditions"][0]["calc_value"], "90");
    assert_eq!(group["policy_groups"][0]["group_name"], "legacy");
    assert_eq!(group["policy_groups"][0]["enable"], true);
}

#[tokio::test]
async fn test_tmp_instances_pages_by_offset() {
    let server = MockServer::start().await;
    let instance = |i: usize| json!({"InstanceId": format!("prom-{}", i), "InstanceStatus": 2});
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribePrometheusInstances"))
        .and(body_partial_json(json!({"Offset": 0, "Limit": 20})))
        .respond_with(ok(json!({"InstanceSet": numbered(20, 0, instance), "TotalCount": 22})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribePrometheusInstances"))
        .and(body_partial_json(json!({"Offset": 20, "Limit": 20})))
        .respond_with(ok(json!({"InstanceSet": numbered(2, 20, instance), "TotalCount": 22})))
        .expect(1)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .read_data_source("tencentcloud_monitor_tmp_instances", json!({}))
        .await
        .unwrap();
    let instances = state["instance_set"].as_array().unwrap();
    assert_eq!(instances.len(), 22);
    assert_eq!(instances[21]["instance_id"], "prom-21");
}

#[tokio::test]
async fn test_grafana_read_of_missing_instance_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeGrafanaInstances"))
        .respond_with(ok(json!({"Instances": [], "TotalCount": 0})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeGrafanaWhiteList"))
        .respond_with(ok(json!({"WhiteList": ["10.0.0.1"]})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeGrafanaEnvironments"))
        .respond_with(ok(json!({"Envs": "{}"})))
        .expect(0)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .read(
            WHITELIST,
            json!({"id": "grafana-1", "instance_id": "grafana-1", "whitelist": ["10.0.0.1"]}),
        )
        .await
        .unwrap();
    assert!(state.is_null());

    let err = tester
        .import_resource("tencentcloud_monitor_grafana_env_config", "grafana-1")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::NotFound(_)), "{:?}", err);
}
