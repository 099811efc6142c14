use serde_json::{json, Value};
use tencentcloud_provider::testing::ProviderTester;
use tencentcloud_provider::ProviderError;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACCOUNT: &str = "tencentcloud_clickhouse_account";
const KEYVAL: &str = "tencentcloud_clickhouse_keyval_config";
const XML: &str = "tencentcloud_clickhouse_xml_config";
const BACKUP: &str = "tencentcloud_clickhouse_backup";
const STRATEGY: &str = "tencentcloud_clickhouse_backup_strategy";

fn ok(body: Value) -> ResponseTemplate {
    let mut response = body;
    response["RequestId"] = json!("req-ok");
    ResponseTemplate::new(200).set_body_json(json!({ "Response": response }))
}

fn api_error(code: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "Response": {
            "Error": {"Code": code, "Message": "mocked failure"},
            "RequestId": "req-err"
        }
    }))
}

fn system_users(users: Value) -> ResponseTemplate {
    ok(json!({ "ReturnData": users.to_string() }))
}

fn instance_state(state: &str) -> ResponseTemplate {
    ok(json!({"InstanceState": state, "InstanceStateDesc": "", "FlowMsg": ""}))
}

async fn mount_state(server: &MockServer, state: &str) {
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeInstanceState"))
        .respond_with(instance_state(state))
        .mount(server)
        .await;
}

fn schedule(meta: Option<Value>) -> ResponseTemplate {
    let mut body = json!({
        "BackUpOpened": true,
        "DataStrategy": {
            "CosBucketName": "ck-backup",
            "RetainDays": 7,
            "WeekDays": "1,3",
            "ExecuteHour": 2,
            "ScheduleId": 11
        },
        "BackUpContents": [{
            "Database": "analytics",
            "Table": "events",
            "TotalBytes": 2048,
            "VCluster": "default_cluster",
            "Ips": "10.0.0.1",
            "ZooPath": "/clickhouse/tables/events",
            "Rip": "10.0.0.1"
        }],
        "BackUpStatus": 0
    });
    if let Some(meta) = meta {
        body["MetaStrategy"] = meta;
    }
    ok(body)
}

async fn mount_users(server: &MockServer, users: Value) {
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeCkSqlApis"))
        .and(body_partial_json(json!({"ApiType": "GetSystemUsers"})))
        .respond_with(system_users(users))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_account_create_and_read() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "ActionAlterCkUser"))
        .and(body_partial_json(json!({
            "ApiType": "AddSystemUser",
            "UserInfo": {"InstanceId": "cdwch-1", "UserName": "reader", "PassWord": "s3cret!"}
        })))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    mount_users(
        &server,
        json!([{"InstanceId": "cdwch-1", "UserName": "reader", "Describe": "read only", "Host": "%"}]),
    )
    .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .create(
            ACCOUNT,
            json!({
                "instance_id": "cdwch-1",
                "user_name": "reader",
                "password": "s3cret!",
                "describe": "read only"
            }),
        )
        .await
        .unwrap();

    assert_eq!(state["id"], "cdwch-1#reader");
    assert_eq!(state["describe"], "read only");
    assert_eq!(state["password"], "s3cret!");
}

#[tokio::test]
async fn test_account_read_missing_is_null() {
    let server = MockServer::start().await;
    mount_users(&server, json!([{"UserName": "someone_else"}])).await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .read(
            ACCOUNT,
            json!({"id": "cdwch-1#reader", "instance_id": "cdwch-1", "user_name": "reader", "password": "x"}),
        )
        .await
        .unwrap();
    assert!(state.is_null());
}

#[tokio::test]
async fn test_account_import_by_composite_id() {
    let server = MockServer::start().await;
    mount_users(&server, json!([{"InstanceId": "cdwch-1", "UserName": "reader", "Describe": ""}])).await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let imported = tester.import_resource(ACCOUNT, "cdwch-1#reader").await.unwrap();
    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].state["instance_id"], "cdwch-1");
    assert_eq!(imported[0].state["user_name"], "reader");

    let err = tester.import_resource(ACCOUNT, "cdwch-1").await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidRequest(_)), "{:?}", err);
}

#[tokio::test]
async fn test_account_immutable_user_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let prior = json!({"id": "cdwch-1#reader", "instance_id": "cdwch-1", "user_name": "reader", "password": "a"});
    let planned = json!({"id": "cdwch-1#reader", "instance_id": "cdwch-1", "user_name": "writer", "password": "a"});
    let err = assert_err!(tester.update(ACCOUNT, prior, planned).await);
    assert!(err.to_string().contains("user_name"), "{}", err);
}

#[tokio::test]
async fn test_account_delete_sends_delete_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeCkSqlApis"))
        .and(body_partial_json(json!({
            "InstanceId": "cdwch-1",
            "ApiType": "DeleteSystemUser",
            "UserName": "reader"
        })))
        .respond_with(ok(json!({"ReturnData": ""})))
        .expect(1)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    assert_ok!(
        tester
            .delete(
                ACCOUNT,
                json!({"id": "cdwch-1#reader", "instance_id": "cdwch-1", "user_name": "reader", "password": "a"}),
            )
            .await
    );
}

#[tokio::test]
async fn test_write_retries_resource_busy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "ActionAlterCkUser"))
        .respond_with(api_error("ResourceBusy"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "ActionAlterCkUser"))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    mount_users(&server, json!([{"UserName": "reader"}])).await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .create(
            ACCOUNT,
            json!({"instance_id": "cdwch-1", "user_name": "reader", "password": "pw"}),
        )
        .await
        .unwrap();
    assert_eq!(state["id"], "cdwch-1#reader");
}

#[tokio::test]
async fn test_write_failed_operation_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "ActionAlterCkUser"))
        .respond_with(api_error("FailedOperation"))
        .expect(1)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let err = tester
        .create(
            ACCOUNT,
            json!({"instance_id": "cdwch-1", "user_name": "reader", "password": "pw"}),
        )
        .await
        .unwrap_err();
    match err {
        ProviderError::Api(api) => assert_eq!(api.code, "FailedOperation"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_backup_tables_writes_result_output_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeBackUpTables"))
        .and(body_partial_json(json!({"InstanceId": "cdwch-1"})))
        .respond_with(ok(json!({
            "AvailableTables": [{
                "Database": "analytics",
                "Table": "events",
                "TotalBytes": 2048,
                "VCluster": "default_cluster",
                "Ips": "10.0.0.1",
                "ZooPath": "/clickhouse/tables/events",
                "Rip": "10.0.0.1"
            }]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("tables.json");

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .read_data_source(
            "tencentcloud_clickhouse_backup_tables",
            json!({
                "instance_id": "cdwch-1",
                "result_output_file": output.to_str().unwrap()
            }),
        )
        .await
        .unwrap();
    assert_eq!(state["id"], "cdwch-1");
    assert_eq!(state["available_tables"][0]["database"], "analytics");

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written[0]["table"], "events");
    assert_eq!(written[0]["total_bytes"], 2048);
}

#[tokio::test]
async fn test_keyval_config_waits_for_serving() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "ModifyInstanceKeyValConfigs"))
        .and(body_partial_json(json!({
            "InstanceId": "cdwch-1",
            "AddItems": [{"ConfKey": "max_threads", "ConfValue": "16"}]
        })))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeInstanceState"))
        .respond_with(instance_state("Init"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeInstanceState"))
        .respond_with(instance_state("Serving"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeInstanceKeyValConfigs"))
        .respond_with(ok(json!({
            "ConfigItems": [
                {"ConfKey": "max_memory_usage", "ConfValue": "0"},
                {"ConfKey": "max_threads", "ConfValue": "16"}
            ]
        })))
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .create(
            KEYVAL,
            json!({"instance_id": "cdwch-1", "items": [{"conf_key": "max_threads", "conf_value": "16"}]}),
        )
        .await
        .unwrap();
    assert_eq!(state["id"], "cdwch-1#max_threads");
    assert_eq!(state["items"], json!([{"conf_key": "max_threads", "conf_value": "16"}]));
}

#[tokio::test]
async fn test_keyval_config_update_is_reflected_on_next_read() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "ModifyInstanceKeyValConfigs"))
        .and(body_partial_json(json!({
            "InstanceId": "cdwch-1",
            "UpdateItems": [{"ConfKey": "max_threads", "ConfValue": "32"}]
        })))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    mount_state(&server, "Serving").await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeInstanceKeyValConfigs"))
        .respond_with(ok(json!({"ConfigItems": [{"ConfKey": "max_threads", "ConfValue": "32"}]})))
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let prior = json!({
        "id": "cdwch-1#max_threads",
        "instance_id": "cdwch-1",
        "items": [{"conf_key": "max_threads", "conf_value": "16"}]
    });
    let mut planned = prior.clone();
    planned["items"][0]["conf_value"] = json!("32");
    let updated = tester.update(KEYVAL, prior, planned).await.unwrap();
    assert_eq!(updated["items"][0]["conf_value"], "32");

    let reread = tester.read(KEYVAL, updated).await.unwrap();
    assert_eq!(reread["items"][0]["conf_value"], "32");
}

#[tokio::test]
async fn test_xml_config_fails_when_instance_is_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeClusterConfigs"))
        .respond_with(ok(json!({
            "ClusterConfList": [{
                "FileName": "metrika.xml",
                "OriParam": "PHlhbmRleD4=",
                "FilePath": "/etc/clickhouse-server",
                "NeedRestart": 1
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "ModifyClusterConfigs"))
        .and(body_partial_json(json!({
            "InstanceId": "cdwch-1",
            "ModifyConfContext": [{
                "FileName": "metrika.xml",
                "NewConfValue": "PG5ldz4=",
                "OldConfValue": "PHlhbmRleD4=",
                "FilePath": "/etc/clickhouse-server"
            }]
        })))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    mount_state(&server, "Deleted").await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let err = tester
        .create(
            XML,
            json!({
                "instance_id": "cdwch-1",
                "modify_conf_context": [{"file_name": "metrika.xml", "new_conf_value": "PG5ldz4="}]
            }),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::FailedPrecondition(_)), "{:?}", err);
    assert!(err.to_string().contains("'Deleted'"), "{}", err);
}

#[tokio::test]
async fn test_keyval_config_wait_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "ModifyInstanceKeyValConfigs"))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    mount_state(&server, "Changing").await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeInstanceKeyValConfigs"))
        .respond_with(ok(json!({"ConfigItems": []})))
        .expect(0)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let err = tester
        .create(
            KEYVAL,
            json!({"instance_id": "cdwch-1", "items": [{"conf_key": "max_threads", "conf_value": "16"}]}),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::DeadlineExceeded(_)), "{:?}", err);
}

#[tokio::test]
async fn test_backup_crud() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "OpenBackUp"))
        .and(body_partial_json(json!({
            "InstanceId": "cdwch-1",
            "OperationType": "open",
            "CosBucketName": "ck-backup"
        })))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "OpenBackUp"))
        .and(body_partial_json(json!({"OperationType": "open", "CosBucketName": "ck-backup-2"})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "OpenBackUp"))
        .and(body_partial_json(json!({"InstanceId": "cdwch-1", "OperationType": "close"})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeBackUpSchedule"))
        .respond_with(schedule(None))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeBackUpSchedule"))
        .respond_with(ok(json!({
            "BackUpOpened": true,
            "DataStrategy": {"CosBucketName": "ck-backup-2", "WeekDays": "1", "ScheduleId": 11}
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeBackUpSchedule"))
        .respond_with(ok(json!({"BackUpOpened": false})))
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .create(BACKUP, json!({"instance_id": "cdwch-1", "cos_bucket_name": "ck-backup"}))
        .await
        .unwrap();
    assert_eq!(state["id"], "cdwch-1");
    assert_eq!(state["cos_bucket_name"], "ck-backup");

    let mut planned = state.clone();
    planned["cos_bucket_name"] = json!("ck-backup-2");
    let updated = tester.update(BACKUP, state, planned).await.unwrap();
    assert_eq!(updated["cos_bucket_name"], "ck-backup-2");

    tester.delete(BACKUP, updated.clone()).await.unwrap();
    let gone = tester.read(BACKUP, updated).await.unwrap();
    assert!(gone.is_null());
}

#[tokio::test]
async fn test_backup_strategy_round_trips_tables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "CreateBackUpSchedule"))
        .and(body_partial_json(json!({
            "InstanceId": "cdwch-1",
            "ScheduleType": "data",
            "OperationType": "create",
            "WeekDays": "1,3",
            "RetainDays": 7,
            "ExecuteHour": 2,
            "BackUpTables": [{
                "Database": "analytics",
                "Table": "events",
                "TotalBytes": 2048,
                "VCluster": "default_cluster",
                "Ips": "10.0.0.1"
            }]
        })))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeBackUpSchedule"))
        .respond_with(schedule(None))
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .create(
            STRATEGY,
            json!({
                "instance_id": "cdwch-1",
                "data_backup_strategy": [{
                    "week_days": "1,3",
                    "retain_days": 7,
                    "execute_hour": 2,
                    "back_up_tables": [{
                        "database": "analytics",
                        "table": "events",
                        "total_bytes": 2048,
                        "v_cluster": "default_cluster",
                        "ips": "10.0.0.1",
                        "zoo_path": "/clickhouse/tables/events",
                        "rip": "10.0.0.1"
                    }]
                }]
            }),
        )
        .await
        .unwrap();

    assert_eq!(state["id"], "cdwch-1");
    let data = &state["data_backup_strategy"][0];
    assert_eq!(data["week_days"], "1,3");
    assert_eq!(data["back_up_tables"][0]["zoo_path"], "/clickhouse/tables/events");
    assert_eq!(data["back_up_tables"][0]["total_bytes"], 2048);
    assert_eq!(state["meta_backup_strategy"], json!([]));
}

#[tokio::test]
async fn test_backup_strategy_removed_meta_block_is_deleted() {
    let server = MockServer::start().await;
    let meta = json!({"RetainDays": 3, "WeekDays": "7", "ExecuteHour": 4, "ScheduleId": 12});
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeBackUpSchedule"))
        .respond_with(schedule(Some(meta)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeBackUpSchedule"))
        .respond_with(schedule(None))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "CreateBackUpSchedule"))
        .and(body_partial_json(json!({
            "InstanceId": "cdwch-1",
            "ScheduleType": "meta",
            "OperationType": "delete",
            "ScheduleId": 12
        })))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "CreateBackUpSchedule"))
        .and(body_partial_json(json!({"ScheduleType": "data"})))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let tables = json!([{
        "database": "analytics",
        "table": "events",
        "total_bytes": 2048,
        "v_cluster": "default_cluster",
        "ips": "10.0.0.1",
        "zoo_path": "/clickhouse/tables/events",
        "rip": "10.0.0.1"
    }]);
    let prior = json!({
        "id": "cdwch-1",
        "instance_id": "cdwch-1",
        "data_backup_strategy": [{"week_days": "1,3", "retain_days": 7, "execute_hour": 2, "back_up_tables": tables}],
        "meta_backup_strategy": [{"week_days": "7", "retain_days": 3, "execute_hour": 4}]
    });
    let mut planned = prior.clone();
    planned["meta_backup_strategy"] = json!([]);

    let state = tester.update(STRATEGY, prior, planned).await.unwrap();
    assert_eq!(state["meta_backup_strategy"], json!([]));
    assert_eq!(state["data_backup_strategy"][0]["retain_days"], 7);
}

#[tokio::test]
async fn test_backup_jobs_pages() {
    let server = MockServer::start().await;
    let jobs = |first: i64, n: i64| -> Vec<Value> {
        (first..first + n)
            .map(|id| json!({"JobId": id, "Snapshot": format!("snap-{}", id), "JobStatus": "Success"}))
            .collect()
    };
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeBackUpJob"))
        .and(body_partial_json(json!({"InstanceId": "cdwch-1", "PageNum": 1, "PageSize": 20})))
        .respond_with(ok(json!({"BackUpJobs": jobs(1, 20), "TotalCount": 25})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeBackUpJob"))
        .and(body_partial_json(json!({"InstanceId": "cdwch-1", "PageNum": 2, "PageSize": 20})))
        .respond_with(ok(json!({"BackUpJobs": jobs(21, 5), "TotalCount": 25})))
        .expect(1)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .read_data_source("tencentcloud_clickhouse_backup_jobs", json!({"instance_id": "cdwch-1"}))
        .await
        .unwrap();
    let jobs = state["back_up_jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 25);
    assert_eq!(jobs[24]["snapshot"], "snap-25");
}

#[tokio::test]
async fn test_instances_pages_by_offset() {
    let server = MockServer::start().await;
    let instances = |first: usize, n: usize| -> Vec<Value> {
        (first..first + n)
            .map(|i| json!({"InstanceId": format!("cdwch-{}", i), "Status": "Serving", "HA": "true"}))
            .collect()
    };
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeInstancesNew"))
        .and(body_partial_json(json!({"SearchInstanceName": "ck", "Offset": 0, "Limit": 20})))
        .respond_with(ok(json!({"InstancesList": instances(0, 20), "TotalCount": 21})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("X-TC-Action", "DescribeInstancesNew"))
        .and(body_partial_json(json!({"Offset": 20, "Limit": 20})))
        .respond_with(ok(json!({"InstancesList": instances(20, 1), "TotalCount": 21})))
        .expect(1)
        .mount(&server)
        .await;

    let tester = ProviderTester::with_endpoint(&server.uri()).unwrap();
    let state = tester
        .read_data_source("tencentcloud_clickhouse_instances", json!({"instance_name": "ck"}))
        .await
        .unwrap();
    let list = state["instance_list"].as_array().unwrap();
    assert_eq!(list.len(), 21);
    assert_eq!(list[20]["instance_id"], "cdwch-20");
    assert_eq!(list[0]["ha"], "true");
}
