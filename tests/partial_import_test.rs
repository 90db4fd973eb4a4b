mod common;

use pulse_client::PulseError;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn paged_workflows() -> serde_json::Value {
    json!({
        "collectionSize": 1,
        "lastPage": true,
        "offset": 0,
        "items": [
            {"id": "wf-1", "name": "wf_main", "desc": "Main workflow",
             "config": {
                 "recoveryExpression": "latest()",
                 "elements": [
                     {"id": "el-1", "desc": "Ingest"},
                     {"id": "el-2", "desc": "Decision"}
                 ]
             }}
        ]
    })
}

fn rule_project_bundle() -> serde_json::Value {
    json!({
        "importId": "imp-1",
        "lists": [
            {"desc": "Blocked cards", "existingList": true, "id": "list-a",
             "matchingType": "EXACT", "tenancyScope": "GLOBAL",
             "tokenized": false, "type": "managedlist"}
        ],
        "models": [{"id": "model-1"}],
        "plans": [
            {"id": "plan-1", "desc": "Scoring plan",
             "executions": [{"id": "exec-1", "desc": "primary"}]}
        ],
        "rulesProjects": [
            {"id": "rp-1", "desc": "Fraud rules", "snapshots": [
                {"id": "snap-1", "desc": "v1"},
                {"id": "snap-2", "desc": "v2"}
            ]}
        ]
    })
}

/// Remap expected for [`rule_project_bundle`]: identity destinations, every
/// snapshot pinned to the resolved element, plans/models/lists pass through.
fn expected_rule_project_remap() -> serde_json::Value {
    json!({
        "lists": [
            {"desc": "Blocked cards", "existingList": true, "id": "list-a",
             "matchingType": "EXACT", "tenancyScope": "GLOBAL",
             "tokenized": false, "type": "managedlist"}
        ],
        "models": [{"id": "model-1"}],
        "plans": [
            {"id": "plan-1", "desc": "Scoring plan",
             "executions": [{"id": "exec-1", "desc": "primary"}]}
        ],
        "rulesProjects": [
            {"id": "rp-1", "destinationDesc": "Fraud rules", "destinationId": "rp-1",
             "snapshots": [
                 {"desc": "v1", "id": "snap-1",
                  "workflowMapping": [{"workflowElementId": "el-2", "workflowId": "workflow"}]},
                 {"desc": "v2", "id": "snap-2",
                  "workflowMapping": [{"workflowElementId": "el-2", "workflowId": "workflow"}]}
             ]}
        ]
    })
}

async fn mount_discovery(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/pulseviews/api/apps/payments/rte_workflows/paged"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paged_workflows()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn rule_project_import_runs_prepare_check_commit_update() {
    let server = common::mock_platform().await;
    let client = common::connect(&server).await;
    mount_discovery(&server).await;

    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportPrepare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rule_project_bundle()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportCheckSchemas/imp-1"))
        .and(body_json(expected_rule_project_remap()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportCommit/imp-1"))
        .and(body_json(expected_rule_project_remap()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/lifecycle/update"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let zip = common::temp_file(b"PK\x03\x04fake");
    client
        .import_rule_projects(zip.path(), "Main workflow", "Decision")
        .await
        .expect("full partial-import flow");
}

#[tokio::test]
async fn failed_schema_check_stops_before_commit() {
    let server = common::mock_platform().await;
    let client = common::connect(&server).await;
    mount_discovery(&server).await;

    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportPrepare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rule_project_bundle()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportCheckSchemas/imp-1"))
        .respond_with(ResponseTemplate::new(400).set_body_string("schema mismatch"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportCommit/imp-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/lifecycle/update"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let zip = common::temp_file(b"PK\x03\x04fake");
    let err = client
        .import_rule_projects(zip.path(), "Main workflow", "Decision")
        .await
        .expect_err("schema check rejected");

    match err {
        PulseError::ValidationFailed(msg) => assert!(msg.contains("schema mismatch")),
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_commit_propagates_and_skips_update() {
    let server = common::mock_platform().await;
    let client = common::connect(&server).await;
    mount_discovery(&server).await;

    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportPrepare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rule_project_bundle()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportCheckSchemas/imp-1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportCommit/imp-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("commit exploded"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/lifecycle/update"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let zip = common::temp_file(b"PK\x03\x04fake");
    let err = client
        .import_rule_projects(zip.path(), "Main workflow", "Decision")
        .await
        .expect_err("commit rejected");

    match err {
        PulseError::CommitFailed(body) => assert_eq!(body, "commit exploded"),
        other => panic!("expected CommitFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn unresolved_element_aborts_before_any_import_traffic() {
    let server = common::mock_platform().await;
    let client = common::connect(&server).await;
    mount_discovery(&server).await;

    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportPrepare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rule_project_bundle()))
        .expect(0)
        .mount(&server)
        .await;

    let zip = common::temp_file(b"PK\x03\x04fake");
    let err = client
        .import_rule_projects(zip.path(), "Main workflow", "Renamed element")
        .await
        .expect_err("no such element description");
    assert!(matches!(err, PulseError::ResolutionNotFound(_)));
}

#[tokio::test]
async fn plan_import_copies_executions_by_id_only() {
    let server = common::mock_platform().await;
    let client = common::connect(&server).await;

    let bundle = json!({
        "importId": "imp-2",
        "lists": [],
        "models": [],
        "plans": [
            {"id": "plan-1", "desc": "Scoring plan",
             "executions": [
                 {"id": "exec-1", "desc": "primary"},
                 {"id": "exec-2", "desc": "shadow"}
             ]}
        ],
        "rulesProjects": [
            {"id": "rp-1", "desc": "Fraud rules",
             "snapshots": [{"id": "snap-1", "desc": "v1"}]}
        ]
    });
    // Executions drop everything but the ID; rules projects pass through.
    let expected_remap = json!({
        "lists": [],
        "models": [],
        "plans": [
            {"desc": "Scoring plan",
             "executions": [{"id": "exec-1"}, {"id": "exec-2"}],
             "id": "plan-1", "destinationId": "plan-1",
             "destinationDesc": "Scoring plan"}
        ],
        "rulesProjects": [
            {"id": "rp-1", "desc": "Fraud rules",
             "snapshots": [{"id": "snap-1", "desc": "v1"}]}
        ]
    });

    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportPrepare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bundle))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportCheckSchemas/imp-2"))
        .and(body_json(expected_remap.clone()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/partialImportCommit/imp-2"))
        .and(body_json(expected_remap))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/apps/payments/lifecycle/update"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let zip = common::temp_file(b"PK\x03\x04fake");
    client.import_plans(zip.path()).await.expect("plan import flow");
}
