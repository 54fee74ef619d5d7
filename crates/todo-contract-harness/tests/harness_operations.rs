// crates/todo-contract-harness/tests/harness_operations.rs
// ============================================================================
// Module: Harness Operation Tests
// Description: Fixture lifecycle, method checks, and shutdown against a stub.
// Dependencies: todo-contract-harness, reqwest, serde_json
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::panic,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

mod helpers;

use std::sync::Arc;

use helpers::RecordingSink;
use helpers::dead_base_url;
use helpers::harness_for;
use helpers::todo_stub::StubOptions;
use helpers::todo_stub::spawn_todo_stub;
use helpers::todo_stub::spawn_todo_stub_with;
use reqwest::Method;
use serde_json::json;
use todo_contract_harness::FixtureKind;
use todo_contract_harness::HarnessError;
use todo_contract_harness::ServerProfile;
use todo_contract_harness::ShutdownOutcome;
use todo_contract_harness::model::TodoPayload;

#[test]
fn readiness_probe_distinguishes_live_and_dead_servers() {
    let stub = spawn_todo_stub().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let harness = harness_for(stub.base_url(), ServerProfile::Observed, Arc::clone(&sink)).unwrap();
    harness.ensure_system_ready().unwrap();
    assert_eq!(sink.events(), vec!["http_exchange".to_string()]);

    let dead = harness_for(&dead_base_url().unwrap(), ServerProfile::Observed, sink).unwrap();
    let err = dead.ensure_system_ready().unwrap_err();
    assert!(matches!(err, HarnessError::Unreachable { .. }), "got {err}");
}

#[test]
fn with_fixture_deletes_after_success() {
    let stub = spawn_todo_stub().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let harness = harness_for(stub.base_url(), ServerProfile::Observed, sink).unwrap();

    let path = harness
        .with_fixture(FixtureKind::Todo, &TodoPayload::titled("Contract fixture"), |id| {
            let path = FixtureKind::Todo.item_path(id);
            harness.client().get(&path)?.require_status(&[200])?;
            Ok(path)
        })
        .unwrap();

    assert_eq!(stub.live("todos"), 0);
    let status = harness.client().get(&path).unwrap().status().as_u16();
    assert_eq!(status, 404);
}

#[test]
fn with_fixture_cleans_up_when_the_body_fails() {
    let stub = spawn_todo_stub().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let harness = harness_for(stub.base_url(), ServerProfile::Observed, sink).unwrap();

    let result: Result<(), HarnessError> =
        harness.with_fixture(FixtureKind::Project, &json!({"title": "doomed"}), |_| {
            Err(HarnessError::Artifact("body failed".to_string()))
        });

    assert!(matches!(result, Err(HarnessError::Artifact(ref message)) if message == "body failed"));
    assert_eq!(stub.live("projects"), 0);
    assert!(stub.requests().iter().any(|request| request.method == "DELETE"));
}

#[test]
fn create_fixture_requires_created_status() {
    let stub = spawn_todo_stub().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let harness = harness_for(stub.base_url(), ServerProfile::Observed, sink).unwrap();

    let payload = TodoPayload::untitled("no title");
    let err = harness.create_fixture(FixtureKind::Todo, &payload).unwrap_err();
    let HarnessError::UnexpectedStatus { actual, body_excerpt, .. } = err else {
        panic!("expected a status failure, got {err}");
    };
    assert_eq!(actual, 400);
    assert!(body_excerpt.contains("title"));
    assert_eq!(stub.live("todos"), 0);
}

#[test]
fn refused_cleanup_is_reported_and_audited() {
    let options = StubOptions {
        refuse_deletes: true,
        ..StubOptions::default()
    };
    let stub = spawn_todo_stub_with(options).unwrap();
    let sink = Arc::new(RecordingSink::default());
    let harness =
        harness_for(stub.base_url(), ServerProfile::Documented, Arc::clone(&sink)).unwrap();

    let payload = TodoPayload::titled("sticky");
    let err = harness.with_fixture(FixtureKind::Todo, &payload, |_| Ok(())).unwrap_err();
    assert!(matches!(err, HarnessError::Cleanup { kind: "todo", .. }), "got {err}");
    assert!(sink.cleanups().is_empty());

    let guard = harness.fixture(FixtureKind::Todo, &TodoPayload::titled("dropped")).unwrap();
    let id = guard.id().get();
    drop(guard);
    assert_eq!(sink.cleanups(), vec![("todo".to_string(), id)]);
    assert_eq!(stub.live("todos"), 2);
}

#[test]
fn with_cleanup_runs_after_a_failing_body() {
    let stub = spawn_todo_stub().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let harness = harness_for(stub.base_url(), ServerProfile::Observed, Arc::clone(&sink)).unwrap();
    let id = harness.create_fixture(FixtureKind::Todo, &TodoPayload::titled("restored")).unwrap();

    let result: Result<(), HarnessError> = harness.with_cleanup(
        FixtureKind::Todo,
        id,
        || Err(HarnessError::Artifact("body failed".to_string())),
        || harness.delete_fixture(FixtureKind::Todo, id),
    );
    assert!(matches!(result, Err(HarnessError::Artifact(_))));
    assert_eq!(stub.live("todos"), 0);

    let cleanup = || harness.delete_fixture(FixtureKind::Todo, id);
    let err = harness.with_cleanup(FixtureKind::Todo, id, || Ok(()), cleanup).unwrap_err();
    assert!(matches!(err, HarnessError::Cleanup { kind: "todo", .. }), "got {err}");
    assert!(sink.cleanups().is_empty());
}

#[test]
fn disarmed_guards_leave_the_resource_alone() {
    let stub = spawn_todo_stub().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let harness = harness_for(stub.base_url(), ServerProfile::Observed, sink).unwrap();

    let guard = harness.fixture(FixtureKind::Project, &json!({"title": "kept"})).unwrap();
    let id = guard.disarm();
    assert_eq!(stub.live("projects"), 1);
    harness.delete_fixture(FixtureKind::Project, id).unwrap();
    assert_eq!(stub.live("projects"), 0);

    let err = harness.delete_fixture(FixtureKind::Project, id).unwrap_err();
    assert!(matches!(err, HarnessError::UnexpectedStatus { actual: 404, .. }));
}

#[test]
fn method_not_allowed_requires_405() {
    let stub = spawn_todo_stub().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let harness = harness_for(stub.base_url(), ServerProfile::Observed, sink).unwrap();

    harness.assert_method_not_allowed(Method::PUT, "/todos", Some(&json!({"title": "x"}))).unwrap();
    harness.assert_method_not_allowed(Method::PATCH, "/projects", None).unwrap();

    let err = harness.assert_method_not_allowed(Method::GET, "/todos", None).unwrap_err();
    assert!(matches!(err, HarnessError::UnexpectedStatus { actual: 200, .. }));
}

#[test]
fn transcript_records_every_exchange_in_order() {
    let stub = spawn_todo_stub().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let harness = harness_for(stub.base_url(), ServerProfile::Observed, sink).unwrap();

    harness.client().get("/").unwrap();
    harness.client().post("/todos", &json!({"title": "logged"})).unwrap();

    let transcript = harness.client().transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].sequence, 1);
    assert_eq!(transcript[1].method, "POST");
    assert_eq!(transcript[1].status, Some(201));
    assert_eq!(transcript[1].request, Some(json!({"title": "logged"})));
    assert_eq!(transcript[1].response["title"], "logged");
}

#[test]
fn shutdown_probe_reports_acknowledged_and_already_down() {
    let stub = spawn_todo_stub().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let harness = harness_for(stub.base_url(), ServerProfile::Observed, Arc::clone(&sink)).unwrap();

    assert_eq!(harness.shutdown_probe(), ShutdownOutcome::Acknowledged(200));
    assert!(stub.requests().iter().any(|request| request.path == "/shutdown"));
    assert_eq!(sink.events().last().map(String::as_str), Some("shutdown_probe"));

    let dead = harness_for(&dead_base_url().unwrap(), ServerProfile::Observed, sink).unwrap();
    assert_eq!(dead.shutdown_probe(), ShutdownOutcome::AlreadyDown);
}
