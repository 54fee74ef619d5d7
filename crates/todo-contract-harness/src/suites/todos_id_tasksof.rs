// crates/todo-contract-harness/src/suites/todos_id_tasksof.rs
// ============================================================================
// Module: Todo Projects Relation Suite
// Description: Contract scenarios for `/todos/:id/tasksof`.
// Purpose: Cover the todo-to-project relation collection.
// Dependencies: crate::harness, crate::expectation, serde_json
// ============================================================================

use reqwest::Method;
use serde_json::json;

use crate::error::HarnessResult;
use crate::expectation::ContractCheck;
use crate::expectation::Expectation;
use crate::harness::ContractHarness;
use crate::model::FixtureKind;
use crate::model::created_id;
use crate::profile::ServerProfile::Documented;
use crate::profile::ServerProfile::Observed;
use crate::scenario::Scenario;
use crate::scenario::Suite;
use crate::suites::SEEDED_TASKSOF;
use crate::suites::with_restored_links;

/// `/todos/:id/tasksof` scenarios.
pub const SUITE: Suite = Suite {
    name: "todos_id_tasksof",
    endpoint: "/todos/:id/tasksof",
    scenarios: &[
        Scenario::new(
            "get_tasksof_array",
            "GET /todos/1/tasksof returns a non-empty array",
            get_tasksof_array,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "get_tasksof_enveloped",
            "GET /todos/1/tasksof returns a non-empty `projects` array",
            get_tasksof_enveloped,
        )
        .only(Observed)
        .seeded(),
        Scenario::new(
            "get_missing_todo_tasksof",
            "GET /todos/999/tasksof answers 404",
            get_missing_todo_tasksof,
        )
        .only(Documented),
        Scenario::new(
            "get_missing_todo_tasksof_ok",
            "GET /todos/999/tasksof and /todos/-1/tasksof answer 200",
            get_missing_todo_tasksof_ok,
        )
        .only(Observed),
        Scenario::new(
            "put_tasksof_not_allowed",
            "PUT /todos/1/tasksof answers 405",
            put_tasksof_not_allowed,
        )
        .seeded(),
        Scenario::new(
            "post_tasksof_link",
            "POST {project_id: 2} answers 200 with tasksof",
            post_tasksof_link,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "post_tasksof_link_rejected",
            "POST {project_id: 2} answers 400",
            post_tasksof_link_rejected,
        )
        .only(Observed)
        .seeded(),
        Scenario::new(
            "post_tasksof_empty_rejected",
            "POST {} answers 400",
            post_tasksof_empty_rejected,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "post_tasksof_empty_creates_project",
            "POST {} answers 201 and creates a project",
            post_tasksof_empty_creates_project,
        )
        .only(Observed)
        .seeded(),
        Scenario::new(
            "post_tasksof_string_body",
            "POST a JSON string answers 400",
            post_tasksof_string_body,
        )
        .seeded(),
        Scenario::new(
            "delete_tasksof_not_allowed",
            "DELETE /todos/1/tasksof answers 405",
            delete_tasksof_not_allowed,
        )
        .seeded(),
        Scenario::new(
            "options_tasksof_not_allowed",
            "OPTIONS /todos/1/tasksof answers 405",
            options_tasksof_not_allowed,
        )
        .only(Documented)
        .seeded(),
        Scenario::new("options_tasksof", "OPTIONS /todos/1/tasksof answers 200", options_tasksof)
            .only(Observed)
            .seeded(),
        Scenario::new(
            "patch_tasksof_not_allowed",
            "PATCH /todos/1/tasksof answers 405",
            patch_tasksof_not_allowed,
        )
        .seeded(),
        Scenario::new(
            "head_tasksof_content_length",
            "HEAD /todos/1/tasksof carries Content-Length",
            head_tasksof_content_length,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "head_tasksof_no_content_length",
            "HEAD /todos/1/tasksof omits Content-Length",
            head_tasksof_no_content_length,
        )
        .only(Observed)
        .seeded(),
        Scenario::new(
            "head_missing_todo_tasksof",
            "HEAD /todos/999/tasksof answers 404",
            head_missing_todo_tasksof,
        )
        .only(Documented),
        Scenario::new(
            "post_tasksof_minimal",
            "POST {project_id: 1} answers 200",
            post_tasksof_minimal,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "post_tasksof_minimal_rejected",
            "POST {project_id: 1} answers 400",
            post_tasksof_minimal_rejected,
        )
        .only(Observed)
        .seeded(),
        Scenario::new(
            "post_tasksof_large_id",
            "POST {project_id: 999999999} echoes the id",
            post_tasksof_large_id,
        )
        .only(Documented)
        .seeded(),
    ],
};

/// Relation on the seeded todo.
const TASKSOF: &str = SEEDED_TASKSOF.path;

/// Relation on a todo assumed absent.
const MISSING_TASKSOF: &str = "/todos/999/tasksof";

/// Largest project id the boundary scenario sends.
const LARGE_ID: u64 = 999_999_999;

fn get_tasksof_array(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::get(TASKSOF).expect(Expectation::NonEmptyArrayAt("")))?;
    Ok(())
}

fn get_tasksof_enveloped(harness: &ContractHarness) -> HarnessResult<()> {
    let projects = Expectation::NonEmptyArrayAt("/projects");
    harness.assert_contract(&ContractCheck::get(TASKSOF).expect(projects))?;
    Ok(())
}

fn get_missing_todo_tasksof(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::get(MISSING_TASKSOF).status(404))?;
    Ok(())
}

fn get_missing_todo_tasksof_ok(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::get(MISSING_TASKSOF))?;
    harness.assert_contract(&ContractCheck::get("/todos/-1/tasksof"))?;
    Ok(())
}

fn put_tasksof_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::PUT, TASKSOF, Some(&json!({})))?;
    Ok(())
}

fn post_tasksof_link(harness: &ContractHarness) -> HarnessResult<()> {
    with_restored_links(harness, SEEDED_TASKSOF, || {
        let check = ContractCheck::post(TASKSOF)
            .body(json!({"project_id": 2}))
            .expect(Expectation::FieldPresent("/tasksof"));
        harness.assert_contract(&check)?;
        Ok(())
    })
}

fn post_tasksof_link_rejected(harness: &ContractHarness) -> HarnessResult<()> {
    let body = json!({"project_id": 2});
    harness.assert_contract(&ContractCheck::post(TASKSOF).body(body).status(400))?;
    Ok(())
}

fn post_tasksof_empty_rejected(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::post(TASKSOF).body(json!({})).status(400))?;
    Ok(())
}

fn post_tasksof_empty_creates_project(harness: &ContractHarness) -> HarnessResult<()> {
    let response =
        harness.assert_contract(&ContractCheck::post(TASKSOF).body(json!({})).status(201))?;
    let project = created_id(&response.json()?, &response.context())?;
    harness.adopt(FixtureKind::Project, project).release()
}

fn post_tasksof_string_body(harness: &ContractHarness) -> HarnessResult<()> {
    let body = json!("invalid_data_type");
    harness.assert_contract(&ContractCheck::post(TASKSOF).body(body).status(400))?;
    Ok(())
}

fn delete_tasksof_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::DELETE, TASKSOF, None)?;
    Ok(())
}

fn options_tasksof_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::OPTIONS, TASKSOF, None)?;
    Ok(())
}

fn options_tasksof(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::options(TASKSOF))?;
    Ok(())
}

fn patch_tasksof_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    let body = json!({"project_id": 3});
    harness.assert_method_not_allowed(Method::PATCH, TASKSOF, Some(&body))?;
    Ok(())
}

fn head_tasksof_content_length(harness: &ContractHarness) -> HarnessResult<()> {
    let length = Expectation::HeaderPresent("content-length");
    harness.assert_contract(&ContractCheck::head(TASKSOF).expect(length))?;
    Ok(())
}

fn head_tasksof_no_content_length(harness: &ContractHarness) -> HarnessResult<()> {
    let no_length = Expectation::HeaderAbsent("content-length");
    harness.assert_contract(&ContractCheck::head(TASKSOF).expect(no_length))?;
    Ok(())
}

fn head_missing_todo_tasksof(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::head(MISSING_TASKSOF).status(404))?;
    Ok(())
}

fn post_tasksof_minimal(harness: &ContractHarness) -> HarnessResult<()> {
    with_restored_links(harness, SEEDED_TASKSOF, || {
        harness.assert_contract(&ContractCheck::post(TASKSOF).body(json!({"project_id": 1})))?;
        Ok(())
    })
}

fn post_tasksof_minimal_rejected(harness: &ContractHarness) -> HarnessResult<()> {
    let body = json!({"project_id": 1});
    harness.assert_contract(&ContractCheck::post(TASKSOF).body(body).status(400))?;
    Ok(())
}

fn post_tasksof_large_id(harness: &ContractHarness) -> HarnessResult<()> {
    with_restored_links(harness, SEEDED_TASKSOF, || {
        harness.assert_contract(
            &ContractCheck::post(TASKSOF)
                .body(json!({"project_id": LARGE_ID}))
                .expect(Expectation::FieldEquals("/project_id", json!(LARGE_ID))),
        )?;
        Ok(())
    })
}
