// crates/todo-contract-harness/src/suites/todos_id_tasksof_id.rs
// ============================================================================
// Module: Todo Project Link Suite
// Description: Contract scenarios for `/todos/:id/tasksof/:relId`.
// Purpose: Cover deleting one todo-project link and the verbs it refuses.
// Dependencies: crate::harness, crate::expectation, serde_json
// ============================================================================

//! ## Overview
//! The documented variant deletes the seeded link `/todos/1/tasksof/1` and
//! re-links it afterwards; the observed variant builds its own todo, project,
//! and link.

use reqwest::Method;
use serde_json::json;

use crate::error::HarnessResult;
use crate::expectation::ContractCheck;
use crate::expectation::Expectation;
use crate::harness::ContractHarness;
use crate::model::FixtureKind;
use crate::model::ProjectPayload;
use crate::model::TodoPayload;
use crate::profile::ServerProfile::Documented;
use crate::profile::ServerProfile::Observed;
use crate::scenario::Scenario;
use crate::scenario::Suite;
use crate::suites::SEEDED_TASKSOF;
use crate::suites::with_restored_links;

/// `/todos/:id/tasksof/:relId` scenarios.
pub const SUITE: Suite = Suite {
    name: "todos_id_tasksof_id",
    endpoint: "/todos/:id/tasksof/:relId",
    scenarios: &[
        Scenario::new(
            "get_link_not_allowed",
            "GET /todos/1/tasksof/1 answers 405",
            get_link_not_allowed,
        )
        .seeded(),
        Scenario::new(
            "put_link_not_allowed",
            "PUT /todos/1/tasksof/1 answers 405",
            put_link_not_allowed,
        )
        .seeded(),
        Scenario::new(
            "post_link_not_allowed",
            "POST /todos/1/tasksof/1 answers 405",
            post_link_not_allowed,
        )
        .seeded(),
        Scenario::new(
            "options_link_not_allowed",
            "OPTIONS /todos/1/tasksof/1 answers 405",
            options_link_not_allowed,
        )
        .seeded(),
        Scenario::new(
            "patch_link_not_allowed",
            "PATCH /todos/1/tasksof/1 answers 405",
            patch_link_not_allowed,
        )
        .seeded(),
        Scenario::new(
            "head_link_not_allowed",
            "HEAD /todos/1/tasksof/1 answers 405",
            head_link_not_allowed,
        )
        .seeded(),
        Scenario::new(
            "delete_seeded_link",
            "DELETE /todos/1/tasksof/1 answers 200 without tasksof",
            delete_seeded_link,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "delete_link_then_missing",
            "DELETE a fresh link answers 200, then 404",
            delete_link_then_missing,
        )
        .only(Observed),
        Scenario::new(
            "delete_missing_link",
            "DELETE /todos/1/tasksof/999 answers 404",
            delete_missing_link,
        )
        .seeded(),
    ],
};

/// Seeded link between todo 1 and project 1.
const SEEDED_LINK: &str = "/todos/1/tasksof/1";

fn get_link_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::GET, SEEDED_LINK, None)?;
    Ok(())
}

fn put_link_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::PUT, SEEDED_LINK, None)?;
    Ok(())
}

fn post_link_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::POST, SEEDED_LINK, None)?;
    Ok(())
}

fn options_link_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::OPTIONS, SEEDED_LINK, None)?;
    Ok(())
}

fn patch_link_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    let body = json!({"project_id": 2});
    harness.assert_method_not_allowed(Method::PATCH, SEEDED_LINK, Some(&body))?;
    Ok(())
}

fn head_link_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::HEAD, SEEDED_LINK, None)?;
    Ok(())
}

fn delete_seeded_link(harness: &ContractHarness) -> HarnessResult<()> {
    with_restored_links(harness, SEEDED_TASKSOF, || {
        let unlinked = Expectation::FieldAbsent("tasksof");
        harness.assert_contract(&ContractCheck::delete(SEEDED_LINK).expect(unlinked))?;
        Ok(())
    })
}

fn delete_link_then_missing(harness: &ContractHarness) -> HarnessResult<()> {
    let todo = harness.fixture(FixtureKind::Todo, &TodoPayload::titled("Todo for link DELETE"))?;
    let project =
        harness.fixture(FixtureKind::Project, &ProjectPayload::titled("Project for link DELETE"))?;
    let relation = format!("{}/tasksof", todo.path());
    let link_body = json!({"id": project.id().to_string()});
    harness.assert_contract(&ContractCheck::post(relation.as_str()).body(link_body).status(201))?;

    let link = format!("{relation}/{}", project.id());
    harness.assert_contract(&ContractCheck::delete(link.as_str()))?;
    harness.assert_contract(&ContractCheck::delete(link.as_str()).status(404))?;
    project.release()?;
    todo.release()
}

fn delete_missing_link(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::delete("/todos/1/tasksof/999").status(404))?;
    Ok(())
}
