// crates/todo-contract-harness/src/suites/projects_id.rs
// ============================================================================
// Module: Project Item Suite
// Description: Contract scenarios for `/projects/:id`.
// Purpose: Cover read, replace, delete, and rejected item verbs.
// Dependencies: crate::harness, crate::expectation, serde_json
// ============================================================================

use reqwest::Method;
use serde_json::json;

use crate::error::HarnessResult;
use crate::expectation::ContractCheck;
use crate::harness::ContractHarness;
use crate::model::FixtureKind;
use crate::model::Project;
use crate::model::ProjectPayload;
use crate::model::payload_json;
use crate::model::single_entity;
use crate::scenario::Scenario;
use crate::scenario::Suite;
use crate::suites::violation;

/// `/projects/:id` scenarios.
pub const SUITE: Suite = Suite {
    name: "projects_id",
    endpoint: "/projects/:id",
    scenarios: &[
        Scenario::new(
            "get_project_by_id",
            "GET /projects/:id answers 200 for a created project",
            get_project_by_id,
        ),
        Scenario::new(
            "put_project_by_id",
            "PUT /projects/:id replaces values that GET returns verbatim",
            put_project_by_id,
        ),
        Scenario::new(
            "delete_project_by_id",
            "DELETE /projects/:id, then GET and DELETE answer 404",
            delete_project_by_id,
        ),
        Scenario::new(
            "patch_project_by_id_not_allowed",
            "PATCH /projects/:id answers 405",
            patch_project_by_id_not_allowed,
        ),
        Scenario::new(
            "options_project_by_id",
            "OPTIONS /projects/:id answers 200",
            options_project_by_id,
        ),
    ],
};

fn get_project_by_id(harness: &ContractHarness) -> HarnessResult<()> {
    let payload = ProjectPayload::titled("Test Project for GET by ID");
    harness.with_fixture(FixtureKind::Project, &payload, |id| {
        harness.assert_contract(&ContractCheck::get(FixtureKind::Project.item_path(id)))?;
        Ok(())
    })
}

fn put_project_by_id(harness: &ContractHarness) -> HarnessResult<()> {
    let payload = ProjectPayload::titled("Test Project for PUT");
    harness.with_fixture(FixtureKind::Project, &payload, |id| {
        let path = FixtureKind::Project.item_path(id);
        let body = payload_json(&ProjectPayload::new("Updated Project", "Updated description"));
        let replace = ContractCheck::put(path.as_str()).body(body).any_status(&[200, 204]);
        harness.assert_contract(&replace)?;

        let response = harness.assert_contract(&ContractCheck::get(path.as_str()))?;
        let project: Project =
            single_entity(FixtureKind::Project, &response.json()?, &response.context())?;
        if project.title != "Updated Project" || project.description != "Updated description" {
            return Err(violation(
                &response,
                "PUT values read back verbatim",
                format!("got title {:?}, description {:?}", project.title, project.description),
            ));
        }
        Ok(())
    })
}

fn delete_project_by_id(harness: &ContractHarness) -> HarnessResult<()> {
    let payload = ProjectPayload::titled("Test Project for DELETE");
    let guard = harness.fixture(FixtureKind::Project, &payload)?;
    let path = guard.path();
    let id = guard.disarm();
    harness.delete_fixture(FixtureKind::Project, id)?;
    harness.assert_contract(&ContractCheck::get(path.as_str()).status(404))?;
    harness.assert_contract(&ContractCheck::delete(path.as_str()).status(404))?;
    Ok(())
}

fn patch_project_by_id_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.with_fixture(FixtureKind::Project, &ProjectPayload::titled("Patch Project"), |id| {
        let path = FixtureKind::Project.item_path(id);
        let body = json!({"title": "Patched Project"});
        harness.assert_method_not_allowed(Method::PATCH, &path, Some(&body))?;
        Ok(())
    })
}

fn options_project_by_id(harness: &ContractHarness) -> HarnessResult<()> {
    harness.with_fixture(FixtureKind::Project, &ProjectPayload::titled("Options Project"), |id| {
        harness.assert_contract(&ContractCheck::options(FixtureKind::Project.item_path(id)))?;
        Ok(())
    })
}
