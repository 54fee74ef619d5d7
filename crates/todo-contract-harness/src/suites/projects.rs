// crates/todo-contract-harness/src/suites/projects.rs
// ============================================================================
// Module: Projects Collection Suite
// Description: Contract scenarios for `/projects`.
// Purpose: Cover listing, creation, HEAD/OPTIONS, and rejected collection verbs.
// Dependencies: crate::harness, crate::expectation, serde_json
// ============================================================================

use reqwest::Method;
use serde_json::json;

use crate::error::HarnessResult;
use crate::expectation::ContractCheck;
use crate::expectation::Expectation;
use crate::harness::ContractHarness;
use crate::model::FixtureKind;
use crate::model::Project;
use crate::model::ProjectPayload;
use crate::model::entities_of;
use crate::model::single_entity;
use crate::scenario::Scenario;
use crate::scenario::Suite;
use crate::suites::violation;

/// `/projects` scenarios.
pub const SUITE: Suite = Suite {
    name: "projects",
    endpoint: "/projects",
    scenarios: &[
        Scenario::new(
            "get_projects",
            "GET /projects lists a freshly created project",
            get_projects,
        ),
        Scenario::new(
            "post_projects",
            "POST /projects returns 201 and a readable id",
            post_projects,
        ),
        Scenario::new(
            "post_projects_title_only",
            "POST /projects with only a title returns 201",
            post_projects_title_only,
        ),
        Scenario::new(
            "project_matches_schema",
            "GET /projects/:id matches the project schema",
            project_matches_schema,
        ),
        Scenario::new("head_projects", "HEAD /projects answers 200", head_projects),
        Scenario::new(
            "put_projects_not_allowed",
            "PUT /projects answers 405",
            put_projects_not_allowed,
        ),
        Scenario::new(
            "patch_projects_not_allowed",
            "PATCH /projects answers 405",
            patch_projects_not_allowed,
        ),
        Scenario::new(
            "delete_projects_not_allowed",
            "DELETE /projects answers 405",
            delete_projects_not_allowed,
        ),
        Scenario::new("options_projects", "OPTIONS /projects answers 200", options_projects),
    ],
};

fn get_projects(harness: &ContractHarness) -> HarnessResult<()> {
    let payload = ProjectPayload::titled("Test Project for GET");
    harness.with_fixture(FixtureKind::Project, &payload, |id| {
        let response = harness.assert_contract(&ContractCheck::get("/projects"))?;
        let projects: Vec<Project> =
            entities_of(FixtureKind::Project, &response.json()?, &response.context())?;
        if projects.iter().any(|project| project.id == id) {
            return Ok(());
        }
        Err(violation(
            &response,
            "listing contains the created project",
            format!("project {id} missing from {} listed", projects.len()),
        ))
    })
}

fn post_projects(harness: &ContractHarness) -> HarnessResult<()> {
    let payload = ProjectPayload::new("Test Project for POST", "Created by the contract suite");
    harness.with_fixture(FixtureKind::Project, &payload, |id| {
        let path = FixtureKind::Project.item_path(id);
        let response = harness.assert_contract(&ContractCheck::get(path))?;
        let project: Project =
            single_entity(FixtureKind::Project, &response.json()?, &response.context())?;
        if project.title != "Test Project for POST" {
            let detail = format!("title was {:?}", project.title);
            return Err(violation(&response, "title round-trips", detail));
        }
        Ok(())
    })
}

fn post_projects_title_only(harness: &ContractHarness) -> HarnessResult<()> {
    harness.with_fixture(FixtureKind::Project, &ProjectPayload::titled("Patch Project"), |id| {
        harness.assert_contract(&ContractCheck::get(FixtureKind::Project.item_path(id)))?;
        Ok(())
    })
}

fn project_matches_schema(harness: &ContractHarness) -> HarnessResult<()> {
    harness.with_fixture(FixtureKind::Project, &ProjectPayload::default(), |id| {
        harness.assert_contract(
            &ContractCheck::get(FixtureKind::Project.item_path(id))
                .expect(Expectation::MatchesSchema(FixtureKind::Project)),
        )?;
        Ok(())
    })
}

fn head_projects(harness: &ContractHarness) -> HarnessResult<()> {
    let payload = ProjectPayload::titled("Test Project for HEAD");
    harness.with_fixture(FixtureKind::Project, &payload, |_| {
        harness.assert_contract(&ContractCheck::head("/projects"))?;
        Ok(())
    })
}

fn put_projects_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    let body = json!({"title": "Put Project"});
    harness.assert_method_not_allowed(Method::PUT, "/projects", Some(&body))?;
    Ok(())
}

fn patch_projects_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    let body = json!({"title": "Patch Project"});
    harness.assert_method_not_allowed(Method::PATCH, "/projects", Some(&body))?;
    Ok(())
}

fn delete_projects_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::DELETE, "/projects", None)?;
    Ok(())
}

fn options_projects(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::options("/projects"))?;
    Ok(())
}
