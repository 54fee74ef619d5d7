// crates/todo-contract-harness/src/suites/projects_id_categories.rs
// ============================================================================
// Module: Project Categories Suite
// Description: Contract scenarios for `/projects/:id/categories`.
// Purpose: Cover category creation through a project and rejected verbs.
// Dependencies: crate::harness, crate::expectation, serde_json
// ============================================================================

use reqwest::Method;

use crate::error::HarnessResult;
use crate::expectation::ContractCheck;
use crate::harness::ContractHarness;
use crate::model::CategoryPayload;
use crate::model::FixtureId;
use crate::model::FixtureKind;
use crate::model::ProjectPayload;
use crate::model::created_id;
use crate::model::payload_json;
use crate::scenario::Scenario;
use crate::scenario::Suite;

/// `/projects/:id/categories` scenarios.
pub const SUITE: Suite = Suite {
    name: "projects_id_categories",
    endpoint: "/projects/:id/categories",
    scenarios: &[
        Scenario::new(
            "post_project_category",
            "POST /projects/:id/categories answers 201",
            post_project_category,
        ),
        Scenario::new(
            "get_project_categories",
            "GET /projects/:id/categories answers 200",
            get_project_categories,
        ),
        Scenario::new(
            "put_project_categories_not_allowed",
            "PUT /projects/:id/categories answers 405",
            put_project_categories_not_allowed,
        ),
        Scenario::new(
            "patch_project_categories_not_allowed",
            "PATCH /projects/:id/categories answers 405",
            patch_project_categories_not_allowed,
        ),
        Scenario::new(
            "options_project_categories",
            "OPTIONS /projects/:id/categories answers 200",
            options_project_categories,
        ),
    ],
};

/// Relation path for a project.
fn categories_path(id: FixtureId) -> String {
    format!("{}/categories", FixtureKind::Project.item_path(id))
}

fn post_project_category(harness: &ContractHarness) -> HarnessResult<()> {
    let payload = ProjectPayload::titled("Test Project for POST Categories");
    harness.with_fixture(FixtureKind::Project, &payload, |id| {
        let body = payload_json(&CategoryPayload::new("Test Category", "Category description"));
        let create = ContractCheck::post(categories_path(id)).body(body).status(201);
        let response = harness.assert_contract(&create)?;
        let category = created_id(&response.json()?, &response.context())?;
        let _category = harness.adopt(FixtureKind::Category, category);
        Ok(())
    })
}

fn get_project_categories(harness: &ContractHarness) -> HarnessResult<()> {
    let payload = ProjectPayload::titled("Test Project for GET Categories");
    harness.with_fixture(FixtureKind::Project, &payload, |id| {
        let response = harness.assert_contract(&ContractCheck::get(categories_path(id)))?;
        response.json()?;
        Ok(())
    })
}

fn put_project_categories_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.with_fixture(FixtureKind::Project, &ProjectPayload::default(), |id| {
        harness.assert_method_not_allowed(Method::PUT, &categories_path(id), None)?;
        Ok(())
    })
}

fn patch_project_categories_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.with_fixture(FixtureKind::Project, &ProjectPayload::default(), |id| {
        harness.assert_method_not_allowed(Method::PATCH, &categories_path(id), None)?;
        Ok(())
    })
}

fn options_project_categories(harness: &ContractHarness) -> HarnessResult<()> {
    harness.with_fixture(FixtureKind::Project, &ProjectPayload::default(), |id| {
        harness.assert_contract(&ContractCheck::options(categories_path(id)))?;
        Ok(())
    })
}
