// crates/todo-contract-harness/src/suites/mod.rs
// ============================================================================
// Module: Scenario Catalog
// Description: Contract scenarios for every Todo Manager endpoint group.
// Purpose: Provide the ordered suite list used by the runner and live tests.
// Dependencies: crate::harness, crate::expectation
// ============================================================================

//! ## Overview
//! One module per endpoint group. Where two server builds disagree, both
//! expectations are kept as separate scenarios pinned to a
//! [`ServerProfile`]; nothing is harmonized.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod projects;
pub mod projects_id;
pub mod projects_id_categories;
pub mod root;
pub mod todos;
pub mod todos_id;
pub mod todos_id_categories;
pub mod todos_id_tasksof;
pub mod todos_id_tasksof_id;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::json;

use crate::error::HarnessError;
use crate::error::HarnessResult;
use crate::harness::ContractHarness;
use crate::model::FixtureId;
use crate::model::FixtureKind;
use crate::model::Todo;
use crate::model::TodoPayload;
use crate::model::created_id;
use crate::model::entity_values;
use crate::model::payload_json;
use crate::model::single_entity;
use crate::profile::ServerProfile;
use crate::response::ApiResponse;
use crate::scenario::Scenario;
use crate::scenario::Suite;

// ============================================================================
// SECTION: Shared Paths
// ============================================================================

/// First seeded todo.
pub(crate) const SEEDED_TODO: &str = "/todos/1";

/// Todo id assumed absent on a fresh server.
pub(crate) const MISSING_TODO: &str = "/todos/999";

/// Relation on the seeded todo whose links documented scenarios change.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SeedRelation {
    /// Relation collection path.
    pub(crate) path: &'static str,
    /// Kind of the linked entities.
    pub(crate) kind: FixtureKind,
    /// Body key that links an entity by id.
    pub(crate) link_field: &'static str,
}

/// Projects linked to the seeded todo.
pub(crate) const SEEDED_TASKSOF: SeedRelation = SeedRelation {
    path: "/todos/1/tasksof",
    kind: FixtureKind::Project,
    link_field: "project_id",
};

/// Categories linked to the seeded todo.
pub(crate) const SEEDED_CATEGORIES: SeedRelation = SeedRelation {
    path: "/todos/1/categories",
    kind: FixtureKind::Category,
    link_field: "category_id",
};

/// Every suite, in execution order.
static CATALOG: [Suite; 9] = [
    root::SUITE,
    projects::SUITE,
    projects_id::SUITE,
    projects_id_categories::SUITE,
    todos::SUITE,
    todos_id::SUITE,
    todos_id_categories::SUITE,
    todos_id_tasksof::SUITE,
    todos_id_tasksof_id::SUITE,
];

/// Returns every suite in execution order.
#[must_use]
pub fn catalog() -> &'static [Suite] {
    &CATALOG
}

/// Looks up a suite by name.
#[must_use]
pub fn find_suite(name: &str) -> Option<&'static Suite> {
    CATALOG.iter().find(|suite| suite.name == name)
}

/// Looks up a scenario by suite and scenario name.
#[must_use]
pub fn find_scenario(suite: &str, scenario: &str) -> Option<&'static Scenario> {
    find_suite(suite).and_then(|suite| suite.scenario(scenario))
}

// ============================================================================
// SECTION: Seed Restoration
// ============================================================================

/// Runs `body` against a todo it may mutate. Under the documented profile
/// todos cannot be deleted, so `body` gets the seeded todo and its title,
/// description, and `doneStatus` are put back afterwards. Otherwise `body`
/// gets a scoped fixture.
///
/// # Errors
///
/// Returns `body`'s error first; a failed restore after a passing body is
/// returned as [`HarnessError::Cleanup`].
pub(crate) fn with_mutable_todo<F>(harness: &ContractHarness, body: F) -> HarnessResult<()>
where
    F: FnOnce(&str) -> HarnessResult<()>,
{
    match harness.profile() {
        ServerProfile::Documented => {
            let seed = read_todo(harness, SEEDED_TODO)?;
            harness.with_cleanup(
                FixtureKind::Todo,
                seed.id,
                || body(SEEDED_TODO),
                || restore_todo(harness, &seed),
            )
        }
        ServerProfile::Observed => harness.with_fixture(
            FixtureKind::Todo,
            &TodoPayload::new("Contract fixture", "Mutable todo for item checks"),
            |id| body(&FixtureKind::Todo.item_path(id)),
        ),
    }
}

/// Runs `body`, then makes `relation` link exactly the entities it linked
/// before: links `body` added are deleted and links it removed re-posted.
///
/// # Errors
///
/// Fails before `body` runs when the relation cannot be read; otherwise as
/// [`with_mutable_todo`].
pub(crate) fn with_restored_links<F>(
    harness: &ContractHarness,
    relation: SeedRelation,
    body: F,
) -> HarnessResult<()>
where
    F: FnOnce() -> HarnessResult<()>,
{
    let before = linked_ids(harness, relation)?;
    harness.with_cleanup(FixtureKind::Todo, FixtureId::SEED, body, || {
        restore_links(harness, relation, &before)
    })
}

/// Reads the todo at `path`.
fn read_todo(harness: &ContractHarness, path: &str) -> HarnessResult<Todo> {
    let response = harness.client().get(path)?;
    response.require_status(&[200])?;
    single_entity(FixtureKind::Todo, &response.json()?, &response.context())
}

/// Replaces the todo with its earlier values.
fn restore_todo(harness: &ContractHarness, seed: &Todo) -> HarnessResult<()> {
    let payload = TodoPayload {
        title: Some(seed.title.clone()),
        description: Some(seed.description.clone()),
        done_status: Some(seed.done_status),
    };
    harness
        .client()
        .put(&FixtureKind::Todo.item_path(seed.id), &payload_json(&payload))?
        .require_status(&[200, 204])
}

/// Ids of the entities `relation` currently links.
fn linked_ids(
    harness: &ContractHarness,
    relation: SeedRelation,
) -> HarnessResult<BTreeSet<FixtureId>> {
    let response = harness.client().get(relation.path)?;
    response.require_status(&[200])?;
    let context = response.context();
    entity_values(relation.kind, &response.json()?)
        .iter()
        .map(|entity| created_id(entity, &context))
        .collect()
}

/// Deletes links absent from `before` and re-posts links missing from now.
fn restore_links(
    harness: &ContractHarness,
    relation: SeedRelation,
    before: &BTreeSet<FixtureId>,
) -> HarnessResult<()> {
    let now = linked_ids(harness, relation)?;
    for id in now.difference(before) {
        harness.client().delete(&format!("{}/{id}", relation.path))?.require_status(&[200, 204])?;
    }
    for id in before.difference(&now) {
        let body = json!({ relation.link_field: id.get() });
        harness.client().post(relation.path, &body)?.require_status(&[200, 201])?;
    }
    Ok(())
}

/// Builds an expectation failure for a check done in scenario code.
pub(crate) fn violation(response: &ApiResponse, expectation: &str, detail: String) -> HarnessError {
    HarnessError::Expectation {
        method: response.method().to_string(),
        url: response.url().to_string(),
        expectation: expectation.to_string(),
        detail,
    }
}
