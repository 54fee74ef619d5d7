// crates/todo-contract-harness/src/suites/todos.rs
// ============================================================================
// Module: Todos Collection Suite
// Description: Contract scenarios for `/todos`.
// Purpose: Cover listing, filtering, creation boundaries, and collection verbs.
// Dependencies: crate::harness, crate::expectation, serde_json
// ============================================================================

//! ## Overview
//! Listing shape, query handling, `OPTIONS`, and `HEAD` framing differ between
//! server builds, so those checks come in documented and observed variants.
//! Todos created here are adopted by a guard; under the documented profile
//! the guard's delete is refused and only audited.

use reqwest::Method;
use serde_json::json;

use crate::error::HarnessResult;
use crate::expectation::ContractCheck;
use crate::expectation::Expectation;
use crate::harness::ContractHarness;
use crate::model::FixtureKind;
use crate::model::TodoPayload;
use crate::model::created_id;
use crate::model::payload_json;
use crate::profile::ServerProfile::Documented;
use crate::profile::ServerProfile::Observed;
use crate::scenario::Scenario;
use crate::scenario::Suite;

/// `/todos` scenarios.
pub const SUITE: Suite = Suite {
    name: "todos",
    endpoint: "/todos",
    scenarios: &[
        Scenario::new(
            "get_todos_seeded_count",
            "GET /todos returns the two seeded todos as a bare array",
            get_todos_seeded_count,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "get_todos_enveloped",
            "GET /todos returns a `todos` array",
            get_todos_enveloped,
        )
        .only(Observed),
        Scenario::new(
            "get_todos_invalid_param_rejected",
            "GET /todos?invalid_param answers 400",
            get_todos_invalid_param_rejected,
        )
        .only(Documented),
        Scenario::new(
            "get_todos_invalid_param_ignored",
            "GET /todos?invalid_param answers 200",
            get_todos_invalid_param_ignored,
        )
        .only(Observed),
        Scenario::new("put_todos_not_allowed", "PUT /todos answers 405", put_todos_not_allowed),
        Scenario::new("post_todos", "POST /todos answers 201 with an id", post_todos),
        Scenario::new(
            "post_todos_missing_title",
            "POST /todos without title answers 400 naming `title`",
            post_todos_missing_title,
        ),
        Scenario::new(
            "delete_todos_not_allowed",
            "DELETE /todos answers 405",
            delete_todos_not_allowed,
        ),
        Scenario::new(
            "options_todos_not_allowed",
            "OPTIONS /todos answers 405",
            options_todos_not_allowed,
        )
        .only(Documented),
        Scenario::new("options_todos", "OPTIONS /todos answers 200", options_todos).only(Observed),
        Scenario::new(
            "patch_todos_not_allowed",
            "PATCH /todos answers 405",
            patch_todos_not_allowed,
        ),
        Scenario::new(
            "head_todos_content_length",
            "HEAD /todos carries Content-Length",
            head_todos_content_length,
        )
        .only(Documented),
        Scenario::new(
            "head_todos_chunked",
            "HEAD /todos carries Transfer-Encoding",
            head_todos_chunked,
        )
        .only(Observed),
        Scenario::new(
            "head_todos_invalid_param_rejected",
            "HEAD /todos?invalid_param answers 400",
            head_todos_invalid_param_rejected,
        )
        .only(Documented),
        Scenario::new(
            "head_todos_invalid_param_ignored",
            "HEAD /todos?invalid_param answers 200",
            head_todos_invalid_param_ignored,
        )
        .only(Observed),
        Scenario::new(
            "post_todos_minimum_data",
            "POST /todos with only a title answers 201",
            post_todos_minimum_data,
        ),
        Scenario::new(
            "post_todos_maximum_data",
            "POST /todos with a 255-char title and 1000-char description answers 201",
            post_todos_maximum_data,
        ),
        Scenario::new(
            "get_todos_title_filter_bare",
            "GET /todos?title= returns only matching todos",
            get_todos_title_filter_bare,
        )
        .only(Documented),
        Scenario::new(
            "get_todos_title_filter_enveloped",
            "GET /todos?title= returns only matching todos",
            get_todos_title_filter_enveloped,
        )
        .only(Observed),
    ],
};

/// Query that servers either reject or ignore.
const INVALID_QUERY: &str = "/todos?invalid_param=test";

/// Title filter used by the query scenarios.
const TITLE_FILTER: &str = "/todos?title=Test%20Todo";

/// Posts `body`, requires 201 with an id, and adopts the created todo.
fn post_and_adopt(harness: &ContractHarness, body: serde_json::Value) -> HarnessResult<()> {
    let check = ContractCheck::post("/todos")
        .body(body)
        .status(201)
        .expect(Expectation::FieldPresent("/id"));
    let response = harness.assert_contract(&check)?;
    let id = created_id(&response.json()?, &response.context())?;
    let _todo = harness.adopt(FixtureKind::Todo, id);
    Ok(())
}

fn get_todos_seeded_count(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::get("/todos").expect(Expectation::ArrayLenAt("", 2)))?;
    Ok(())
}

fn get_todos_enveloped(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::get("/todos").expect(Expectation::ArrayAt("/todos")))?;
    Ok(())
}

fn get_todos_invalid_param_rejected(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::get(INVALID_QUERY).status(400))?;
    Ok(())
}

fn get_todos_invalid_param_ignored(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::get(INVALID_QUERY))?;
    Ok(())
}

fn put_todos_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::PUT, "/todos", Some(&json!({"title": "Test Todo"})))?;
    Ok(())
}

fn post_todos(harness: &ContractHarness) -> HarnessResult<()> {
    post_and_adopt(harness, payload_json(&TodoPayload::new("New Todo", "Description of new todo")))
}

fn post_todos_missing_title(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(
        &ContractCheck::post("/todos")
            .body(payload_json(&TodoPayload::untitled("Missing title")))
            .status(400)
            .expect(Expectation::TextContains("title".to_string())),
    )?;
    Ok(())
}

fn delete_todos_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::DELETE, "/todos", Some(&json!({"id": 1})))?;
    Ok(())
}

fn options_todos_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::OPTIONS, "/todos", None)?;
    Ok(())
}

fn options_todos(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::options("/todos"))?;
    Ok(())
}

fn patch_todos_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    let body = json!({"id": 1, "title": "Updated Todo"});
    harness.assert_method_not_allowed(Method::PATCH, "/todos", Some(&body))?;
    Ok(())
}

fn head_todos_content_length(harness: &ContractHarness) -> HarnessResult<()> {
    let length = Expectation::HeaderPresent("content-length");
    harness.assert_contract(&ContractCheck::head("/todos").expect(length))?;
    Ok(())
}

fn head_todos_chunked(harness: &ContractHarness) -> HarnessResult<()> {
    let chunked = Expectation::HeaderPresent("transfer-encoding");
    harness.assert_contract(&ContractCheck::head("/todos").expect(chunked))?;
    Ok(())
}

fn head_todos_invalid_param_rejected(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::head(INVALID_QUERY).status(400))?;
    Ok(())
}

fn head_todos_invalid_param_ignored(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::head(INVALID_QUERY))?;
    Ok(())
}

fn post_todos_minimum_data(harness: &ContractHarness) -> HarnessResult<()> {
    post_and_adopt(harness, payload_json(&TodoPayload::titled("Minimal Todo")))
}

fn post_todos_maximum_data(harness: &ContractHarness) -> HarnessResult<()> {
    let payload = TodoPayload::new(&"A".repeat(255), &"B".repeat(1000));
    post_and_adopt(harness, payload_json(&payload))
}

fn get_todos_title_filter_bare(harness: &ContractHarness) -> HarnessResult<()> {
    let matching = Expectation::AllItemsFieldEquals {
        array: "",
        field: "title",
        value: json!("Test Todo"),
    };
    harness.assert_contract(&ContractCheck::get(TITLE_FILTER).expect(matching))?;
    Ok(())
}

fn get_todos_title_filter_enveloped(harness: &ContractHarness) -> HarnessResult<()> {
    let matching = Expectation::AllItemsFieldEquals {
        array: "/todos",
        field: "title",
        value: json!("Test Todo"),
    };
    harness.assert_contract(&ContractCheck::get(TITLE_FILTER).expect(matching))?;
    Ok(())
}
