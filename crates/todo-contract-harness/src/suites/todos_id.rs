// crates/todo-contract-harness/src/suites/todos_id.rs
// ============================================================================
// Module: Todo Item Suite
// Description: Contract scenarios for `/todos/:id`.
// Purpose: Cover seeded reads, replace/amend round-trips, and item verbs.
// Dependencies: crate::harness, crate::expectation, serde_json
// ============================================================================

//! ## Overview
//! Documented servers refuse `DELETE /todos/:id`, so item mutations there run
//! against the seeded todo and put its values back afterwards; observed
//! servers get a scoped fixture instead (see [`with_mutable_todo`]).

use reqwest::Method;
use serde_json::Value;
use serde_json::json;

use crate::error::HarnessResult;
use crate::expectation::ContractCheck;
use crate::expectation::Expectation;
use crate::harness::ContractHarness;
use crate::model::FixtureKind;
use crate::model::Todo;
use crate::model::TodoPayload;
use crate::model::payload_json;
use crate::model::single_entity;
use crate::profile::ServerProfile::Documented;
use crate::profile::ServerProfile::Observed;
use crate::response::ApiResponse;
use crate::scenario::Scenario;
use crate::scenario::Suite;
use crate::suites::MISSING_TODO;
use crate::suites::SEEDED_TODO;
use crate::suites::violation;
use crate::suites::with_mutable_todo;

/// `/todos/:id` scenarios.
pub const SUITE: Suite = Suite {
    name: "todos_id",
    endpoint: "/todos/:id",
    scenarios: &[
        Scenario::new(
            "get_seeded_todo_title",
            "GET /todos/1 returns the seeded `scan paperwork` todo",
            get_seeded_todo_title,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "get_seeded_todo_enveloped",
            "GET /todos/1 returns a non-empty `todos` array",
            get_seeded_todo_enveloped,
        )
        .only(Observed)
        .seeded(),
        Scenario::new("get_missing_todo", "GET /todos/999 answers 404", get_missing_todo),
        Scenario::new(
            "put_todo_round_trip",
            "PUT /todos/:id returns and persists the new values",
            put_todo_round_trip,
        )
        .seeded_under(Documented),
        Scenario::new(
            "put_todo_missing_title",
            "PUT /todos/:id without title answers 400",
            put_todo_missing_title,
        )
        .seeded_under(Documented),
        Scenario::new(
            "post_todo_amend",
            "POST /todos/:id amends title and description",
            post_todo_amend,
        )
        .seeded_under(Documented),
        Scenario::new(
            "post_todo_title_only_rejected",
            "POST /todos/1 with only a title answers 400",
            post_todo_title_only_rejected,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "delete_todo_not_allowed",
            "DELETE /todos/1 answers 405",
            delete_todo_not_allowed,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "delete_todo_then_missing",
            "DELETE /todos/:id answers 200, then GET and DELETE answer 404",
            delete_todo_then_missing,
        )
        .only(Observed),
        Scenario::new(
            "options_todo_not_allowed",
            "OPTIONS /todos/1 answers 405",
            options_todo_not_allowed,
        )
        .only(Documented)
        .seeded(),
        Scenario::new("options_todo", "OPTIONS /todos/:id answers 200", options_todo)
            .only(Observed),
        Scenario::new(
            "patch_todo_not_allowed",
            "PATCH /todos/:id answers 405",
            patch_todo_not_allowed,
        )
        .seeded_under(Documented),
        Scenario::new(
            "head_todo_content_length",
            "HEAD /todos/1 carries Content-Length",
            head_todo_content_length,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "head_todo_chunked",
            "HEAD /todos/:id carries Transfer-Encoding",
            head_todo_chunked,
        )
        .only(Observed),
        Scenario::new("head_missing_todo", "HEAD /todos/999 answers 404", head_missing_todo),
        Scenario::new(
            "put_todo_minimal_data",
            "PUT /todos/:id with only a title answers 200",
            put_todo_minimal_data,
        )
        .seeded_under(Documented),
        Scenario::new(
            "put_todo_maximum_data",
            "PUT /todos/:id keeps a 255-char title and 1000-char description",
            put_todo_maximum_data,
        )
        .seeded_under(Documented),
    ],
};

/// Decodes the todo carried by `response` and compares title and description.
fn require_todo(
    response: &ApiResponse,
    title: &str,
    description: Option<&str>,
) -> HarnessResult<()> {
    let todo: Todo = single_entity(FixtureKind::Todo, &response.json()?, &response.context())?;
    if todo.title != title {
        let detail = format!("title was {:?}", excerpt(&todo.title));
        return Err(violation(response, "title matches", detail));
    }
    if let Some(description) = description
        && todo.description != description
    {
        return Err(violation(
            response,
            "description matches",
            format!("description was {:?}", excerpt(&todo.description)),
        ));
    }
    Ok(())
}

/// Shortens long strings in messages.
fn excerpt(text: &str) -> String {
    if text.chars().count() <= 40 {
        return text.to_string();
    }
    let head: String = text.chars().take(40).collect();
    format!("{head}... ({} chars)", text.chars().count())
}

/// PUTs `body` to `path`, checks the echoed todo, then re-reads it.
fn put_and_read_back(
    harness: &ContractHarness,
    path: &str,
    body: Value,
    title: &str,
    description: Option<&str>,
) -> HarnessResult<()> {
    let response = harness.assert_contract(&ContractCheck::put(path).body(body))?;
    require_todo(&response, title, description)?;
    let response = harness.assert_contract(&ContractCheck::get(path))?;
    require_todo(&response, title, description)
}

fn get_seeded_todo_title(harness: &ContractHarness) -> HarnessResult<()> {
    let title = Expectation::FieldEquals("/title", json!("scan paperwork"));
    harness.assert_contract(&ContractCheck::get(SEEDED_TODO).expect(title))?;
    Ok(())
}

fn get_seeded_todo_enveloped(harness: &ContractHarness) -> HarnessResult<()> {
    let todos = Expectation::NonEmptyArrayAt("/todos");
    harness.assert_contract(&ContractCheck::get(SEEDED_TODO).expect(todos))?;
    Ok(())
}

fn get_missing_todo(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::get(MISSING_TODO).status(404))?;
    Ok(())
}

fn put_todo_round_trip(harness: &ContractHarness) -> HarnessResult<()> {
    with_mutable_todo(harness, |path| {
        let body = payload_json(&TodoPayload::new("Updated Task", "Updated description"));
        put_and_read_back(harness, path, body, "Updated Task", Some("Updated description"))
    })
}

fn put_todo_missing_title(harness: &ContractHarness) -> HarnessResult<()> {
    with_mutable_todo(harness, |path| {
        let body = payload_json(&TodoPayload::untitled("Missing title"));
        harness.assert_contract(&ContractCheck::put(path).body(body).status(400))?;
        Ok(())
    })
}

fn post_todo_amend(harness: &ContractHarness) -> HarnessResult<()> {
    with_mutable_todo(harness, |path| {
        let body = payload_json(&TodoPayload::new("Amended Task", "Updated task details"));
        let response = harness.assert_contract(&ContractCheck::post(path).body(body))?;
        require_todo(&response, "Amended Task", Some("Updated task details"))
    })
}

fn post_todo_title_only_rejected(harness: &ContractHarness) -> HarnessResult<()> {
    with_mutable_todo(harness, |path| {
        let body = payload_json(&TodoPayload::titled("Amended Task"));
        harness.assert_contract(&ContractCheck::post(path).body(body).status(400))?;
        Ok(())
    })
}

fn delete_todo_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::DELETE, SEEDED_TODO, None)?;
    Ok(())
}

fn delete_todo_then_missing(harness: &ContractHarness) -> HarnessResult<()> {
    let guard = harness.fixture(FixtureKind::Todo, &TodoPayload::titled("Todo for DELETE"))?;
    let path = guard.path();
    let id = guard.disarm();
    harness.delete_fixture(FixtureKind::Todo, id)?;
    harness.assert_contract(&ContractCheck::get(path.as_str()).status(404))?;
    harness.assert_contract(&ContractCheck::delete(path.as_str()).status(404))?;
    Ok(())
}

fn options_todo_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::OPTIONS, SEEDED_TODO, None)?;
    Ok(())
}

fn options_todo(harness: &ContractHarness) -> HarnessResult<()> {
    with_mutable_todo(harness, |path| {
        harness.assert_contract(&ContractCheck::options(path))?;
        Ok(())
    })
}

fn patch_todo_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    with_mutable_todo(harness, |path| {
        let body = json!({"title": "Partial Update"});
        harness.assert_method_not_allowed(Method::PATCH, path, Some(&body))?;
        Ok(())
    })
}

fn head_todo_content_length(harness: &ContractHarness) -> HarnessResult<()> {
    let length = Expectation::HeaderPresent("content-length");
    harness.assert_contract(&ContractCheck::head(SEEDED_TODO).expect(length))?;
    Ok(())
}

fn head_todo_chunked(harness: &ContractHarness) -> HarnessResult<()> {
    with_mutable_todo(harness, |path| {
        let chunked = Expectation::HeaderPresent("transfer-encoding");
        harness.assert_contract(&ContractCheck::head(path).expect(chunked))?;
        Ok(())
    })
}

fn head_missing_todo(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::head(MISSING_TODO).status(404))?;
    Ok(())
}

fn put_todo_minimal_data(harness: &ContractHarness) -> HarnessResult<()> {
    with_mutable_todo(harness, |path| {
        let body = payload_json(&TodoPayload::titled("Minimal Update"));
        let response = harness.assert_contract(&ContractCheck::put(path).body(body))?;
        require_todo(&response, "Minimal Update", None)
    })
}

fn put_todo_maximum_data(harness: &ContractHarness) -> HarnessResult<()> {
    with_mutable_todo(harness, |path| {
        let title = "A".repeat(255);
        let description = "B".repeat(1000);
        let body = payload_json(&TodoPayload::new(&title, &description));
        put_and_read_back(harness, path, body, &title, Some(&description))
    })
}
