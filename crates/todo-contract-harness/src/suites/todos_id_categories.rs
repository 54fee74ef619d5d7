// crates/todo-contract-harness/src/suites/todos_id_categories.rs
// ============================================================================
// Module: Todo Categories Suite
// Description: Contract scenarios for `/todos/:id/categories`.
// Purpose: Cover the todo-category relation collection.
// Dependencies: crate::harness, crate::expectation, serde_json
// ============================================================================

//! ## Overview
//! Documented servers link categories by `category_id`, answer bare arrays,
//! refuse `OPTIONS`, and 404 on unknown todos. Observed servers envelope the
//! list, answer `OPTIONS` and chunked `HEAD`, and reject id-keyed links with
//! `errorMessages`.

use reqwest::Method;
use serde_json::json;

use crate::error::HarnessResult;
use crate::expectation::ContractCheck;
use crate::expectation::Expectation;
use crate::harness::ContractHarness;
use crate::profile::ServerProfile::Documented;
use crate::profile::ServerProfile::Observed;
use crate::scenario::Scenario;
use crate::scenario::Suite;
use crate::suites::SEEDED_CATEGORIES;
use crate::suites::with_restored_links;

/// `/todos/:id/categories` scenarios.
pub const SUITE: Suite = Suite {
    name: "todos_id_categories",
    endpoint: "/todos/:id/categories",
    scenarios: &[
        Scenario::new(
            "get_todo_categories_array",
            "GET /todos/1/categories returns a non-empty array",
            get_todo_categories_array,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "get_todo_categories_enveloped",
            "GET /todos/1/categories returns a `categories` array",
            get_todo_categories_enveloped,
        )
        .only(Observed)
        .seeded(),
        Scenario::new(
            "get_missing_todo_categories",
            "GET /todos/999/categories answers 404",
            get_missing_todo_categories,
        )
        .only(Documented),
        Scenario::new(
            "put_todo_categories_not_allowed",
            "PUT /todos/1/categories answers 405",
            put_todo_categories_not_allowed,
        )
        .seeded(),
        Scenario::new(
            "post_todo_category_link",
            "POST /todos/1/categories by category_id answers 200",
            post_todo_category_link,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "post_todo_category_empty",
            "POST /todos/1/categories with {} answers 400",
            post_todo_category_empty,
        )
        .seeded(),
        Scenario::new(
            "delete_todo_categories_not_allowed",
            "DELETE /todos/1/categories answers 405",
            delete_todo_categories_not_allowed,
        )
        .seeded(),
        Scenario::new(
            "options_todo_categories_not_allowed",
            "OPTIONS /todos/1/categories answers 405",
            options_todo_categories_not_allowed,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "options_todo_categories",
            "OPTIONS /todos/1/categories answers 200",
            options_todo_categories,
        )
        .only(Observed)
        .seeded(),
        Scenario::new(
            "patch_todo_categories_not_allowed",
            "PATCH /todos/1/categories answers 405",
            patch_todo_categories_not_allowed,
        )
        .seeded(),
        Scenario::new(
            "head_todo_categories_content_length",
            "HEAD /todos/1/categories carries Content-Length",
            head_todo_categories_content_length,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "head_todo_categories_chunked",
            "HEAD /todos/1/categories is chunked",
            head_todo_categories_chunked,
        )
        .only(Observed)
        .seeded(),
        Scenario::new(
            "head_missing_todo_categories",
            "HEAD /todos/999/categories answers 404",
            head_missing_todo_categories,
        )
        .only(Documented),
        Scenario::new(
            "head_missing_todo_categories_ok",
            "HEAD /todos/999/categories answers 200",
            head_missing_todo_categories_ok,
        )
        .only(Observed),
        Scenario::new(
            "post_todo_category_minimal",
            "POST {category_id: 1} answers 200",
            post_todo_category_minimal,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "post_todo_category_minimal_rejected",
            "POST {category_id: 1} answers 400",
            post_todo_category_minimal_rejected,
        )
        .only(Observed)
        .seeded(),
        Scenario::new(
            "post_todo_category_large_id",
            "POST {category_id: 999999999} echoes the id",
            post_todo_category_large_id,
        )
        .only(Documented)
        .seeded(),
        Scenario::new(
            "post_todo_category_large_id_rejected",
            "POST {category_id: 999999999} answers 400 with errorMessages",
            post_todo_category_large_id_rejected,
        )
        .only(Observed)
        .seeded(),
    ],
};

/// Relation on the seeded todo.
const CATEGORIES: &str = SEEDED_CATEGORIES.path;

/// Relation on a todo assumed absent.
const MISSING_CATEGORIES: &str = "/todos/999/categories";

/// Largest category id the boundary scenarios send.
const LARGE_ID: u64 = 999_999_999;

fn get_todo_categories_array(harness: &ContractHarness) -> HarnessResult<()> {
    let linked = Expectation::NonEmptyArrayAt("");
    harness.assert_contract(&ContractCheck::get(CATEGORIES).expect(linked))?;
    Ok(())
}

fn get_todo_categories_enveloped(harness: &ContractHarness) -> HarnessResult<()> {
    let enveloped = Expectation::ArrayAt("/categories");
    harness.assert_contract(&ContractCheck::get(CATEGORIES).expect(enveloped))?;
    Ok(())
}

fn get_missing_todo_categories(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::get(MISSING_CATEGORIES).status(404))?;
    Ok(())
}

fn put_todo_categories_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::PUT, CATEGORIES, None)?;
    Ok(())
}

fn post_todo_category_link(harness: &ContractHarness) -> HarnessResult<()> {
    with_restored_links(harness, SEEDED_CATEGORIES, || {
        harness.assert_contract(
            &ContractCheck::post(CATEGORIES)
                .body(json!({"category_id": 2}))
                .expect(Expectation::FieldPresent("/categories")),
        )?;
        Ok(())
    })
}

fn post_todo_category_empty(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::post(CATEGORIES).body(json!({})).status(400))?;
    Ok(())
}

fn delete_todo_categories_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::DELETE, CATEGORIES, None)?;
    Ok(())
}

fn options_todo_categories_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_method_not_allowed(Method::OPTIONS, CATEGORIES, None)?;
    Ok(())
}

fn options_todo_categories(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::options(CATEGORIES))?;
    Ok(())
}

fn patch_todo_categories_not_allowed(harness: &ContractHarness) -> HarnessResult<()> {
    let body = json!({"category_id": 3});
    harness.assert_method_not_allowed(Method::PATCH, CATEGORIES, Some(&body))?;
    Ok(())
}

fn head_todo_categories_content_length(harness: &ContractHarness) -> HarnessResult<()> {
    let length = Expectation::HeaderPresent("content-length");
    harness.assert_contract(&ContractCheck::head(CATEGORIES).expect(length))?;
    Ok(())
}

fn head_todo_categories_chunked(harness: &ContractHarness) -> HarnessResult<()> {
    let chunked = Expectation::HeaderEquals("transfer-encoding", "chunked");
    harness.assert_contract(&ContractCheck::head(CATEGORIES).expect(chunked))?;
    Ok(())
}

fn head_missing_todo_categories(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::head(MISSING_CATEGORIES).status(404))?;
    Ok(())
}

fn head_missing_todo_categories_ok(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(&ContractCheck::head(MISSING_CATEGORIES))?;
    Ok(())
}

fn post_todo_category_minimal(harness: &ContractHarness) -> HarnessResult<()> {
    with_restored_links(harness, SEEDED_CATEGORIES, || {
        harness.assert_contract(&ContractCheck::post(CATEGORIES).body(json!({"category_id": 1})))?;
        Ok(())
    })
}

fn post_todo_category_minimal_rejected(harness: &ContractHarness) -> HarnessResult<()> {
    let body = json!({"category_id": 1});
    harness.assert_contract(&ContractCheck::post(CATEGORIES).body(body).status(400))?;
    Ok(())
}

fn post_todo_category_large_id(harness: &ContractHarness) -> HarnessResult<()> {
    with_restored_links(harness, SEEDED_CATEGORIES, || {
        harness.assert_contract(
            &ContractCheck::post(CATEGORIES)
                .body(json!({"category_id": LARGE_ID}))
                .expect(Expectation::FieldEquals("/category_id", json!(LARGE_ID))),
        )?;
        Ok(())
    })
}

fn post_todo_category_large_id_rejected(harness: &ContractHarness) -> HarnessResult<()> {
    harness.assert_contract(
        &ContractCheck::post(CATEGORIES)
            .body(json!({"category_id": LARGE_ID}))
            .status(400)
            .expect(Expectation::FieldPresent("/errorMessages")),
    )?;
    Ok(())
}
