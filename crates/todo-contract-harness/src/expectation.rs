// crates/todo-contract-harness/src/expectation.rs
// ============================================================================
// Module: Contract Expectations
// Description: Declarative checks over response headers and JSON bodies.
// Purpose: Describe one request and everything its response must satisfy.
// Dependencies: reqwest, serde_json
// ============================================================================

//! ## Overview
//! A [`ContractCheck`] is one request plus the accepted status codes and a list
//! of [`Expectation`]s. Expectations are data so that failures name the exact
//! rule that broke; [`Expectation::custom`] covers anything else.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use crate::error::HarnessError;
use crate::error::HarnessResult;
use crate::model::FixtureKind;
use crate::model::entity_values;
use crate::response::ApiResponse;
use crate::schemas::validate_entity;

// ============================================================================
// SECTION: Expectations
// ============================================================================

/// Predicate signature for [`Expectation::Custom`].
pub type ResponsePredicate = dyn Fn(&ApiResponse) -> Result<(), String> + Send + Sync;

/// One rule a response must satisfy.
#[derive(Clone)]
pub enum Expectation {
    /// Header is present.
    HeaderPresent(&'static str),
    /// Header is absent.
    HeaderAbsent(&'static str),
    /// Header equals a value (case-insensitive).
    HeaderEquals(&'static str, &'static str),
    /// Value at a JSON pointer (`""` for the root) is an array.
    ArrayAt(&'static str),
    /// Value at a JSON pointer is a non-empty array.
    NonEmptyArrayAt(&'static str),
    /// Value at a JSON pointer is an array of exactly this length.
    ArrayLenAt(&'static str, usize),
    /// Value at a JSON pointer exists.
    FieldPresent(&'static str),
    /// Top-level key is absent (body must still be JSON).
    FieldAbsent(&'static str),
    /// Value at a JSON pointer equals a JSON value.
    FieldEquals(&'static str, Value),
    /// Raw body text contains a substring.
    TextContains(String),
    /// Every object in the array at `array` has `field` equal to `value`.
    AllItemsFieldEquals {
        /// JSON pointer to the array.
        array: &'static str,
        /// Key inside each item.
        field: &'static str,
        /// Required value.
        value: Value,
    },
    /// Every entity of the kind carried by the body matches its schema.
    MatchesSchema(FixtureKind),
    /// Labeled free-form predicate.
    Custom(&'static str, Arc<ResponsePredicate>),
}

impl Expectation {
    /// Builds a labeled free-form predicate.
    pub fn custom<F>(label: &'static str, predicate: F) -> Self
    where
        F: Fn(&ApiResponse) -> Result<(), String> + Send + Sync + 'static,
    {
        Self::Custom(label, Arc::new(predicate))
    }

    /// Short label used in failure messages.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::HeaderPresent(name) => format!("header {name} present"),
            Self::HeaderAbsent(name) => format!("header {name} absent"),
            Self::HeaderEquals(name, value) => format!("header {name} == {value}"),
            Self::ArrayAt(pointer) => format!("array at '{pointer}'"),
            Self::NonEmptyArrayAt(pointer) => format!("non-empty array at '{pointer}'"),
            Self::ArrayLenAt(pointer, len) => format!("array of {len} at '{pointer}'"),
            Self::FieldPresent(pointer) => format!("field '{pointer}' present"),
            Self::FieldAbsent(key) => format!("field '{key}' absent"),
            Self::FieldEquals(pointer, value) => format!("field '{pointer}' == {value}"),
            Self::TextContains(needle) => format!("body contains {needle:?}"),
            Self::AllItemsFieldEquals {
                array,
                field,
                value,
            } => format!("every '{array}' item has {field} == {value}"),
            Self::MatchesSchema(kind) => format!("{} schema", kind.label()),
            Self::Custom(label, _) => (*label).to_string(),
        }
    }

    /// Evaluates the rule against a response.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Expectation`] describing the mismatch, or
    /// [`HarnessError::MalformedBody`] when a body rule meets a non-JSON body.
    pub fn evaluate(&self, response: &ApiResponse) -> HarnessResult<()> {
        self.check(response).map_err(|detail| match detail {
            Failure::Body(err) => err,
            Failure::Mismatch(detail) => HarnessError::Expectation {
                method: response.method().to_string(),
                url: response.url().to_string(),
                expectation: self.label(),
                detail,
            },
        })
    }

    /// Runs the rule, separating decode failures from mismatches.
    fn check(&self, response: &ApiResponse) -> Result<(), Failure> {
        match self {
            Self::HeaderPresent(name) => match response.headers().get(*name) {
                Some(_) => Ok(()),
                None => mismatch(format!("missing; headers: {}", header_names(response))),
            },
            Self::HeaderAbsent(name) => match response.header(name) {
                None => Ok(()),
                Some(value) => mismatch(format!("present with value {value:?}")),
            },
            Self::HeaderEquals(name, expected) => match response.header(name) {
                Some(value) if value.eq_ignore_ascii_case(expected) => Ok(()),
                Some(value) => mismatch(format!("got {value:?}")),
                None => mismatch("missing".to_string()),
            },
            Self::ArrayAt(pointer) => {
                let body = response.json().map_err(Failure::Body)?;
                array_at(&body, pointer).map(|_| ())
            }
            Self::NonEmptyArrayAt(pointer) => {
                let body = response.json().map_err(Failure::Body)?;
                if array_at(&body, pointer)?.is_empty() {
                    return mismatch("array is empty".to_string());
                }
                Ok(())
            }
            Self::ArrayLenAt(pointer, len) => {
                let body = response.json().map_err(Failure::Body)?;
                let actual = array_at(&body, pointer)?.len();
                if actual == *len { Ok(()) } else { mismatch(format!("length is {actual}")) }
            }
            Self::FieldPresent(pointer) => {
                let body = response.json().map_err(Failure::Body)?;
                match body.pointer(pointer) {
                    Some(_) => Ok(()),
                    None => mismatch(format!("absent in {}", excerpt(&body))),
                }
            }
            Self::FieldAbsent(key) => {
                let body = response.json().map_err(Failure::Body)?;
                match body.get(*key) {
                    None => Ok(()),
                    Some(value) => mismatch(format!("present with value {}", excerpt(value))),
                }
            }
            Self::FieldEquals(pointer, expected) => {
                let body = response.json().map_err(Failure::Body)?;
                match body.pointer(pointer) {
                    Some(value) if value == expected => Ok(()),
                    Some(value) => mismatch(format!("got {}", excerpt(value))),
                    None => mismatch(format!("absent in {}", excerpt(&body))),
                }
            }
            Self::TextContains(needle) => {
                if response.text().contains(needle.as_str()) {
                    Ok(())
                } else {
                    mismatch(format!("body was {:?}", response.body_excerpt()))
                }
            }
            Self::AllItemsFieldEquals {
                array,
                field,
                value,
            } => {
                let body = response.json().map_err(Failure::Body)?;
                let items = array_at(&body, array)?;
                match items.iter().position(|item| item.get(*field) != Some(value)) {
                    None => Ok(()),
                    Some(index) => mismatch(format!("item {index} was {}", excerpt(&items[index]))),
                }
            }
            Self::MatchesSchema(kind) => {
                let body = response.json().map_err(Failure::Body)?;
                let entities = entity_values(*kind, &body);
                if entities.is_empty() {
                    return mismatch(format!("no {} in body", kind.label()));
                }
                for entity in &entities {
                    validate_entity(*kind, entity).map_err(Failure::Mismatch)?;
                }
                Ok(())
            }
            Self::Custom(_, predicate) => predicate(response).map_err(Failure::Mismatch),
        }
    }
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Internal split between undecodable bodies and rule mismatches.
enum Failure {
    /// Body could not be parsed.
    Body(HarnessError),
    /// Rule did not hold.
    Mismatch(String),
}

/// Shorthand for a mismatch result.
const fn mismatch(detail: String) -> Result<(), Failure> {
    Err(Failure::Mismatch(detail))
}

/// Resolves a pointer to an array.
fn array_at<'a>(body: &'a Value, pointer: &str) -> Result<&'a Vec<Value>, Failure> {
    match body.pointer(pointer) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(Failure::Mismatch(format!("not an array: {}", excerpt(other)))),
        None => Err(Failure::Mismatch(format!("absent in {}", excerpt(body)))),
    }
}

/// Compact JSON rendering capped for messages.
fn excerpt(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.len() <= 160 {
        return rendered;
    }
    let mut cut = 160;
    while !rendered.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &rendered[..cut])
}

/// Comma-separated header names.
fn header_names(response: &ApiResponse) -> String {
    response.headers().keys().map(|name| name.as_str().to_string()).collect::<Vec<_>>().join(", ")
}

// ============================================================================
// SECTION: Contract Check
// ============================================================================

/// One request plus the status codes and rules its response must satisfy.
#[derive(Debug, Clone)]
pub struct ContractCheck {
    /// HTTP method.
    pub method: Method,
    /// Path (with optional query) relative to the base URL.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<Value>,
    /// Accepted status codes.
    pub statuses: Vec<u16>,
    /// Rules evaluated in order after the status matches.
    pub expectations: Vec<Expectation>,
}

impl ContractCheck {
    /// Starts a check expecting `200 OK`.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            statuses: vec![200],
            expectations: Vec::new(),
        }
    }

    /// `GET path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `HEAD path`.
    #[must_use]
    pub fn head(path: impl Into<String>) -> Self {
        Self::new(Method::HEAD, path)
    }

    /// `OPTIONS path`.
    #[must_use]
    pub fn options(path: impl Into<String>) -> Self {
        Self::new(Method::OPTIONS, path)
    }

    /// `POST path`.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT path`.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `DELETE path`.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Requires exactly this status.
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.statuses = vec![status];
        self
    }

    /// Accepts any of these statuses.
    #[must_use]
    pub fn any_status(mut self, statuses: &[u16]) -> Self {
        self.statuses = statuses.to_vec();
        self
    }

    /// Adds a rule.
    #[must_use]
    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    /// Checks an already-received response against the status and rules.
    ///
    /// # Errors
    ///
    /// Returns the first failing status or expectation.
    pub fn verify(&self, response: &ApiResponse) -> HarnessResult<()> {
        response.require_status(&self.statuses)?;
        for expectation in &self.expectations {
            expectation.evaluate(response)?;
        }
        Ok(())
    }
}
