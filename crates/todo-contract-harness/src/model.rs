// crates/todo-contract-harness/src/model.rs
// ============================================================================
// Module: Todo Manager Data Model
// Description: Typed views of the server's transient resources.
// Purpose: Decode ids and entities from response bodies in any envelope.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Resources are owned by the server; these types only describe what the
//! harness sends and reads back. The server is inconsistent about envelopes
//! (bare object, bare array, or `{"todos": [...]}`) and about id encoding
//! (`7` or `"7"`), so decoding accepts every form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::HarnessError;
use crate::error::HarnessResult;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Positive server-assigned resource identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FixtureId(u64);

impl FixtureId {
    /// First id a server assigns; seed data starts here.
    pub const SEED: Self = Self(1);

    /// Wraps a raw id; zero is rejected.
    #[must_use]
    pub const fn new(raw: u64) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Decodes an id from a JSON integer or numeric string.
    ///
    /// # Errors
    ///
    /// Returns a message when the value is not a positive integer.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        let raw = match value {
            Value::Number(number) => number
                .as_u64()
                .ok_or_else(|| format!("expected a positive integer, got {number}"))?,
            Value::String(text) => text
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("expected a numeric id, got {text:?}"))?,
            other => return Err(format!("expected an integer id, got {other}")),
        };
        Self::new(raw).ok_or_else(|| "id must be positive".to_string())
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for FixtureId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// Resource types the harness creates as fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureKind {
    /// `/projects`
    Project,
    /// `/todos`
    Todo,
    /// `/categories`
    Category,
}

impl FixtureKind {
    /// Collection path.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Project => "/projects",
            Self::Todo => "/todos",
            Self::Category => "/categories",
        }
    }

    /// Key the server uses when enveloping lists of this kind.
    #[must_use]
    pub const fn envelope_key(self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Todo => "todos",
            Self::Category => "categories",
        }
    }

    /// Singular label for messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Todo => "todo",
            Self::Category => "category",
        }
    }

    /// Item path for `id`.
    #[must_use]
    pub fn item_path(self, id: FixtureId) -> String {
        format!("{}/{id}", self.collection())
    }
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Body for creating or replacing a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPayload {
    /// Project title.
    pub title: String,
    /// Project description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectPayload {
    /// Title and description.
    #[must_use]
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: Some(description.to_string()),
        }
    }

    /// Title only.
    #[must_use]
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: None,
        }
    }
}

impl Default for ProjectPayload {
    fn default() -> Self {
        Self::new("Default Project", "Default Description")
    }
}

/// Body for creating or replacing a todo. `title` is optional so that
/// missing-field rejections can be exercised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoPayload {
    /// Todo title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Todo description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Completion flag.
    #[serde(rename = "doneStatus", skip_serializing_if = "Option::is_none")]
    pub done_status: Option<bool>,
}

impl TodoPayload {
    /// Title and description.
    #[must_use]
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            done_status: None,
        }
    }

    /// Title only.
    #[must_use]
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            description: None,
            done_status: None,
        }
    }

    /// Description only; servers must reject this.
    #[must_use]
    pub fn untitled(description: &str) -> Self {
        Self {
            title: None,
            description: Some(description.to_string()),
            done_status: None,
        }
    }
}

/// Body for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPayload {
    /// Category title.
    pub title: String,
    /// Category description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryPayload {
    /// Title and description.
    #[must_use]
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: Some(description.to_string()),
        }
    }
}

/// Renders a payload as a JSON request body.
///
/// The payload types here contain only strings and booleans, so serialization
/// cannot fail; `null` is returned for foreign types that do fail.
#[must_use]
pub fn payload_json<P: Serialize>(payload: &P) -> Value {
    serde_json::to_value(payload).unwrap_or(Value::Null)
}

// ============================================================================
// SECTION: Entities
// ============================================================================

/// Project as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    /// Identifier.
    pub id: FixtureId,
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Todo as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Todo {
    /// Identifier.
    pub id: FixtureId,
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Completion flag; the server may encode it as `"false"`.
    #[serde(rename = "doneStatus", default, deserialize_with = "lenient_bool")]
    pub done_status: bool,
}

/// Category as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Identifier.
    pub id: FixtureId,
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Accepts `true`, `"true"`, `false`, `"false"`.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Bool(flag) => Ok(flag),
        Value::String(text) if text.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(text) if text.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(serde::de::Error::custom(format!("expected a boolean, got {other}"))),
    }
}

/// Returns the entity objects carried by `body` for `kind`: a bare object,
/// a bare array, or an object keyed by the collection name.
#[must_use]
pub fn entity_values(kind: FixtureKind, body: &Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items.clone(),
        Value::Object(map) => match map.get(kind.envelope_key()) {
            Some(Value::Array(items)) => items.clone(),
            Some(single @ Value::Object(_)) => vec![single.clone()],
            _ => vec![body.clone()],
        },
        _ => Vec::new(),
    }
}

/// Decodes every entity of `kind` carried by `body`.
///
/// # Errors
///
/// Returns [`HarnessError::InvalidField`] when an entity does not decode.
pub fn entities_of<T: DeserializeOwned>(
    kind: FixtureKind,
    body: &Value,
    context: &str,
) -> HarnessResult<Vec<T>> {
    entity_values(kind, body)
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|err| HarnessError::InvalidField {
                field: kind.envelope_key().to_string(),
                context: context.to_string(),
                reason: err.to_string(),
            })
        })
        .collect()
}

/// Decodes exactly one entity of `kind` carried by `body`.
///
/// # Errors
///
/// Returns [`HarnessError::MissingField`] when the body carries no entity and
/// [`HarnessError::InvalidField`] when it carries several or one fails to decode.
pub fn single_entity<T: DeserializeOwned>(
    kind: FixtureKind,
    body: &Value,
    context: &str,
) -> HarnessResult<T> {
    let mut entities = entities_of::<T>(kind, body, context)?;
    match entities.len() {
        0 => Err(HarnessError::MissingField {
            field: kind.envelope_key().to_string(),
            context: context.to_string(),
        }),
        1 => Ok(entities.remove(0)),
        count => Err(HarnessError::InvalidField {
            field: kind.envelope_key().to_string(),
            context: context.to_string(),
            reason: format!("expected one {}, found {count}", kind.label()),
        }),
    }
}

/// Extracts the `id` of a creation response body.
///
/// # Errors
///
/// Returns [`HarnessError::MissingField`] when `id` is absent and
/// [`HarnessError::InvalidField`] when it is not a positive integer.
pub fn created_id(body: &Value, context: &str) -> HarnessResult<FixtureId> {
    let raw = body.get("id").ok_or_else(|| HarnessError::MissingField {
        field: "id".to_string(),
        context: context.to_string(),
    })?;
    FixtureId::from_json(raw).map_err(|reason| HarnessError::InvalidField {
        field: "id".to_string(),
        context: context.to_string(),
        reason,
    })
}
