// crates/todo-contract-harness/src/schemas.rs
// ============================================================================
// Module: Entity Schemas
// Description: JSON Schemas for the documented Project and Todo shapes.
// Purpose: Validate entity bodies structurally instead of field by field.
// Dependencies: jsonschema, serde_json
// ============================================================================

//! ## Overview
//! Schemas follow draft 2020-12. Ids may be integers or numeric strings and
//! `doneStatus` may be a boolean or its string form, matching what servers
//! actually send.

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;

use crate::model::FixtureKind;

/// Schema fragment for a positive integer id in either encoding.
fn id_schema() -> Value {
    json!({
        "oneOf": [
            { "type": "integer", "minimum": 1 },
            { "type": "string", "pattern": "^[1-9][0-9]*$" }
        ]
    })
}

/// Schema for one entity of `kind`.
#[must_use]
pub fn entity_schema(kind: FixtureKind) -> Value {
    match kind {
        FixtureKind::Todo => json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "required": ["id", "title", "description", "doneStatus"],
            "properties": {
                "id": id_schema(),
                "title": { "type": "string" },
                "description": { "type": "string" },
                "doneStatus": {
                    "oneOf": [
                        { "type": "boolean" },
                        { "type": "string", "enum": ["true", "false"] }
                    ]
                }
            }
        }),
        FixtureKind::Project | FixtureKind::Category => json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "required": ["id", "title", "description"],
            "properties": {
                "id": id_schema(),
                "title": { "type": "string" },
                "description": { "type": "string" }
            }
        }),
    }
}

/// Validates `instance` against the schema for `kind`.
///
/// # Errors
///
/// Returns every validation message joined by `; `.
pub fn validate_entity(kind: FixtureKind, instance: &Value) -> Result<(), String> {
    let schema = entity_schema(kind);
    let validator: Validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| format!("schema for {} failed to compile: {err}", kind.label()))?;
    let messages: Vec<String> =
        validator.iter_errors(instance).map(|err| err.to_string()).collect();
    if messages.is_empty() { Ok(()) } else { Err(messages.join("; ")) }
}
