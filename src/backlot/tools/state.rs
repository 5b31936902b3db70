// SPDX-License-Identifier: MIT

//! State-append tool shared by the pitch agents.

use crate::adk::error::AdkError;
use crate::adk::tool::{Tool, ToolContext};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};

static APPEND_TO_STATE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "field": {
                "type": "string",
                "description": "a field name to append to"
            },
            "response": {
                "type": "string",
                "description": "a string to append to the field"
            }
        },
        "required": ["field", "response"]
    })
});

#[derive(Debug, Deserialize)]
struct AppendArgs {
    field: String,
    response: String,
}

/// Appends new output to an existing state key.
///
/// The key is read as a list (an empty one if absent), extended with the
/// response, and written back. Field names are not validated.
#[derive(Default)]
pub struct AppendToStateTool;

impl AppendToStateTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for AppendToStateTool {
    fn name(&self) -> &str {
        "append_to_state"
    }

    fn description(&self) -> &str {
        "Append new output to an existing state key."
    }

    fn schema(&self) -> &Value {
        &APPEND_TO_STATE_SCHEMA
    }

    async fn execute(&self, ctx: &ToolContext<'_>, args: Value) -> Result<Value, AdkError> {
        let args: AppendArgs = serde_json::from_value(args)?;
        ctx.session()
            .append(&args.field, Value::String(args.response));
        Ok(json!({ "status": "success" }))
    }
}
