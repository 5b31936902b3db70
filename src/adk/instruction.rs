// SPDX-License-Identifier: MIT

//! Instruction template rendering.
//!
//! Placeholders reference session state: `{key}` is required and fails the
//! run when the key is missing, `{key?}` renders as the empty string when
//! absent. Doubled braces from hand-written prompts (`{{ key? }}`) resolve
//! the same way. Anything that is not a valid identifier is left in place
//! as literal text.

use crate::adk::error::AdkError;
use crate::adk::session::Session;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{+[^{}]*\}+").expect("placeholder pattern"));

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Render a state value as prompt text. Lists become one `- item` line per
/// element so accumulated fields (research notes) read naturally.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|v| format!("- {}", value_to_text(v)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| format!("{}: {}", k, value_to_text(v)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
    }
}

/// Substitute session state into an instruction template.
pub fn render(template: &str, session: &Session) -> Result<String, AdkError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for m in PLACEHOLDER.find_iter(template) {
        out.push_str(&template[last..m.start()]);
        last = m.end();

        let raw = m.as_str();
        let name = raw.trim_matches(|c| c == '{' || c == '}').trim();
        let (name, optional) = match name.strip_suffix('?') {
            Some(stripped) => (stripped.trim(), true),
            None => (name, false),
        };

        if !is_identifier(name) {
            out.push_str(raw);
            continue;
        }

        match session.get(name) {
            Some(value) => out.push_str(&value_to_text(&value)),
            None if optional => {}
            None => {
                return Err(AdkError::Template(format!(
                    "state key '{}' not found",
                    name
                )))
            }
        }
    }

    out.push_str(&template[last..]);
    Ok(out)
}
