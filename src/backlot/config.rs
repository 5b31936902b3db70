// SPDX-License-Identifier: MIT

//! Process-level configuration.
//!
//! Every declared agent runs against the model named by the `MODEL`
//! environment variable (populated from a `.env` file by the binary).

use crate::adk::error::AdkError;
use crate::adk::model::gemini::GeminiModel;
use crate::adk::model::Model;
use once_cell::sync::Lazy;
use std::env;
use std::sync::Arc;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

// Read once per process; later env changes do not retarget agents.
static MODEL_NAME: Lazy<String> =
    Lazy::new(|| env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()));

/// The model identifier shared by every agent declaration.
pub fn model_name() -> &'static str {
    &MODEL_NAME
}

/// Build the model handle the declarations run against.
pub fn model_from_env() -> Result<Arc<dyn Model>, AdkError> {
    Ok(Arc::new(GeminiModel::new(model_name().to_string())?))
}
