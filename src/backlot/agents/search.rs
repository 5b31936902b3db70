// SPDX-License-Identifier: MIT

//! Web search assistant.

use crate::adk::agent::{Agent, LlmAgent};
use crate::adk::error::AdkError;
use crate::adk::model::Model;
use crate::backlot::tools::GoogleSearchTool;
use std::sync::Arc;

pub fn search_assistant(model: Arc<dyn Model>) -> Result<Arc<dyn Agent>, AdkError> {
    Ok(Arc::new(
        LlmAgent::new("search_assistant", model)
            .with_description("An agent that can search the web to answer questions.")
            .with_instruction(
                "You are a helpful assistant. When the user asks a question that \
                 requires up-to-date information, use the 'google_search' tool to find \
                 relevant results and answer based on those results. If the question \
                 doesn't require real-time information, answer directly.",
            )
            .with_tool(Arc::new(GoogleSearchTool::new()?)),
    ))
}
