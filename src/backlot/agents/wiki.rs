// SPDX-License-Identifier: MIT

//! Wikipedia question-answering agent.

use crate::adk::agent::{Agent, LlmAgent};
use crate::adk::model::Model;
use crate::backlot::tools::WikipediaTool;
use std::sync::Arc;

pub fn wikipedia_agent(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("wikipedia_agent", model)
            .with_description("Agent to answer questions using Wikipedia.")
            .with_instruction(
                "I can answer your questions by searching Wikipedia! \
                 Ask me about a historical figure.",
            )
            .with_tool(Arc::new(WikipediaTool::new())),
    )
}
