// SPDX-License-Identifier: MIT

//! Note-taking agent that persists text through the file writer tool.

use crate::adk::agent::{Agent, LlmAgent};
use crate::adk::model::Model;
use crate::backlot::tools::FileWriterTool;
use std::sync::Arc;

pub fn note_writer(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("note_writer", model)
            .with_description("Agent to write files.")
            .with_instruction("I can write a file if you ask me to keep a note.")
            .with_tool(Arc::new(FileWriterTool::new())),
    )
}
