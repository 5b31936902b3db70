// SPDX-License-Identifier: MIT

//! Stock price lookup agent.

use crate::adk::agent::{Agent, LlmAgent};
use crate::adk::model::Model;
use crate::backlot::tools::StockPriceTool;
use std::sync::Arc;

pub fn stock_agent(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("stock_agent", model)
            .with_description("Agent to look up stock prices.")
            .with_instruction(
                "I can answer your questions about stock prices for a given ticker symbol.",
            )
            .with_tool(Arc::new(StockPriceTool::new())),
    )
}
