// SPDX-License-Identifier: MIT

//! Data-store search agent over a planet discovery corpus.

use crate::adk::agent::{Agent, LlmAgent};
use crate::adk::error::AdkError;
use crate::adk::model::Model;
use crate::backlot::tools::DatastoreSearchTool;
use std::sync::Arc;

/// Full resource name of the data store the agent is wired to.
const DATA_STORE_ID: &str = "projects/backlot/locations/global/collections/default_collection/dataStores/planet-search";

pub fn planet_search_agent(model: Arc<dyn Model>) -> Result<Arc<dyn Agent>, AdkError> {
    Ok(Arc::new(
        LlmAgent::new("planet_search_agent", model)
            .with_description("Answer questions using your data store access.")
            .with_instruction(
                "You analyze new planet discoveries and engage with the scientific \
                 community on them.",
            )
            .with_tool(Arc::new(DatastoreSearchTool::new(DATA_STORE_ID)?)),
    ))
}
