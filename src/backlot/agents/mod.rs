// SPDX-License-Identifier: MIT

//! Agent declarations.
//!
//! Each function builds a configured agent; the model handle comes from the
//! caller so the CLI, the server, and the tests can all supply their own.

pub mod notes;
pub mod pitch;
pub mod planets;
pub mod search;
pub mod stocks;
pub mod wiki;

use crate::adk::agent::Agent;
use crate::adk::model::Model;
use std::sync::Arc;

/// The standalone agents, for the CLI and the HTTP server.
///
/// Agents whose tools need credentials that are not configured are skipped
/// with a warning rather than failing the whole catalog.
pub fn catalog(model: &Arc<dyn Model>) -> Vec<Arc<dyn Agent>> {
    let mut agents: Vec<Arc<dyn Agent>> = vec![
        wiki::wikipedia_agent(model.clone()),
        notes::note_writer(model.clone()),
        stocks::stock_agent(model.clone()),
    ];

    match search::search_assistant(model.clone()) {
        Ok(agent) => agents.push(agent),
        Err(e) => log::warn!("skipping search_assistant: {}", e),
    }
    match planets::planet_search_agent(model.clone()) {
        Ok(agent) => agents.push(agent),
        Err(e) => log::warn!("skipping planet_search_agent: {}", e),
    }

    agents
}

/// Look up a standalone agent by name.
pub fn find(model: &Arc<dyn Model>, name: &str) -> Option<Arc<dyn Agent>> {
    catalog(model).into_iter().find(|agent| agent.name() == name)
}
