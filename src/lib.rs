// SPDX-License-Identifier: MIT

//! backlot-rs - LLM agent declarations and workflows for developing movie
//! pitches, plus a handful of standalone single-tool agents.
//!
//! The [adk] module is the minimal runtime the declarations run on; the
//! [backlot] module holds the tools, agents, and workflow topology.

pub mod adk;
pub mod backlot;
