// SPDX-License-Identifier: MIT

//! Minimal agent development kit.
//!
//! The pieces an agent declaration needs: the [agent::Agent] trait with an
//! LLM implementation and sequential/parallel/loop composites, the
//! [model::Model] trait over chat-with-tools APIs, the [tool::Tool] trait,
//! and the run-scoped [session::Session] that carries shared state between
//! agents.

pub mod agent;
pub mod error;
pub mod instruction;
pub mod model;
pub mod session;
pub mod tool;
