// SPDX-License-Identifier: MIT

//! Agent module - defines agent types for LLM workflows
//!
//! This module provides the core Agent trait and implementations:
//! - [LlmAgent] - model + instruction + tools, with a tool-calling loop
//! - [SequentialAgent], [ParallelAgent], [LoopAgent] - composites over
//!   child agents

mod llm;
mod workflow;

pub use llm::LlmAgent;
pub use workflow::{LoopAgent, ParallelAgent, SequentialAgent, DEFAULT_LOOP_MAX_ITERATIONS};

use crate::adk::error::AdkError;
use crate::adk::session::Session;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Progress events emitted while an agent runs with streaming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AgentEvent {
    Started(String),
    ToolCall {
        name: String,
        args: serde_json::Value,
    },
    ToolResult {
        name: String,
        result: serde_json::Value,
    },
    Answer(String),
    Error(String),
    Log(String),
}

/// Core agent trait for all agent types.
///
/// Agents communicate through the shared [Session]: they read state in
/// instruction templates and write it back through output keys and tools.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Returns the agent name
    fn name(&self) -> &str;

    /// A short description of the agent's purpose
    fn description(&self) -> &str {
        ""
    }

    /// Run the agent against the session, returning its final text
    async fn run(&self, session: &Session) -> Result<String, AdkError>;

    /// Run the agent with streaming events
    async fn run_stream(
        &self,
        session: &Session,
        tx: mpsc::Sender<AgentEvent>,
    ) -> Result<String, AdkError> {
        // Default implementation falls back to run()
        match self.run(session).await {
            Ok(res) => {
                let _ = tx.send(AgentEvent::Answer(res.clone())).await;
                Ok(res)
            }
            Err(e) => {
                let _ = tx.send(AgentEvent::Error(e.to_string())).await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// A scripted agent that records its runs (used in tests).
    pub struct RecordingAgent {
        name: String,
        response: String,
        pub calls: Mutex<Vec<String>>,
        exit_after: bool,
    }

    impl RecordingAgent {
        pub fn new(name: &str, response: &str) -> Self {
            Self {
                name: name.to_string(),
                response: response.to_string(),
                calls: Mutex::new(Vec::new()),
                exit_after: false,
            }
        }

        /// Raise the loop-exit signal at the end of every run.
        pub fn exiting(mut self) -> Self {
            self.exit_after = true;
            self
        }

        pub fn run_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Agent for RecordingAgent {
        fn name(&self) -> &str {
            &self.name
        }

        async fn run(&self, session: &Session) -> Result<String, AdkError> {
            self.calls.lock().unwrap().push(session.input().to_string());
            if self.exit_after {
                session.request_exit();
            }
            Ok(self.response.clone())
        }
    }
}
