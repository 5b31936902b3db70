//! Workflow agents - sequential, parallel, and bounded-loop composition
//!
//! Composites own child agents and drive them against the shared session.
//! Data flows between children through state keys, not through chained
//! message passing.

use super::{Agent, AgentEvent};
use crate::adk::error::AdkError;
use crate::adk::session::Session;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Default iteration bound for [LoopAgent] when none is specified.
/// Prevents runaway loops from consuming unbounded model calls.
pub const DEFAULT_LOOP_MAX_ITERATIONS: u32 = 1000;

/// Separator between the outputs of parallel children.
const PARALLEL_SEPARATOR: &str = "\n\n---\n\n";

/// Runs child agents once each, in declaration order. Returns the last
/// child's output.
pub struct SequentialAgent {
    name: String,
    description: String,
    sub_agents: Vec<Arc<dyn Agent>>,
}

impl SequentialAgent {
    pub fn new(name: impl Into<String>, sub_agents: Vec<Arc<dyn Agent>>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            sub_agents,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn sub_agents(&self) -> &[Arc<dyn Agent>] {
        &self.sub_agents
    }
}

#[async_trait]
impl Agent for SequentialAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(&self, session: &Session) -> Result<String, AdkError> {
        let mut last = String::new();
        for agent in &self.sub_agents {
            log::debug!("{}: running {}", self.name, agent.name());
            last = agent.run(session).await?;
        }
        Ok(last)
    }

    async fn run_stream(
        &self,
        session: &Session,
        tx: mpsc::Sender<AgentEvent>,
    ) -> Result<String, AdkError> {
        let mut last = String::new();
        for agent in &self.sub_agents {
            let _ = tx.send(AgentEvent::Started(agent.name().to_string())).await;
            last = agent.run_stream(session, tx.clone()).await?;
        }
        Ok(last)
    }
}

/// Runs child agents concurrently over the same session. Children must
/// write disjoint output keys; their outputs are joined for the caller.
pub struct ParallelAgent {
    name: String,
    description: String,
    sub_agents: Vec<Arc<dyn Agent>>,
}

impl ParallelAgent {
    pub fn new(name: impl Into<String>, sub_agents: Vec<Arc<dyn Agent>>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            sub_agents,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn sub_agents(&self) -> &[Arc<dyn Agent>] {
        &self.sub_agents
    }
}

#[async_trait]
impl Agent for ParallelAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(&self, session: &Session) -> Result<String, AdkError> {
        let runs = self.sub_agents.iter().map(|agent| agent.run(session));
        let results = futures::future::join_all(runs).await;

        let mut outputs = Vec::with_capacity(results.len());
        for result in results {
            outputs.push(result?);
        }
        Ok(outputs.join(PARALLEL_SEPARATOR))
    }

    async fn run_stream(
        &self,
        session: &Session,
        tx: mpsc::Sender<AgentEvent>,
    ) -> Result<String, AdkError> {
        let runs = self.sub_agents.iter().map(|agent| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(AgentEvent::Started(agent.name().to_string())).await;
                agent.run_stream(session, tx).await
            }
        });
        let results = futures::future::join_all(runs).await;

        let mut outputs = Vec::with_capacity(results.len());
        for result in results {
            outputs.push(result?);
        }
        Ok(outputs.join(PARALLEL_SEPARATOR))
    }
}

/// Runs its children repeatedly, up to `max_iterations` passes, stopping
/// early when a child raises the session's exit signal (see
/// [crate::adk::tool::ExitLoopTool]). The loop consumes the signal so outer
/// stages are unaffected.
pub struct LoopAgent {
    name: String,
    description: String,
    sub_agents: Vec<Arc<dyn Agent>>,
    max_iterations: u32,
}

impl LoopAgent {
    pub fn new(name: impl Into<String>, sub_agents: Vec<Arc<dyn Agent>>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            sub_agents,
            max_iterations: DEFAULT_LOOP_MAX_ITERATIONS,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn sub_agents(&self) -> &[Arc<dyn Agent>] {
        &self.sub_agents
    }
}

#[async_trait]
impl Agent for LoopAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(&self, session: &Session) -> Result<String, AdkError> {
        let mut last = String::new();
        'iterations: for iteration in 0..self.max_iterations {
            log::debug!(
                "{}: iteration {}/{}",
                self.name,
                iteration + 1,
                self.max_iterations
            );
            for agent in &self.sub_agents {
                last = agent.run(session).await?;
                if session.take_exit_request() {
                    log::info!("{}: exit requested by {}", self.name, agent.name());
                    break 'iterations;
                }
            }
        }
        Ok(last)
    }

    async fn run_stream(
        &self,
        session: &Session,
        tx: mpsc::Sender<AgentEvent>,
    ) -> Result<String, AdkError> {
        let mut last = String::new();
        'iterations: for _ in 0..self.max_iterations {
            for agent in &self.sub_agents {
                let _ = tx.send(AgentEvent::Started(agent.name().to_string())).await;
                last = agent.run_stream(session, tx.clone()).await?;
                if session.take_exit_request() {
                    break 'iterations;
                }
            }
        }
        Ok(last)
    }
}
