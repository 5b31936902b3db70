// SPDX-License-Identifier: MIT

//! Tool trait and execution context.

use crate::adk::error::AdkError;
use crate::adk::session::Session;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Context handed to a tool invocation: the run session plus the name of
/// the calling agent.
pub struct ToolContext<'a> {
    session: &'a Session,
    agent: &'a str,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a Session, agent: &'a str) -> Self {
        Self { session, agent }
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    pub fn agent_name(&self) -> &str {
        self.agent
    }

    /// Signal the innermost running loop to stop.
    pub fn request_exit(&self) {
        self.session.request_exit();
    }
}

/// Trait for tools that can be called by agents.
///
/// `name()`, `description()` and `schema()` return references so the agent
/// loop can hand them to the model on every turn without cloning;
/// implementations keep the schema in a `Lazy` static.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must be unique within an agent's tool set)
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does
    fn description(&self) -> &str;

    /// JSON schema for the tool's input parameters
    fn schema(&self) -> &Value;

    /// Execute the tool with the given arguments
    async fn execute(&self, ctx: &ToolContext<'_>, args: Value) -> Result<Value, AdkError>;
}

static EXIT_LOOP_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {}
    })
});

/// Ends the enclosing loop.
///
/// Give it to the agent whose judgement decides when iteration should stop;
/// the loop observes the signal after that agent's turn.
#[derive(Default)]
pub struct ExitLoopTool;

impl ExitLoopTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ExitLoopTool {
    fn name(&self) -> &str {
        "exit_loop"
    }

    fn description(&self) -> &str {
        "Exits the loop. Call this function only when you are instructed to do so."
    }

    fn schema(&self) -> &Value {
        &EXIT_LOOP_SCHEMA
    }

    async fn execute(&self, ctx: &ToolContext<'_>, _args: Value) -> Result<Value, AdkError> {
        log::info!("agent {} requested loop exit", ctx.agent_name());
        ctx.request_exit();
        Ok(json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exit_loop_sets_session_flag() {
        let session = Session::new("");
        let ctx = ToolContext::new(&session, "critic");
        let result = ExitLoopTool::new().execute(&ctx, json!({})).await.unwrap();
        assert_eq!(result, json!({}));
        assert!(session.exit_requested());
    }

    #[test]
    fn test_tool_context_exposes_agent_name() {
        let session = Session::new("");
        let ctx = ToolContext::new(&session, "researcher");
        assert_eq!(ctx.agent_name(), "researcher");
    }
}
