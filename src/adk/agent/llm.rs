// SPDX-License-Identifier: MIT

//! LLM Agent - model + instruction template + tools
//!
//! Renders its instruction against session state, then sends the
//! conversation to the model and executes requested tool calls in a loop
//! until a text response arrives.

use super::{Agent, AgentEvent};
use crate::adk::error::AdkError;
use crate::adk::instruction;
use crate::adk::model::{Content, Model, Part};
use crate::adk::session::Session;
use crate::adk::tool::{Tool, ToolContext};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::mpsc;

const DEFAULT_MAX_TURNS: u32 = 10;

/// Standard LLM agent with tool calling support.
pub struct LlmAgent {
    name: String,
    description: String,
    instruction: String,
    model: Arc<dyn Model>,
    tools: Vec<Arc<dyn Tool>>,
    output_key: Option<String>,
    max_turns: u32,
}

impl LlmAgent {
    pub fn new(name: impl Into<String>, model: Arc<dyn Model>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            instruction: String::new(),
            model,
            tools: Vec::new(),
            output_key: None,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    /// State key the agent's final text is written to.
    pub fn with_output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = Some(key.into());
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn output_key(&self) -> Option<&str> {
        self.output_key.as_deref()
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    fn tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    async fn run_inner(
        &self,
        session: &Session,
        tx: Option<&mpsc::Sender<AgentEvent>>,
    ) -> Result<String, AdkError> {
        let rendered = instruction::render(&self.instruction, session)?;
        let mut history = vec![
            Content::text("system", rendered),
            Content::text("user", session.input()),
        ];

        // A stale exit flag from outside a loop must not stop this agent;
        // only a transition raised by its own tools does.
        let exit_before = session.exit_requested();

        for turn in 0..self.max_turns {
            log::debug!("agent {} turn {}/{}", self.name, turn + 1, self.max_turns);
            let response = self
                .model
                .generate_content(&history, None, Some(&self.tools))
                .await?;

            // A non-empty text part ends the run, before any tool calls in
            // the same response are considered.
            for part in &response.parts {
                if let Part::Text(text) = part {
                    if !text.is_empty() {
                        if let Some(key) = &self.output_key {
                            session.set(key, Value::String(text.clone()));
                        }
                        if let Some(tx) = tx {
                            let _ = tx.send(AgentEvent::Answer(text.clone())).await;
                        }
                        return Ok(text.clone());
                    }
                }
            }

            let calls: Vec<(&str, &Value)> = response
                .parts
                .iter()
                .filter_map(|part| match part {
                    Part::FunctionCall { name, args } => Some((name.as_str(), args)),
                    _ => None,
                })
                .collect();

            if calls.is_empty() {
                log::warn!(
                    "agent {} received empty response with no function calls",
                    self.name
                );
                return Ok(String::new());
            }

            let ctx = ToolContext::new(session, &self.name);
            let mut responses = Vec::with_capacity(calls.len());
            for (name, args) in calls {
                log::info!("agent {} tool call: {} {}", self.name, name, args);
                if let Some(tx) = tx {
                    let _ = tx
                        .send(AgentEvent::ToolCall {
                            name: name.to_string(),
                            args: args.clone(),
                        })
                        .await;
                }

                let result = match self.tool(name) {
                    Some(tool) => match tool.execute(&ctx, args.clone()).await {
                        Ok(value) => value,
                        Err(e) => {
                            log::error!("tool {} failed: {}", name, e);
                            json!({ "error": e.to_string() })
                        }
                    },
                    None => {
                        log::error!("tool {} not found", name);
                        json!({ "error": format!("Tool {} not found", name) })
                    }
                };

                if let Some(tx) = tx {
                    let _ = tx
                        .send(AgentEvent::ToolResult {
                            name: name.to_string(),
                            result: result.clone(),
                        })
                        .await;
                }

                responses.push(Part::FunctionResponse {
                    name: name.to_string(),
                    response: result,
                });
            }

            history.push(response);
            history.push(Content {
                role: "user".to_string(),
                parts: responses,
            });

            // One of this agent's tools asked to end the loop: stop without
            // a closing summary, leaving the output key untouched.
            if !exit_before && session.exit_requested() {
                log::info!("agent {} stopping after exit request", self.name);
                return Ok(String::new());
            }
        }

        log::error!("agent {} reached max turns without a text response", self.name);
        Err(AdkError::MaxTurns {
            kind: "turns".to_string(),
            limit: self.max_turns,
        })
    }
}

#[async_trait]
impl Agent for LlmAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(&self, session: &Session) -> Result<String, AdkError> {
        self.run_inner(session, None).await
    }

    async fn run_stream(
        &self,
        session: &Session,
        tx: mpsc::Sender<AgentEvent>,
    ) -> Result<String, AdkError> {
        self.run_inner(session, Some(&tx)).await
    }
}
