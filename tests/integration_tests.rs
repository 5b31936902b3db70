//! Integration tests for agent composition and the pitch workflow
//!
//! These tests verify end-to-end behavior using mock components.

use async_trait::async_trait;
use backlot_rs::adk::agent::{Agent, LlmAgent, LoopAgent, SequentialAgent};
use backlot_rs::adk::error::AdkError;
use backlot_rs::adk::model::{Content, GenerationConfig, Model, Part};
use backlot_rs::adk::session::Session;
use backlot_rs::adk::tool::{ExitLoopTool, Tool, ToolContext};
use backlot_rs::backlot::agents::pitch;
use backlot_rs::backlot::tools::AppendToStateTool;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Components
// ============================================================================

/// Mock model that replays scripted responses, then repeats a fallback text.
/// Also records every history it was called with.
struct MockModel {
    responses: Vec<Content>,
    call_count: AtomicUsize,
    histories: Mutex<Vec<Vec<Content>>>,
}

impl MockModel {
    fn new(responses: Vec<Content>) -> Self {
        Self {
            responses,
            call_count: AtomicUsize::new(0),
            histories: Mutex::new(Vec::new()),
        }
    }

    fn text_response(text: &str) -> Content {
        Content {
            role: "model".to_string(),
            parts: vec![Part::Text(text.to_string())],
        }
    }

    fn tool_call_response(tool_name: &str, args: Value) -> Content {
        Content {
            role: "model".to_string(),
            parts: vec![Part::FunctionCall {
                name: tool_name.to_string(),
                args,
            }],
        }
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Model for MockModel {
    async fn generate_content(
        &self,
        history: &[Content],
        _config: Option<&GenerationConfig>,
        _tools: Option<&[Arc<dyn Tool>]>,
    ) -> Result<Content, AdkError> {
        self.histories.lock().unwrap().push(history.to_vec());
        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(idx) {
            Some(content) => Ok(content.clone()),
            None => Ok(MockModel::text_response("ok")),
        }
    }
}

static MOCK_TOOL_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "input": {"type": "string"}
        }
    })
});

/// Mock tool that returns a predefined response.
struct MockTool {
    name: String,
    response: Value,
}

impl MockTool {
    fn new(name: &str, response: Value) -> Self {
        Self {
            name: name.to_string(),
            response,
        }
    }
}

#[async_trait]
impl Tool for MockTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "A mock tool"
    }

    fn schema(&self) -> &Value {
        &MOCK_TOOL_SCHEMA
    }

    async fn execute(&self, _ctx: &ToolContext<'_>, _args: Value) -> Result<Value, AdkError> {
        Ok(self.response.clone())
    }
}

// ============================================================================
// LLM agent behavior
// ============================================================================

#[tokio::test]
async fn test_agent_answers_and_sets_output_key() {
    let model = Arc::new(MockModel::new(vec![MockModel::text_response(
        "a three act outline",
    )]));
    let agent = LlmAgent::new("writer", model.clone()).with_output_key("story_so_far");

    let session = Session::new("write about Ada Lovelace");
    let result = agent.run(&session).await.unwrap();

    assert_eq!(result, "a three act outline");
    assert_eq!(session.get("story_so_far"), Some(json!("a three act outline")));
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_agent_feeds_tool_results_back_to_model() {
    let model = Arc::new(MockModel::new(vec![
        MockModel::tool_call_response("lookup", json!({"input": "q"})),
        MockModel::text_response("answered"),
    ]));
    let agent = LlmAgent::new("caller", model.clone())
        .with_tool(Arc::new(MockTool::new("lookup", json!({"answer": 42}))));

    let session = Session::new("");
    let result = agent.run(&session).await.unwrap();
    assert_eq!(result, "answered");
    assert_eq!(model.calls(), 2);

    // The second model call must carry the tool's response in history.
    let histories = model.histories.lock().unwrap();
    let second = &histories[1];
    let last = second.last().unwrap();
    assert!(last.parts.iter().any(|part| matches!(
        part,
        Part::FunctionResponse { name, response }
            if name == "lookup" && response["answer"] == 42
    )));
}

#[tokio::test]
async fn test_unknown_tool_surfaces_as_error_response() {
    let model = Arc::new(MockModel::new(vec![
        MockModel::tool_call_response("missing", json!({})),
        MockModel::text_response("done"),
    ]));
    let agent = LlmAgent::new("caller", model.clone());

    let session = Session::new("");
    agent.run(&session).await.unwrap();

    let histories = model.histories.lock().unwrap();
    let second = &histories[1];
    let last = second.last().unwrap();
    assert!(last.parts.iter().any(|part| matches!(
        part,
        Part::FunctionResponse { name, response }
            if name == "missing" && response["error"].is_string()
    )));
}

#[tokio::test]
async fn test_researcher_style_appends_through_tool() {
    let model = Arc::new(MockModel::new(vec![
        MockModel::tool_call_response(
            "append_to_state",
            json!({"field": "research", "response": "fact1"}),
        ),
        MockModel::tool_call_response(
            "append_to_state",
            json!({"field": "research", "response": "fact2"}),
        ),
        MockModel::text_response("research recorded"),
    ]));
    let agent =
        LlmAgent::new("researcher", model).with_tool(Arc::new(AppendToStateTool::new()));

    let session = Session::new("");
    let result = agent.run(&session).await.unwrap();

    assert_eq!(result, "research recorded");
    assert_eq!(session.get("research"), Some(json!(["fact1", "fact2"])));
}

// ============================================================================
// Composition
// ============================================================================

#[tokio::test]
async fn test_sequential_agents_share_state() {
    let writer_model = Arc::new(MockModel::new(vec![MockModel::text_response("the story")]));
    let titler_model = Arc::new(MockModel::new(vec![MockModel::text_response("the title")]));

    let team = SequentialAgent::new(
        "team",
        vec![
            Arc::new(LlmAgent::new("writer", writer_model).with_output_key("story_so_far")),
            Arc::new(
                LlmAgent::new("titler", titler_model)
                    .with_instruction("Title this: {story_so_far}")
                    .with_output_key("title"),
            ),
        ],
    );

    let session = Session::new("go");
    let result = team.run(&session).await.unwrap();

    assert_eq!(result, "the title");
    assert_eq!(session.get("story_so_far"), Some(json!("the story")));
    assert_eq!(session.get("title"), Some(json!("the title")));
}

#[tokio::test]
async fn test_loop_is_bounded_without_exit_signal() {
    let model = Arc::new(MockModel::new(vec![]));
    let child: Arc<dyn Agent> = Arc::new(LlmAgent::new("drafter", model.clone()));
    let looped = LoopAgent::new("room", vec![child]).with_max_iterations(5);

    let session = Session::new("go");
    looped.run(&session).await.unwrap();

    assert_eq!(model.calls(), 5);
}

#[tokio::test]
async fn test_loop_ends_early_when_critic_exits() {
    // Iteration 1: writer drafts, critic exits. The loop must not reach
    // iteration 2.
    let writer_model = Arc::new(MockModel::new(vec![])); // always text
    let critic_model = Arc::new(MockModel::new(vec![MockModel::tool_call_response(
        "exit_loop",
        json!({}),
    )]));

    let writer: Arc<dyn Agent> =
        Arc::new(LlmAgent::new("writer", writer_model.clone()).with_output_key("story_so_far"));
    let critic: Arc<dyn Agent> = Arc::new(
        LlmAgent::new("critic", critic_model.clone())
            .with_output_key("critique")
            .with_tool(Arc::new(ExitLoopTool::new())),
    );

    let looped = LoopAgent::new("room", vec![writer, critic]).with_max_iterations(5);

    let session = Session::new("go");
    looped.run(&session).await.unwrap();

    assert_eq!(writer_model.calls(), 1);
    assert_eq!(critic_model.calls(), 1);
    // Exit skipped the critique summary and the signal was consumed.
    assert!(session.get("critique").is_none());
    assert!(!session.exit_requested());
}

// ============================================================================
// The pitch pipeline
// ============================================================================

#[tokio::test]
async fn test_pitch_pipeline_is_bounded() {
    // All-text model: the critic never exits, so the writers room runs all
    // 5 iterations of its 4 agents, then titler, two parallel reports, and
    // the file writer each call once: 5*4 + 1 + 2 + 1 = 24.
    let model = Arc::new(MockModel::new(vec![]));
    let outcome = pitch::run_pitch(model.clone(), "a stubborn lighthouse keeper")
        .await
        .unwrap();

    assert_eq!(model.calls(), 24);
    assert_eq!(outcome.response, "ok");

    // The greeter role recorded the prompt as a one-element list.
    assert_eq!(
        outcome.state["prompt"],
        json!(["a stubborn lighthouse keeper"])
    );

    // Every output key was written.
    for key in [
        "questions",
        "story_so_far",
        "critique",
        "title",
        "box_office_report",
        "casting_report",
    ] {
        assert_eq!(outcome.state[key], json!("ok"), "missing state key {}", key);
    }
}

#[tokio::test]
async fn test_pitch_pipeline_exits_early_on_critic_signal() {
    // Calls 1-3 (questioner, researcher, writer) return text; call 4 is the
    // critic invoking exit_loop. The remaining stages still run: titler,
    // two reports, file writer.
    let model = Arc::new(MockModel::new(vec![
        MockModel::text_response("q1..q5"),
        MockModel::text_response("notes"),
        MockModel::text_response("draft"),
        MockModel::tool_call_response("exit_loop", json!({})),
    ]));

    let outcome = pitch::run_pitch(model.clone(), "an astronomer").await.unwrap();

    assert_eq!(model.calls(), 8);
    assert_eq!(outcome.state["story_so_far"], json!("draft"));
    assert_eq!(outcome.state["title"], json!("ok"));
    // The critic exited without a closing summary.
    assert!(outcome.state.get("critique").is_none() || outcome.state["critique"].is_null());
}
