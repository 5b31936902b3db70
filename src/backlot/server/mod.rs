// SPDX-License-Identifier: MIT

//! HTTP surface over the declared agents.

use axum::{
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tower_http::cors::CorsLayer;

use crate::adk::agent::AgentEvent;
use crate::adk::error::AdkError;
use crate::adk::session::Session;
use crate::backlot::agents::{self, pitch};
use crate::backlot::config;

pub async fn serve(port: u16) -> Result<(), AdkError> {
    let app = router();

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    log::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router() -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/agents", get(list_agents))
        .route("/api/run", post(run_agent))
        .route("/api/run/stream", post(stream_agent))
        .route("/api/pitch", post(run_pitch))
        .layer(CorsLayer::permissive())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok", "model": config::model_name() }))
}

async fn list_agents() -> Json<Value> {
    let model = match config::model_from_env() {
        Ok(model) => model,
        Err(e) => return Json(json!({ "error": e.to_string() })),
    };

    let agents: Vec<Value> = agents::catalog(&model)
        .iter()
        .map(|agent| {
            json!({
                "name": agent.name(),
                "description": agent.description(),
            })
        })
        .collect();
    Json(json!(agents))
}

#[derive(Deserialize)]
struct RunRequest {
    agent: String,
    input: String,
}

async fn run_agent(Json(payload): Json<RunRequest>) -> Json<Value> {
    let model = match config::model_from_env() {
        Ok(model) => model,
        Err(e) => return Json(json!({ "error": e.to_string() })),
    };

    let Some(agent) = agents::find(&model, &payload.agent) else {
        return Json(json!({ "error": format!("Agent '{}' not found", payload.agent) }));
    };

    let session = Session::new(payload.input);
    match agent.run(&session).await {
        Ok(output) => Json(json!({
            "status": "completed",
            "output": output,
            "state": session.snapshot(),
        })),
        Err(e) => Json(json!({ "error": format!("Execution failed: {}", e) })),
    }
}

#[derive(Deserialize)]
struct PitchRequest {
    prompt: String,
}

async fn run_pitch(Json(payload): Json<PitchRequest>) -> Json<Value> {
    let model = match config::model_from_env() {
        Ok(model) => model,
        Err(e) => return Json(json!({ "error": e.to_string() })),
    };

    match pitch::run_pitch(model, &payload.prompt).await {
        Ok(outcome) => Json(json!({
            "status": "completed",
            "output": outcome.response,
            "state": outcome.state,
        })),
        Err(e) => Json(json!({ "error": format!("Execution failed: {}", e) })),
    }
}

async fn stream_agent(
    Json(payload): Json<RunRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel(100);

    tokio::spawn(async move {
        let model = match config::model_from_env() {
            Ok(model) => model,
            Err(e) => {
                let _ = tx.send(AgentEvent::Error(e.to_string())).await;
                return;
            }
        };

        let Some(agent) = agents::find(&model, &payload.agent) else {
            let _ = tx
                .send(AgentEvent::Error(format!(
                    "Agent '{}' not found",
                    payload.agent
                )))
                .await;
            return;
        };

        log::info!("streaming run of agent {}", agent.name());
        let session = Session::new(payload.input);
        if let Err(e) = agent.run_stream(&session, tx.clone()).await {
            log::error!("agent execution failed: {}", e);
            let _ = tx
                .send(AgentEvent::Error(format!("Execution failed: {}", e)))
                .await;
        }
    });

    let stream = ReceiverStream::new(rx).map(|event| {
        Ok(Event::default()
            .json_data(&event)
            .unwrap_or_else(|_| Event::default().data("serialization error")))
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_reports_model() {
        let Json(body) = health_check().await;
        assert_eq!(body["status"], "ok");
        assert!(body["model"].is_string());
    }

    #[test]
    fn test_router_builds() {
        let _ = router();
    }
}
