// SPDX-License-Identifier: MIT

//! Gemini Model - Google's Gemini API implementation

use super::{Content, GenerationConfig, Model, Part};
use crate::adk::error::AdkError;
use crate::adk::tool::Tool;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::env;
use std::sync::Arc;

/// Google Gemini model implementation.
pub struct GeminiModel {
    client: Client,
    api_key: String,
    model_name: String,
}

impl GeminiModel {
    /// Create a new GeminiModel.
    ///
    /// Requires the `GOOGLE_API_KEY` environment variable to be set.
    pub fn new(model_name: String) -> Result<Self, AdkError> {
        let api_key = env::var("GOOGLE_API_KEY")
            .map_err(|_| AdkError::config("GOOGLE_API_KEY must be set"))?;
        Ok(Self {
            client: Client::new(),
            api_key,
            model_name,
        })
    }

    fn part_to_json(part: &Part) -> serde_json::Value {
        match part {
            Part::Text(t) => json!({ "text": t }),
            Part::FunctionCall { name, args } => {
                json!({ "functionCall": { "name": name, "args": args } })
            }
            Part::FunctionResponse { name, response } => {
                json!({ "functionResponse": { "name": name, "response": response } })
            }
        }
    }
}

#[async_trait]
impl Model for GeminiModel {
    async fn generate_content(
        &self,
        history: &[Content],
        config: Option<&GenerationConfig>,
        tools: Option<&[Arc<dyn Tool>]>,
    ) -> Result<Content, AdkError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model_name, self.api_key
        );

        // The system message becomes the systemInstruction field; everything
        // else goes into contents with the API's user/model roles.
        let mut system_parts: Vec<serde_json::Value> = Vec::new();
        let mut contents: Vec<serde_json::Value> = Vec::new();
        for c in history {
            let parts: Vec<serde_json::Value> = c.parts.iter().map(Self::part_to_json).collect();
            if c.role == "system" {
                system_parts.extend(parts);
            } else {
                contents.push(json!({ "role": c.role, "parts": parts }));
            }
        }

        let mut body = json!({ "contents": contents });

        if !system_parts.is_empty() {
            body["systemInstruction"] = json!({ "parts": system_parts });
        }

        if let Some(config) = config {
            let mut gen = serde_json::Map::new();
            if let Some(t) = config.temperature {
                gen.insert("temperature".to_string(), json!(t));
            }
            if let Some(m) = config.max_output_tokens {
                gen.insert("maxOutputTokens".to_string(), json!(m));
            }
            if let Some(p) = config.top_p {
                gen.insert("topP".to_string(), json!(p));
            }
            if let Some(k) = config.top_k {
                gen.insert("topK".to_string(), json!(k));
            }
            if !gen.is_empty() {
                body["generationConfig"] = serde_json::Value::Object(gen);
            }
        }

        if let Some(tools) = tools {
            if !tools.is_empty() {
                let function_declarations: Vec<serde_json::Value> = tools
                    .iter()
                    .map(|t| {
                        json!({
                            "name": t.name(),
                            "description": t.description(),
                            "parameters": t.schema()
                        })
                    })
                    .collect();

                body["tools"] = json!([{
                    "function_declarations": function_declarations
                }]);
            }
        }

        log::debug!(
            "Gemini request body: {}",
            serde_json::to_string(&body).unwrap_or_default()
        );

        let resp = self.client.post(&url).json(&body).send().await?;

        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(AdkError::api("gemini", text));
        }

        let resp_json: serde_json::Value = resp.json().await?;

        let candidates = resp_json["candidates"]
            .as_array()
            .ok_or_else(|| AdkError::api("gemini", "no candidates in response"))?;
        let candidate = candidates
            .first()
            .ok_or_else(|| AdkError::api("gemini", "empty candidates"))?;

        if let Some(finish_reason) = candidate.get("finishReason").and_then(|v| v.as_str()) {
            log::debug!("Gemini finish reason: {}", finish_reason);
            if finish_reason == "SAFETY" {
                return Err(AdkError::api(
                    "gemini",
                    "response blocked by safety filters",
                ));
            }
            if finish_reason == "MALFORMED_FUNCTION_CALL" {
                // Model tried to call a tool that doesn't exist - return as text
                if let Some(msg) = candidate.get("finishMessage").and_then(|m| m.as_str()) {
                    log::warn!("Gemini malformed function call: {}", msg);
                    return Ok(Content {
                        role: "model".to_string(),
                        parts: vec![Part::Text(format!(
                            "I tried to use a tool that isn't available. {}",
                            msg
                        ))],
                    });
                }
            }
        }

        let parts_json = candidate
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| {
                log::error!("no content parts in candidate: {}", candidate);
                AdkError::api("gemini", "no content parts in response")
            })?;

        let mut parts = Vec::new();
        for p in parts_json {
            if let Some(text) = p["text"].as_str() {
                parts.push(Part::Text(text.to_string()));
            } else if let Some(fc) = p.get("functionCall") {
                let name = fc["name"].as_str().unwrap_or_default().to_string();
                let args = fc["args"].clone();
                parts.push(Part::FunctionCall { name, args });
            }
        }

        Ok(Content {
            role: "model".to_string(),
            parts,
        })
    }
}
