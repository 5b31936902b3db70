// SPDX-License-Identifier: MIT

//! Web search tool backed by the Google Programmable Search JSON API.

use crate::adk::error::AdkError;
use crate::adk::tool::{Tool, ToolContext};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

static GOOGLE_SEARCH_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The search query"
            },
            "count": {
                "type": "integer",
                "description": "Number of results to return (default 5, max 10)"
            }
        },
        "required": ["query"]
    })
});

#[derive(Debug, Deserialize)]
struct GoogleSearchArgs {
    query: String,
    #[serde(default)]
    count: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

pub struct GoogleSearchTool {
    client: Client,
    api_key: String,
    engine_id: String,
}

impl GoogleSearchTool {
    pub fn new() -> Result<Self, AdkError> {
        let api_key = env::var("GOOGLE_API_KEY")
            .map_err(|_| AdkError::config("GOOGLE_API_KEY must be set"))?;
        let engine_id = env::var("GOOGLE_CSE_ID")
            .map_err(|_| AdkError::config("GOOGLE_CSE_ID must be set"))?;
        Ok(Self {
            client: Client::new(),
            api_key,
            engine_id,
        })
    }
}

fn results_from_response(body: &Value) -> Vec<SearchResult> {
    body.get("items")
        .and_then(|items| items.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    Some(SearchResult {
                        title: item.get("title")?.as_str()?.to_string(),
                        url: item.get("link")?.as_str()?.to_string(),
                        snippet: item
                            .get("snippet")
                            .and_then(|s| s.as_str())
                            .unwrap_or_default()
                            .to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl Tool for GoogleSearchTool {
    fn name(&self) -> &str {
        "google_search"
    }

    fn description(&self) -> &str {
        "Performs a Google search to retrieve up-to-date information from the web."
    }

    fn schema(&self) -> &Value {
        &GOOGLE_SEARCH_SCHEMA
    }

    async fn execute(&self, _ctx: &ToolContext<'_>, args: Value) -> Result<Value, AdkError> {
        let args: GoogleSearchArgs = serde_json::from_value(args)?;
        let count = args.count.unwrap_or(5).min(10);

        let mut url = reqwest::Url::parse(SEARCH_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("cx", &self.engine_id)
            .append_pair("q", &args.query)
            .append_pair("num", &count.to_string());

        let resp = self.client.get(url).send().await?;

        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(AdkError::api("google_search", text));
        }

        let body: Value = resp.json().await?;
        let results = results_from_response(&body);

        Ok(json!({
            "query": args.query,
            "results": results,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_from_response() {
        let body = json!({
            "items": [
                {"title": "A", "link": "https://a.example", "snippet": "alpha"},
                {"title": "B", "link": "https://b.example"}
            ]
        });

        let results = results_from_response(&body);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "A");
        assert_eq!(results[0].snippet, "alpha");
        assert_eq!(results[1].snippet, "");
    }

    #[test]
    fn test_results_from_response_no_items() {
        assert!(results_from_response(&json!({})).is_empty());
    }
}
