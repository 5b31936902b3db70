// SPDX-License-Identifier: MIT

//! Wikipedia lookup tool.
//!
//! Uses the MediaWiki query API (search generator + intro extracts), which
//! needs no API key.

use crate::adk::error::AdkError;
use crate::adk::tool::{Tool, ToolContext};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const WIKIPEDIA_API: &str = "https://en.wikipedia.org/w/api.php";
const USER_AGENT: &str = concat!("backlot-rs/", env!("CARGO_PKG_VERSION"));

static WIKIPEDIA_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The topic to look up on Wikipedia"
            },
            "limit": {
                "type": "integer",
                "description": "Number of articles to return (default 3, max 10)"
            }
        },
        "required": ["query"]
    })
});

#[derive(Debug, Deserialize)]
struct WikipediaArgs {
    query: String,
    #[serde(default)]
    limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct WikipediaPage {
    pub title: String,
    pub summary: String,
}

pub struct WikipediaTool {
    client: Client,
}

impl WikipediaTool {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for WikipediaTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract (title, intro extract) pairs from a MediaWiki query response,
/// ordered by search rank.
fn pages_from_response(body: &Value) -> Vec<WikipediaPage> {
    let Some(pages) = body
        .get("query")
        .and_then(|q| q.get("pages"))
        .and_then(|p| p.as_object())
    else {
        return Vec::new();
    };

    let mut ranked: Vec<(u64, WikipediaPage)> = pages
        .values()
        .filter_map(|page| {
            let title = page.get("title")?.as_str()?.to_string();
            let summary = page
                .get("extract")
                .and_then(|e| e.as_str())
                .unwrap_or_default()
                .to_string();
            let rank = page.get("index").and_then(|i| i.as_u64()).unwrap_or(u64::MAX);
            Some((rank, WikipediaPage { title, summary }))
        })
        .collect();

    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.into_iter().map(|(_, page)| page).collect()
}

#[async_trait]
impl Tool for WikipediaTool {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn description(&self) -> &str {
        "Searches Wikipedia and returns article summaries for a query."
    }

    fn schema(&self) -> &Value {
        &WIKIPEDIA_SCHEMA
    }

    async fn execute(&self, _ctx: &ToolContext<'_>, args: Value) -> Result<Value, AdkError> {
        let args: WikipediaArgs = serde_json::from_value(args)?;
        let limit = args.limit.unwrap_or(3).min(10);

        let mut url = reqwest::Url::parse(WIKIPEDIA_API)?;
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("format", "json")
            .append_pair("prop", "extracts")
            .append_pair("exintro", "1")
            .append_pair("explaintext", "1")
            .append_pair("redirects", "1")
            .append_pair("generator", "search")
            .append_pair("gsrsearch", &args.query)
            .append_pair("gsrlimit", &limit.to_string());

        let resp = self.client.get(url).send().await?;

        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(AdkError::api("wikipedia", text));
        }

        let body: Value = resp.json().await?;
        let results = pages_from_response(&body);

        log::info!(
            "wikipedia query '{}' returned {} pages",
            args.query,
            results.len()
        );

        Ok(json!({
            "query": args.query,
            "results": results,
        }))
    }
}
