// SPDX-License-Identifier: MIT

//! Vertex AI Search data store tool.
//!
//! Configured with a fixed data-store resource identifier; queries go to the
//! discovery engine search endpoint for that store's default serving config.

use crate::adk::error::AdkError;
use crate::adk::tool::{Tool, ToolContext};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::{json, Value};
use std::env;

const DISCOVERY_ENGINE: &str = "https://discoveryengine.googleapis.com/v1";
const PAGE_SIZE: u32 = 5;

static DATASTORE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The search query to run against the data store"
            }
        },
        "required": ["query"]
    })
});

#[derive(Debug, serde::Deserialize)]
struct DatastoreArgs {
    query: String,
}

pub struct DatastoreSearchTool {
    client: Client,
    serving_config: String,
    access_token: String,
}

impl DatastoreSearchTool {
    /// `data_store_id` is the full resource name of the data store, e.g.
    /// `projects/<p>/locations/global/collections/default_collection/dataStores/<id>`.
    ///
    /// Requires the `GOOGLE_ACCESS_TOKEN` environment variable to be set.
    pub fn new(data_store_id: impl Into<String>) -> Result<Self, AdkError> {
        let access_token = env::var("GOOGLE_ACCESS_TOKEN")
            .map_err(|_| AdkError::config("GOOGLE_ACCESS_TOKEN must be set"))?;
        Ok(Self {
            client: Client::new(),
            serving_config: format!(
                "{}/servingConfigs/default_search",
                data_store_id.into()
            ),
            access_token,
        })
    }
}

fn documents_from_response(body: &Value) -> Vec<Value> {
    body.get("results")
        .and_then(|r| r.as_array())
        .map(|results| {
            results
                .iter()
                .filter_map(|result| {
                    let document = result.get("document")?;
                    let data = document
                        .get("derivedStructData")
                        .or_else(|| document.get("structData"))
                        .cloned()
                        .unwrap_or_else(|| json!({}));
                    Some(json!({
                        "id": document.get("id").cloned().unwrap_or(Value::Null),
                        "data": data,
                    }))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl Tool for DatastoreSearchTool {
    fn name(&self) -> &str {
        "datastore_search"
    }

    fn description(&self) -> &str {
        "Searches the configured Vertex AI Search data store and returns matching documents."
    }

    fn schema(&self) -> &Value {
        &DATASTORE_SCHEMA
    }

    async fn execute(&self, _ctx: &ToolContext<'_>, args: Value) -> Result<Value, AdkError> {
        let args: DatastoreArgs = serde_json::from_value(args)?;

        let url = format!("{}/{}:search", DISCOVERY_ENGINE, self.serving_config);
        let body = json!({
            "query": args.query,
            "pageSize": PAGE_SIZE,
        });

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(AdkError::api("datastore_search", text));
        }

        let body: Value = resp.json().await?;
        let documents = documents_from_response(&body);

        log::info!(
            "datastore query '{}' returned {} documents",
            args.query,
            documents.len()
        );

        Ok(json!({
            "query": args.query,
            "documents": documents,
        }))
    }
}
