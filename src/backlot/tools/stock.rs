// SPDX-License-Identifier: MIT

//! Stock price lookup backed by Yahoo Finance.
//!
//! Unlike the other tools, every failure here is logged and shaped into a
//! structured error result for the model instead of propagating.

use crate::adk::error::AdkError;
use crate::adk::tool::{Tool, ToolContext};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};
use yahoo_finance_api as yahoo;

static GET_STOCK_PRICE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "symbol": {
                "type": "string",
                "description": "The stock symbol (e.g., \"AAPL\", \"GOOG\")"
            }
        },
        "required": ["symbol"]
    })
});

#[derive(Debug, Deserialize)]
struct StockArgs {
    symbol: String,
}

/// Shape a lookup outcome into the tool's wire contract:
/// `{"current_price": x}` on data, `{"status": "error", ...}` otherwise.
fn price_result(symbol: &str, outcome: Result<Option<f64>, String>) -> Value {
    match outcome {
        Ok(Some(price)) => json!({ "current_price": price }),
        Ok(None) => json!({
            "status": "error",
            "error_message": "could not find data"
        }),
        Err(message) => json!({
            "status": "error",
            "error_message": format!("Error retrieving stock price for {}: {}", symbol, message)
        }),
    }
}

#[derive(Default)]
pub struct StockPriceTool;

impl StockPriceTool {
    pub fn new() -> Self {
        Self
    }

    async fn latest_close(symbol: &str) -> Result<Option<f64>, yahoo::YahooError> {
        let provider = yahoo::YahooConnector::new()?;
        let response = provider.get_latest_quotes(symbol, "1d").await?;
        let quotes = response.quotes()?;
        Ok(quotes.last().map(|quote| quote.close))
    }
}

#[async_trait]
impl Tool for StockPriceTool {
    fn name(&self) -> &str {
        "get_stock_price"
    }

    fn description(&self) -> &str {
        "Retrieves the current stock price for a given symbol."
    }

    fn schema(&self) -> &Value {
        &GET_STOCK_PRICE_SCHEMA
    }

    async fn execute(&self, _ctx: &ToolContext<'_>, args: Value) -> Result<Value, AdkError> {
        let args: StockArgs = serde_json::from_value(args)?;

        let outcome = Self::latest_close(&args.symbol)
            .await
            .map_err(|e| e.to_string());
        if let Err(message) = &outcome {
            log::error!("error retrieving stock price for {}: {}", args.symbol, message);
        }

        Ok(price_result(&args.symbol, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_result_with_data() {
        let result = price_result("AAPL", Ok(Some(187.44)));
        assert_eq!(result, json!({"current_price": 187.44}));
    }

    #[test]
    fn test_price_result_without_data() {
        let result = price_result("ZZZZ", Ok(None));
        assert_eq!(result["status"], "error");
        assert_eq!(result["error_message"], "could not find data");
    }

    #[test]
    fn test_price_result_on_fetch_failure() {
        let result = price_result("AAPL", Err("connection refused".to_string()));
        assert_eq!(result["status"], "error");
        let message = result["error_message"].as_str().unwrap();
        assert!(message.contains("AAPL"));
        assert!(message.contains("connection refused"));
        assert!(!message.is_empty());
    }
}
