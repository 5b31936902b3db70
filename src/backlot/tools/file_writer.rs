// SPDX-License-Identifier: MIT

//! Plain-text file writer tool.
//!
//! The wire contract for `overwrite` is the string `"true"` or `"false"`;
//! JSON booleans are accepted as well.

use crate::adk::error::AdkError;
use crate::adk::tool::{Tool, ToolContext};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

static FILE_WRITER_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "filename": {
                "type": "string",
                "description": "Name of the file to create"
            },
            "content": {
                "type": "string",
                "description": "Text content to write"
            },
            "overwrite": {
                "type": "string",
                "description": "\"true\" to replace an existing file, \"false\" to refuse"
            },
            "directory": {
                "type": "string",
                "description": "Target directory (optional, defaults to the working directory)"
            }
        },
        "required": ["filename", "content", "overwrite"]
    })
});

#[derive(Debug, Deserialize)]
struct FileWriterArgs {
    filename: String,
    content: String,
    overwrite: Value,
    #[serde(default)]
    directory: Option<String>,
}

fn parse_overwrite(value: &Value) -> Result<bool, AdkError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(AdkError::tool(format!(
                "overwrite must be \"true\" or \"false\", got \"{}\"",
                other
            ))),
        },
        other => Err(AdkError::tool(format!(
            "overwrite must be \"true\" or \"false\", got {}",
            other
        ))),
    }
}

#[derive(Default)]
pub struct FileWriterTool;

impl FileWriterTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for FileWriterTool {
    fn name(&self) -> &str {
        "file_writer_tool"
    }

    fn description(&self) -> &str {
        "Writes a file to disk when run with a filename, content, overwrite, and an optional directory"
    }

    fn schema(&self) -> &Value {
        &FILE_WRITER_SCHEMA
    }

    async fn execute(&self, _ctx: &ToolContext<'_>, args: Value) -> Result<Value, AdkError> {
        let args: FileWriterArgs = serde_json::from_value(args)?;
        let overwrite = parse_overwrite(&args.overwrite)?;

        let directory = args.directory.as_deref().unwrap_or(".");
        tokio::fs::create_dir_all(directory).await?;

        let path = Path::new(directory).join(&args.filename);
        if !overwrite && tokio::fs::try_exists(&path).await? {
            return Err(AdkError::tool(format!(
                "file {} already exists and overwrite is \"false\"",
                path.display()
            )));
        }

        tokio::fs::write(&path, &args.content).await?;
        log::info!("wrote {} bytes to {}", args.content.len(), path.display());

        Ok(json!({
            "status": "success",
            "path": path.display().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adk::session::Session;
    use tempfile::tempdir;

    fn args(dir: &Path, filename: &str, content: &str, overwrite: Value) -> Value {
        json!({
            "filename": filename,
            "content": content,
            "overwrite": overwrite,
            "directory": dir.to_str().unwrap(),
        })
    }

    #[test]
    fn test_parse_overwrite_strings() {
        assert!(parse_overwrite(&json!("true")).unwrap());
        assert!(!parse_overwrite(&json!("false")).unwrap());
        assert!(parse_overwrite(&json!("True")).unwrap());
        assert!(parse_overwrite(&json!("maybe")).is_err());
        assert!(parse_overwrite(&json!(1)).is_err());
    }

    #[test]
    fn test_parse_overwrite_bools() {
        assert!(parse_overwrite(&json!(true)).unwrap());
        assert!(!parse_overwrite(&json!(false)).unwrap());
    }

    #[tokio::test]
    async fn test_writes_new_file() {
        let dir = tempdir().unwrap();
        let session = Session::new("");
        let ctx = ToolContext::new(&session, "file_writer");
        let tool = FileWriterTool::new();

        let result = tool
            .execute(&ctx, args(dir.path(), "pitch.txt", "a story", json!("false")))
            .await
            .unwrap();

        assert_eq!(result["status"], "success");
        let written = std::fs::read_to_string(dir.path().join("pitch.txt")).unwrap();
        assert_eq!(written, "a story");
    }

    #[tokio::test]
    async fn test_refuses_existing_file_without_overwrite() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("pitch.txt"), "original").unwrap();

        let session = Session::new("");
        let ctx = ToolContext::new(&session, "file_writer");
        let tool = FileWriterTool::new();

        let result = tool
            .execute(&ctx, args(dir.path(), "pitch.txt", "new", json!("false")))
            .await;

        assert!(result.is_err());
        let written = std::fs::read_to_string(dir.path().join("pitch.txt")).unwrap();
        assert_eq!(written, "original");
    }

    #[tokio::test]
    async fn test_overwrites_with_flag_set() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("pitch.txt"), "original").unwrap();

        let session = Session::new("");
        let ctx = ToolContext::new(&session, "file_writer");
        let tool = FileWriterTool::new();

        tool.execute(&ctx, args(dir.path(), "pitch.txt", "new", json!("true")))
            .await
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join("pitch.txt")).unwrap();
        assert_eq!(written, "new");
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("movie_pitches");

        let session = Session::new("");
        let ctx = ToolContext::new(&session, "file_writer");
        let tool = FileWriterTool::new();

        tool.execute(&ctx, args(&nested, "pitch.txt", "a story", json!("true")))
            .await
            .unwrap();

        assert!(nested.join("pitch.txt").exists());
    }
}
