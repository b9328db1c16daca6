//! Result envelope: one text item, with `isError` always set.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value as JsonValue;

use crate::core::error::ToolError;

pub fn success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

pub fn failure(err: &ToolError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error: {err}"))])
}

/// Two-space pretty JSON.
pub fn pretty(value: &JsonValue) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Text of the single content item, read through the wire shape.
pub fn text_of(result: &CallToolResult) -> Option<String> {
    let wire = serde_json::to_value(result).ok()?;
    wire["content"][0]["text"].as_str().map(str::to_owned)
}
