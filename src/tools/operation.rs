use serde_json::Value as JsonValue;

use crate::core::envelope::pretty;
use crate::core::error::ToolError;
use crate::core::tool::ToolSpec;
use crate::domain::ApiRequest;
use crate::tools::args::ArgBag;

/// How a successful API payload turns into the text returned to the client.
#[derive(Clone, Copy)]
pub enum Render {
    /// Pretty-printed payload.
    Json,
    /// Confirmation line, blank line, then the pretty-printed payload.
    Confirm(fn(&ArgBag<'_>) -> String),
    /// Confirmation line only; the payload is dropped.
    Message(fn(&ArgBag<'_>) -> String),
}

/// One named tool: its catalog entry plus the request builder and renderer behind it.
pub struct Operation {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: fn() -> JsonValue,
    pub build: fn(&ArgBag<'_>) -> Result<ApiRequest, ToolError>,
    pub render: Render,
}

impl Operation {
    pub fn request(&self, args: &ArgBag<'_>) -> Result<ApiRequest, ToolError> {
        (self.build)(args)
    }

    pub fn render(&self, args: &ArgBag<'_>, payload: &JsonValue) -> String {
        match self.render {
            Render::Json => pretty(payload),
            Render::Confirm(line) => format!("{}\n\n{}", line(args), pretty(payload)),
            Render::Message(line) => line(args),
        }
    }
}

impl ToolSpec for Operation {
    fn name(&self) -> &'static str {
        self.name
    }
    fn description(&self) -> &'static str {
        self.description
    }
    fn input_schema(&self) -> JsonValue {
        (self.schema)()
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Schema for tools that take no arguments.
pub fn no_args() -> JsonValue {
    serde_json::json!({ "type": "object", "properties": {} })
}

/// Identifier recorded under `key` for use in confirmation lines.
pub fn shown_id(args: &ArgBag<'_>, key: &'static str) -> String {
    args.id(key).unwrap_or_default()
}
