//! Readers over the untyped argument object a client sends with a tool call.
//!
//! A field counts as present when its key exists and the value is not `null`.
//! Truthiness never matters: `false`, `0` and `""` are forwarded like any other value.

use rmcp::model::JsonObject;
use serde_json::{json, Map, Value as JsonValue};

use crate::core::error::ToolError;

#[derive(Debug, Clone, Copy)]
pub struct ArgBag<'a>(&'a JsonObject);

impl<'a> ArgBag<'a> {
    pub fn new(args: &'a JsonObject) -> Self {
        Self(args)
    }

    pub fn get(&self, key: &str) -> Option<&'a JsonValue> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn require(&self, key: &'static str) -> Result<&'a JsonValue, ToolError> {
        self.get(key).ok_or(ToolError::MissingArgument(key))
    }

    pub fn is_true(&self, key: &str) -> bool {
        matches!(self.get(key), Some(JsonValue::Bool(true)))
    }

    /// Integer identifier for a path segment (`/raindrop/{id}`).
    pub fn id(&self, key: &'static str) -> Result<String, ToolError> {
        integer_segment(key, self.require(key)?)
    }

    pub fn optional_id(&self, key: &'static str) -> Result<Option<String>, ToolError> {
        self.get(key).map(|v| integer_segment(key, v)).transpose()
    }

    /// Query parameter text for `key`, if present.
    pub fn query_text(&self, key: &str) -> Option<String> {
        self.get(key).map(scalar_text)
    }
}

fn integer_segment(name: &'static str, value: &JsonValue) -> Result<String, ToolError> {
    match value {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i.to_string());
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok((f as i64).to_string()),
                _ => Err(ToolError::invalid(name, format!("expected an integer, got {n}"))),
            }
        }
        JsonValue::String(s) => s
            .trim()
            .parse::<i64>()
            .map(|i| i.to_string())
            .map_err(|_| ToolError::invalid(name, format!("expected an integer, got \"{s}\""))),
        other => Err(ToolError::invalid(name, format!("expected an integer, got {other}"))),
    }
}

// 2^53: beyond this an f64 no longer holds every integer exactly.
const EXACT_F64_INT: f64 = 9_007_199_254_740_992.0;

/// Plain-text form of a scalar: strings unquoted, integral floats without `.0`.
pub fn scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= EXACT_F64_INT => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Outgoing JSON body assembled field by field from an [`ArgBag`].
#[derive(Debug, Default)]
pub struct Body(Map<String, JsonValue>);

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: JsonValue) -> Self {
        self.0.insert(key.to_owned(), value);
        self
    }

    /// Copy `key` verbatim when present.
    pub fn copy(self, args: &ArgBag<'_>, key: &str) -> Self {
        self.copy_as(args, key, key)
    }

    pub fn copy_as(mut self, args: &ArgBag<'_>, from: &str, to: &str) -> Self {
        if let Some(v) = args.get(from) {
            self.0.insert(to.to_owned(), v.clone());
        }
        self
    }

    /// Present `from` becomes `{ "$id": value }` under `to`.
    pub fn reference(mut self, args: &ArgBag<'_>, from: &str, to: &str) -> Self {
        if let Some(v) = args.get(from) {
            self.0.insert(to.to_owned(), json!({ "$id": v }));
        }
        self
    }

    /// `key: true` becomes the empty-object marker `key: {}`.
    pub fn marker(mut self, args: &ArgBag<'_>, key: &str) -> Self {
        if args.is_true(key) {
            self.0.insert(key.to_owned(), json!({}));
        }
        self
    }

    pub fn build(self) -> JsonValue {
        JsonValue::Object(self.0)
    }
}
