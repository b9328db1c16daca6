use thiserror::Error;

/// Failure talking to the Raindrop REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; carries the status and the raw body text.
    #[error("Raindrop API error ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("request to Raindrop API failed: {0}")]
    Transport(String),
    #[error("invalid response from Raindrop API: {0}")]
    Decode(String),
    #[error("cannot encode request query: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Per-call failure. Always rendered into an error envelope, never propagated to the transport.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ToolError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ToolError::InvalidArgument { name, reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_code_and_body() {
        let e = ApiError::Status { status: 404, body: "Not Found".into() };
        assert_eq!(e.to_string(), "Raindrop API error (404): Not Found");
        assert_eq!(e.status_code(), Some(404));
    }

    #[test]
    fn api_error_converts_transparently() {
        let e: ToolError = ApiError::Transport("connection refused".into()).into();
        assert_eq!(e.to_string(), "request to Raindrop API failed: connection refused");
    }

    #[test]
    fn unknown_tool_names_the_tool() {
        let e = ToolError::UnknownTool("frobnicate".into());
        assert_eq!(e.to_string(), "Unknown tool: frobnicate");
    }
}
