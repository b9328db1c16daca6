use async_trait::async_trait;

use crate::core::error::ApiError;
use crate::domain::ApiRequest;

/// Minimal metadata every tool must expose.
pub trait ToolSpec {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> serde_json::Value;
}

/// Backend abstraction so dispatch can run against the live API or a test double.
#[async_trait]
pub trait ApiExecutor: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<serde_json::Value, ApiError>;
}
