use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use rmcp::model::{CallToolResult, JsonObject, Tool};

use crate::core::envelope;
use crate::core::error::ToolError;
use crate::core::tool::ApiExecutor;
use crate::infra::logging::log_metric;
use crate::tools::args::ArgBag;
use crate::tools::catalog::{self, CATALOG};
use crate::tools::operation::Operation;

/// Name → operation lookup plus the executor every call goes through.
#[derive(Clone)]
pub struct Dispatcher {
    by_name: Arc<HashMap<&'static str, &'static Operation>>,
    executor: Arc<dyn ApiExecutor>,
}

impl Dispatcher {
    pub fn new(executor: Arc<dyn ApiExecutor>) -> Self {
        let by_name: HashMap<_, _> = CATALOG.iter().map(|op| (op.name, *op)).collect();
        Self { by_name: Arc::new(by_name), executor }
    }

    pub fn list(&self) -> Vec<Tool> {
        catalog::list_tools()
    }

    pub fn lookup(&self, name: &str) -> Option<&'static Operation> {
        self.by_name.get(name).copied()
    }

    /// Run one tool call to completion. Failures come back as error envelopes.
    pub async fn call(&self, name: &str, arguments: Option<&JsonObject>) -> CallToolResult {
        let empty = JsonObject::new();
        let args = ArgBag::new(arguments.unwrap_or(&empty));
        let start = Instant::now();
        metrics::counter!("raindrop_tool_calls_total", "tool" => name.to_owned()).increment(1);

        match self.try_call(name, &args).await {
            Ok(text) => {
                log_metric(name, "tool_latency_ms", start.elapsed().as_millis() as f64);
                envelope::success(text)
            }
            Err(err) => {
                tracing::warn!(tool = name, error = %err, "tool call failed");
                metrics::counter!("raindrop_tool_errors_total", "tool" => name.to_owned()).increment(1);
                envelope::failure(&err)
            }
        }
    }

    async fn try_call(&self, name: &str, args: &ArgBag<'_>) -> Result<String, ToolError> {
        let op = self
            .lookup(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_owned()))?;
        let request = op.request(args)?;
        tracing::debug!(tool = name, request = %request, "dispatching");
        tracing::trace!(body = ?request.body, "request body");
        let payload = self.executor.execute(&request).await?;
        Ok(op.render(args, &payload))
    }
}
