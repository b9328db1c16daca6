//! MCP server integration for raindrop-mcp-server.
//!
//! `RaindropSvc` answers `tools/list` from the static catalog and `tools/call`
//! through the [`Dispatcher`]. Tool failures come back as `isError` results,
//! never as JSON-RPC errors.

use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler,
};

use crate::clients::raindrop::RaindropRemote;
use crate::core::tool::ApiExecutor;
use crate::infra::config::RaindropConfig;
use crate::tools::Dispatcher;

pub const SERVER_NAME: &str = "raindrop-mcp-server";

#[derive(Clone)]
pub struct RaindropSvc {
    dispatcher: Dispatcher,
}

impl RaindropSvc {
    pub fn new(executor: Arc<dyn ApiExecutor>) -> Self {
        Self { dispatcher: Dispatcher::new(executor) }
    }

    pub fn from_config(cfg: &RaindropConfig) -> Self {
        Self::new(Arc::new(RaindropRemote::from_config(cfg)))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl ServerHandler for RaindropSvc {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo {
            instructions: Some(
                "Raindrop.io bookmarks: read and manage raindrops, collections and tags.".to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        };
        info.server_info.name = SERVER_NAME.to_string();
        info.server_info.version = env!("CARGO_PKG_VERSION").to_string();
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        tracing::debug!("listing tools");
        Ok(ListToolsResult::with_all_items(self.dispatcher.list()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = %request.name, "call_tool invoked");
        Ok(self
            .dispatcher
            .call(&request.name, request.arguments.as_ref())
            .await)
    }
}

/// Handler bound to the live Raindrop API.
pub fn factory_from_config(cfg: RaindropConfig) -> impl Fn() -> RaindropSvc + Clone + Send + Sync + 'static {
    let svc = RaindropSvc::from_config(&cfg);
    move || svc.clone()
}
