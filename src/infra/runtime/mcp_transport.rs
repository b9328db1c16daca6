//! Generic MCP transport helpers (stdio + streamable HTTP) decoupled from tool logic.

use std::sync::Arc;

use rmcp::serve_server;
use rmcp::transport::streamable_http_server::tower::{StreamableHttpServerConfig, StreamableHttpService};

pub use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
pub use rmcp::ServerHandler;

/// Serve one MCP session over stdin/stdout until the client disconnects.
pub async fn serve_stdio<H>(handler: H) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    H: ServerHandler,
{
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let running = serve_server(handler, (stdin, stdout)).await?;
    let reason = running.waiting().await?;
    tracing::info!(?reason, "stdio session ended");
    Ok(())
}

pub fn make_streamable_http_service<H>(
    factory: impl Fn() -> H + Send + Sync + Clone + 'static,
    session_mgr: Arc<LocalSessionManager>,
) -> StreamableHttpService<H, LocalSessionManager>
where
    H: ServerHandler,
{
    let cfg = StreamableHttpServerConfig::default();
    tracing::debug!(stateful_mode = %cfg.stateful_mode, keep_alive = ?cfg.sse_keep_alive, "StreamableHttpServerConfig");
    StreamableHttpService::new(move || Ok(factory()), session_mgr, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::RaindropConfig;
    use crate::infra::mcp::factory_from_config;

    fn test_config() -> RaindropConfig {
        RaindropConfig { token: "t".into(), base_url: "http://test".into() }
    }

    #[tokio::test]
    async fn test_make_streamable_http_service() {
        let session_mgr = Arc::new(LocalSessionManager::default());
        let _service = make_streamable_http_service(factory_from_config(test_config()), session_mgr);
    }

    #[test]
    fn factory_can_be_called_repeatedly() {
        let factory = factory_from_config(test_config());
        let _ = factory();
        let _ = factory();
    }
}
