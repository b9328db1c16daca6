use std::net::SocketAddr;

use crate::infra::config::{Config, Mode};
use crate::infra::mcp::{factory_from_config, SERVER_NAME};

pub async fn run_server(cfg: Config) -> anyhow::Result<()> {
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        base_url = %cfg.raindrop.base_url,
        "BOOT {SERVER_NAME}"
    );

    let factory = factory_from_config(cfg.raindrop.clone());

    if cfg.mode == Mode::Stdio {
        tracing::info!("Raindrop MCP Server running on stdio");
        crate::infra::runtime::mcp_transport::serve_stdio(factory())
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let app = crate::infra::http_app::build_app(factory);
    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    tracing::info!(%addr, "Raindrop MCP Server listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
