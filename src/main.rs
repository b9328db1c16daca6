use std::process::ExitCode;

use raindrop_mcp_server::{cli, infra};

#[tokio::main]
async fn main() -> ExitCode {
    infra::logging::init();
    cli::run().await
}
