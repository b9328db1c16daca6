use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

use crate::clients::raindrop::RaindropRemote;
use crate::core::envelope::text_of;
use crate::core::tool::ToolSpec;
use crate::infra::config::{Config, Mode};
use crate::tools::catalog::CATALOG;
use crate::tools::Dispatcher;

#[derive(Parser)]
#[command(name = "raindrop-mcp-server")]
#[command(about = "Raindrop.io bookmarks as MCP tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP server (default)
    Serve {
        /// Transport: stdio or server (overrides MODE)
        #[arg(short, long)]
        mode: Option<String>,
        /// Port for server mode (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the tool catalog as JSON
    Tools,
    /// Invoke one tool against the Raindrop API and print the result
    Call {
        /// Tool name, e.g. get_user
        name: String,
        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
    /// Health check a server-mode instance
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    run_commands(cli.command.unwrap_or(Commands::Serve { mode: None, port: None })).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve { mode, port } => {
            let cfg = match load_config(mode.as_deref(), port) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("ERROR: {e}");
                    return ExitCode::FAILURE;
                }
            };
            match crate::infra::boot::run_server(cfg).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Fatal error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Tools => {
            println!("{}", tools_json());
            ExitCode::SUCCESS
        }
        Commands::Call { name, args } => match call_once(&name, &args).await {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(text) => {
                eprintln!("{text}");
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate: _ } => match Config::from_env() {
            Ok(cfg) => {
                println!("✅ Configuration is valid");
                println!("  Mode: {}", cfg.mode);
                println!("  Port: {}", cfg.port);
                println!("  API base: {}", cfg.raindrop.base_url);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn load_config(mode: Option<&str>, port: Option<u16>) -> Result<Config, Box<dyn std::error::Error>> {
    let mut cfg = Config::from_env()?;
    if let Some(m) = mode {
        cfg.mode = m.parse::<Mode>()?;
    }
    if let Some(p) = port {
        cfg.port = p;
    }
    Ok(cfg)
}

fn tools_json() -> String {
    let tools: Vec<serde_json::Value> = CATALOG
        .iter()
        .map(|op| {
            serde_json::json!({
                "name": op.name(),
                "description": op.description(),
                "inputSchema": op.input_schema(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&tools).unwrap_or_default()
}

/// Ok carries the success text, Err the error text (config, argument, or tool failure).
async fn call_once(name: &str, raw_args: &str) -> Result<String, String> {
    let cfg = Config::from_env().map_err(|e| format!("ERROR: {e}"))?;
    let args: serde_json::Value =
        serde_json::from_str(raw_args).map_err(|e| format!("ERROR: --args is not valid JSON: {e}"))?;
    let args = args
        .as_object()
        .ok_or_else(|| "ERROR: --args must be a JSON object".to_string())?;

    let dispatcher = Dispatcher::new(Arc::new(RaindropRemote::from_config(&cfg.raindrop)));
    let result = dispatcher.call(name, Some(args)).await;
    let text = text_of(&result).unwrap_or_default();
    if result.is_error == Some(true) {
        Err(text)
    } else {
        Ok(text)
    }
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url.trim_end_matches('/')))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        for k in ["RAINDROP_API_TOKEN", "RAINDROP_API_BASE", "RAINDROP_CONFIG", "MODE", "PORT"] {
            env::remove_var(k);
        }
    }

    #[test]
    fn parses_call_subcommand() {
        let cli = Cli::try_parse_from(["raindrop-mcp-server", "call", "get_raindrop", "--args", r#"{"id":1}"#]).unwrap();
        match cli.command {
            Some(Commands::Call { name, args }) => {
                assert_eq!(name, "get_raindrop");
                assert_eq!(args, r#"{"id":1}"#);
            }
            _ => panic!("expected call subcommand"),
        }
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["raindrop-mcp-server"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn tools_json_lists_whole_catalog() {
        let v: serde_json::Value = serde_json::from_str(&tools_json()).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 16);
        assert_eq!(v[0]["name"], "get_user");
        assert!(v[0]["inputSchema"].is_object());
    }

    #[test]
    #[serial]
    fn cli_flags_override_env() {
        clear_env();
        env::set_var("RAINDROP_API_TOKEN", "t");
        env::set_var("MODE", "stdio");
        let cfg = load_config(Some("server"), Some(9999)).unwrap();
        assert_eq!(cfg.mode, Mode::Server);
        assert_eq!(cfg.port, 9999);
        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn serve_without_token_fails() {
        clear_env();
        let code = run_commands(Commands::Serve { mode: None, port: None }).await;
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    #[serial]
    async fn run_commands_config_success_and_failure() {
        clear_env();
        env::set_var("RAINDROP_API_TOKEN", "t");
        assert_eq!(run_commands(Commands::Config { validate: true }).await, ExitCode::SUCCESS);
        env::set_var("MODE", "nope");
        assert_eq!(run_commands(Commands::Config { validate: true }).await, ExitCode::FAILURE);
        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn call_once_hits_configured_api() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET)
                .path("/raindrops/0")
                .query_param("search", "foo")
                .header("authorization", "Bearer t");
            then.status(200).json_body(serde_json::json!({"items": []}));
        });
        clear_env();
        env::set_var("RAINDROP_API_TOKEN", "t");
        env::set_var("RAINDROP_API_BASE", server.base_url());

        let out = call_once("search_raindrops", r#"{"search":"foo"}"#).await.unwrap();
        m.assert();
        assert!(out.contains("\"items\": []"));

        let err = call_once("nope", "{}").await.unwrap_err();
        assert!(err.contains("Unknown tool: nope"));

        let err = call_once("get_user", "[1]").await.unwrap_err();
        assert!(err.contains("JSON object"));
        clear_env();
    }

    #[tokio::test]
    async fn health_check_ok_and_error_paths() {
        let server = MockServer::start();
        server.mock(|when, then| { when.method(GET).path("/healthz"); then.status(200).body("ok"); });
        assert!(health_check(&server.base_url()).await.is_ok());

        let bad = MockServer::start();
        bad.mock(|when, then| { when.method(GET).path("/healthz"); then.status(500); });
        assert!(health_check(&bad.base_url()).await.is_err());
    }

    #[tokio::test]
    async fn run_commands_health_failure() {
        let code = run_commands(Commands::Health { url: "http://localhost:9".into() }).await;
        assert_eq!(code, ExitCode::FAILURE);
    }
}
