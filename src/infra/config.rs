use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::clients::raindrop::DEFAULT_BASE_URL;

pub const TOKEN_VAR: &str = "RAINDROP_API_TOKEN";
pub const BASE_URL_VAR: &str = "RAINDROP_API_BASE";
pub const CONFIG_FILE_VAR: &str = "RAINDROP_CONFIG";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("RAINDROP_API_TOKEN environment variable is required")]
    MissingToken,
    #[error("Invalid MODE: {0}. Must be 'server' or 'stdio'")]
    InvalidMode(String),
    #[error("PORT cannot be 0")]
    ZeroPort,
    #[error("cannot read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("invalid config file {path}: {source}")]
    Parse { path: String, source: toml::de::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// MCP over stdin/stdout.
    #[default]
    Stdio,
    /// Streamable HTTP at `/mcp`.
    Server,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Mode::Stdio),
            "server" => Ok(Mode::Server),
            _ => Err(ConfigError::InvalidMode(s.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Stdio => "stdio",
            Mode::Server => "server",
        })
    }
}

/// Connection settings for the Raindrop API.
#[derive(Clone)]
pub struct RaindropConfig {
    pub token: String,
    pub base_url: String,
}

impl fmt::Debug for RaindropConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RaindropConfig")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub port: u16,
    pub raindrop: RaindropConfig,
}

/// Optional TOML file; every key may be overridden from the environment.
///
/// ```toml
/// mode = "server"
/// port = 9090
///
/// [raindrop]
/// token = "..."
/// base_url = "https://api.raindrop.io/rest/v1"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub mode: Option<String>,
    pub port: Option<u16>,
    #[serde(default)]
    pub raindrop: FileRaindrop,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileRaindrop {
    pub token: Option<String>,
    pub base_url: Option<String>,
}

impl FileConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: shown.clone(), source })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path: shown, source })
    }
}

impl Config {
    /// Load from the process environment, layering `RAINDROP_CONFIG` underneath when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let file = match non_empty(env(CONFIG_FILE_VAR)) {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, env)
    }

    pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode = match non_empty(env("MODE")).or(file.mode) {
            Some(m) => m.parse()?,
            None => Mode::default(),
        };
        let port = non_empty(env("PORT"))
            .and_then(|s| s.parse::<u16>().ok())
            .or(file.port)
            .unwrap_or(DEFAULT_PORT);
        if mode == Mode::Server && port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        let token = non_empty(env(TOKEN_VAR))
            .or(non_empty(file.raindrop.token))
            .ok_or(ConfigError::MissingToken)?;
        let base_url = non_empty(env(BASE_URL_VAR))
            .or(non_empty(file.raindrop.base_url))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        Ok(Self { mode, port, raindrop: RaindropConfig { token, base_url } })
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}
