//! MCP server exposing the Raindrop.io REST API as tools.

pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
