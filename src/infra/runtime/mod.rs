pub mod http_client;
pub mod mcp_transport;
