//! Transport configuration types.

use serde::{Deserialize, Serialize};

use crate::core::config::parse_env;

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_path() -> String {
    "/mcp".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl HttpConfig {
    /// Create an HTTP config bound to the given host and port.
    pub fn new(port: u16, host: impl Into<String>) -> Self {
        Self {
            port,
            host: host.into(),
            ..Default::default()
        }
    }

    /// Load HTTP config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = parse_env("MCP_HTTP_PORT").unwrap_or(defaults.port);
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or(defaults.host);
        let rpc_path = std::env::var("MCP_HTTP_PATH").unwrap_or(defaults.rpc_path);
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Self {
            port,
            host,
            rpc_path,
            enable_cors,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        format!("HTTP on {}{}", self.address(), self.rpc_path)
    }
}
