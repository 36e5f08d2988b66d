//! MCP Server handle.
//!
//! `McpServer` owns the configuration and the tool invoker and implements
//! the three supported MCP methods. It is cheap to clone and holds no
//! per-request state, so every HTTP request works on the same shared,
//! read-only registry.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value, json};
use tracing::{info, warn};

use super::config::Config;
use super::error::{Error, Result};
use super::rpc::{RpcError, display_name};
use crate::domains::tools::{Arguments, ToolInvoker, ToolRegistry};

/// The main MCP server handle.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool invoker over the shared registry.
    invoker: ToolInvoker,
}

impl McpServer {
    /// Create a new MCP server with the built-in tools.
    pub fn new(config: Config) -> Result<Self> {
        let registry = ToolRegistry::with_builtin_tools(&config)?;
        Self::with_registry(config, registry)
    }

    /// Create a server over an explicit registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Result<Self> {
        if config.tools.call_timeout_secs == 0 {
            return Err(Error::config("tool call timeout must be at least one second"));
        }
        if !config.transport.rpc_path.starts_with('/') {
            return Err(Error::config(format!(
                "RPC path must start with '/': {}",
                config.transport.rpc_path
            )));
        }

        let timeout = Duration::from_secs(config.tools.call_timeout_secs);
        Ok(Self {
            invoker: ToolInvoker::new(Arc::new(registry), timeout),
            config: Arc::new(config),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool registry.
    pub fn tools(&self) -> &ToolRegistry {
        self.invoker.registry()
    }

    /// Build the `initialize` result.
    ///
    /// The client's requested protocol version is echoed back when present;
    /// otherwise the configured default is advertised.
    pub fn initialize(&self, params: &Map<String, Value>) -> Value {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(self.config.server.protocol_version.as_str());
        info!("Negotiated protocol version {}", protocol_version);

        let tools: Vec<Value> = self
            .tools()
            .iter()
            .map(|t| json!({ "name": t.name(), "description": t.summary() }))
            .collect();

        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": self.name(),
                "version": self.version(),
                "description": self.config.server.description,
                "tools": tools
            }
        })
    }

    /// List all available tools in registration order.
    pub fn list_tools(&self) -> Vec<Value> {
        self.tools()
            .get_all_tools()
            .into_iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool from `tools/call` params.
    ///
    /// Only an unknown tool is reported as a protocol error; tool failures
    /// come back as content.
    pub async fn call_tool(&self, params: &Map<String, Value>) -> std::result::Result<Value, RpcError> {
        let name = match params.get("name") {
            Some(Value::String(name)) => name.as_str(),
            other => {
                let shown = display_name(other);
                warn!("tools/call without a usable tool name: {}", shown);
                return Err(RpcError::unknown_tool(&shown));
            }
        };

        let arguments: Arguments = params
            .get("arguments")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        self.invoker
            .invoke(name, arguments)
            .await
            .ok_or_else(|| RpcError::unknown_tool(name))
    }
}
