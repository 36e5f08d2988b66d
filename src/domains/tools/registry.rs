//! Tool Registry - central registration and lookup for all tools.
//!
//! The registry is built once at startup and shared read-only afterwards.
//! Tools keep their insertion order, which is the order `tools/list`
//! reports them in.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;
use tracing::debug;

use crate::core::config::Config;

use super::definitions::{CToFTool, HobbyTool, TokyoWeatherTool};
use super::error::ToolError;
use super::handlers::ToolHandler;

/// Tool registry - manages all available tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry with every tool this server ships.
    pub fn with_builtin_tools(config: &Config) -> Result<Self, ToolError> {
        let mut registry = Self::new();
        registry.register(CToFTool)?;
        registry.register(TokyoWeatherTool::new(config.weather.clone()))?;
        registry.register(HobbyTool)?;
        Ok(registry)
    }

    /// Register a tool. Names must be unique.
    pub fn register<T: ToolHandler + 'static>(&mut self, tool: T) -> Result<(), ToolError> {
        let name = tool.name();
        if self.index.contains_key(name) {
            return Err(ToolError::duplicate(name));
        }
        debug!("Registering tool: {}", name);
        self.index.insert(name, self.tools.len());
        self.tools.push(Arc::new(tool));
        Ok(())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Iterate over tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ToolHandler>> {
        self.tools.iter()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.to_tool()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
