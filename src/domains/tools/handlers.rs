//! Tool handler contract.
//!
//! Every registered tool implements [`ToolHandler`]: it exposes its name,
//! description and input schema, and turns an argument object into a
//! [`ToolOutcome`]. Handlers never produce protocol errors; anything that
//! goes wrong inside a tool is returned as a [`ToolError`] and reported to
//! the client as content.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ToolError;

/// Argument object passed to a tool.
pub type Arguments = serde_json::Map<String, Value>;

/// Result of a single tool execution.
pub type ToolOutcome = Result<ToolOutput, ToolError>;

/// Successful output from a tool execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Human-readable summary sent as a text content block.
    pub text: String,
}

impl ToolOutput {
    /// Create a text output.
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Trait implemented by every tool exposed over `tools/call`.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Unique tool name.
    fn name(&self) -> &'static str;

    /// Full description shown by `tools/list`.
    fn description(&self) -> &'static str;

    /// Short description used in the `initialize` tool summary.
    fn summary(&self) -> &'static str {
        self.description()
    }

    /// JSON schema of the accepted arguments.
    fn input_schema(&self) -> Arc<JsonObject>;

    /// Tool metadata model.
    fn to_tool(&self) -> Tool {
        Tool {
            name: self.name().into(),
            description: Some(self.description().into()),
            input_schema: self.input_schema(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Execute the tool with the given arguments.
    async fn call(&self, arguments: Arguments) -> ToolOutcome;
}

/// Deserialize a tool's argument object into its parameter struct.
pub fn parse_arguments<P: DeserializeOwned>(arguments: Arguments) -> Result<P, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}
