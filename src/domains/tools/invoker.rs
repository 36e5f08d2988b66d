//! Tool Invoker - resolves and runs tools for `tools/call`.
//!
//! The only hard failure is an unknown tool name. Everything a tool reports
//! (bad arguments, upstream failures, timeouts) is rendered as text content
//! in an otherwise successful result.

use std::sync::Arc;
use std::time::Duration;

use rmcp::model::Content;
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::error::ToolError;
use super::handlers::{Arguments, ToolOutcome};
use super::registry::ToolRegistry;

/// Runs registered tools with a bounded execution time.
#[derive(Clone)]
pub struct ToolInvoker {
    registry: Arc<ToolRegistry>,
    timeout: Duration,
}

impl ToolInvoker {
    pub fn new(registry: Arc<ToolRegistry>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Invoke a tool and shape its outcome as a `tools/call` result.
    ///
    /// Returns `None` when no tool has this name.
    #[instrument(skip(self, arguments))]
    pub async fn invoke(&self, name: &str, arguments: Arguments) -> Option<Value> {
        let Some(tool) = self.registry.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return None;
        };

        info!("Calling tool: {}", name);
        let outcome = match tokio::time::timeout(self.timeout, tool.call(arguments)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ToolError::Timeout),
        };

        Some(render(name, outcome))
    }
}

/// Wrap an outcome as `{ "content": [ { "type": "text", "text": ... } ] }`.
fn render(name: &str, outcome: ToolOutcome) -> Value {
    let text = match outcome {
        Ok(output) => output.text,
        Err(e) => {
            warn!("Tool {} reported a failure: {}", name, e);
            e.to_string()
        }
    };

    json!({ "content": [Content::text(text)] })
}
