//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur during tool operations.
///
/// Apart from [`ToolError::Duplicate`], these are soft failures: the invoker
/// reports them to the client as tool content.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A tool with the same name is already registered.
    #[error("Tool already registered: {0}")]
    Duplicate(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The tool execution failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// The tool timed out during execution.
    #[error("Tool execution timed out")]
    Timeout,
}

impl ToolError {
    /// Create a new "duplicate" error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::Duplicate(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }
}
