//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that MCP clients call by name.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - The `ToolHandler` contract every tool implements
//! - `registry.rs` - Central tool registry, built once at startup
//! - `invoker.rs` - Name resolution, timeouts and result shaping
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a params struct and a
//!    `ToolHandler` implementation
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::with_builtin_tools()`

pub mod definitions;
mod error;
mod handlers;
mod invoker;
mod registry;

pub use error::ToolError;
pub use handlers::*;
pub use invoker::ToolInvoker;
pub use registry::ToolRegistry;
