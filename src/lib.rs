//! Weather and Hobby MCP Server Library
//!
//! This crate provides a small Model Context Protocol (MCP) server that speaks
//! JSON-RPC 2.0 over HTTP and exposes three tools: a Celsius to Fahrenheit
//! converter, a live Tokyo weather lookup and a hobby recommendation table.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the JSON-RPC envelope codec and
//!   dispatcher, the server handle and the HTTP transport
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool registry, invoker and the built-in tool definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use weather_hobby_mcp_server::core::{Config, HttpTransport, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     HttpTransport::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
