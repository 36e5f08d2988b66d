//! Transport layer for the MCP server.
//!
//! The server speaks JSON-RPC over HTTP POST. The transport owns the
//! listener and the HTTP surface; message semantics live in `core::rpc`.

mod config;
mod error;
pub mod http;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use http::HttpTransport;
