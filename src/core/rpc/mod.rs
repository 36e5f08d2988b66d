//! JSON-RPC protocol handling.
//!
//! - `envelope`: request decoding and response encoding
//! - `dispatcher`: per-message routing to the server's method handlers

pub mod dispatcher;
pub mod envelope;

pub use dispatcher::{dispatch, methods};
pub use envelope::{
    EnvelopeError, JSONRPC_VERSION, Outcome, RequestEnvelope, ResponseEnvelope, RpcError, codes,
    display_name,
};
