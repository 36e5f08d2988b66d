//! JSON-RPC envelope codec.
//!
//! Decodes raw request bodies into [`RequestEnvelope`]s and builds the
//! [`ResponseEnvelope`]s sent back to clients. The request `id` is kept as
//! raw JSON so that it is echoed back exactly as the client wrote it.

use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

/// JSON-RPC version used when the client does not send one.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC error codes emitted by the server.
pub mod codes {
    /// The requested method does not exist.
    pub const METHOD_NOT_FOUND: i32 = -32601;

    /// `tools/call` named a tool that is not registered.
    pub const UNKNOWN_TOOL: i32 = -32000;
}

/// A body that cannot carry a JSON-RPC envelope at all.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Malformed request: body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Malformed request: body must be a JSON object")]
    NotAnObject,
}

/// A decoded JSON-RPC request or notification.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    /// Protocol tag, echoed back in the response.
    pub jsonrpc: String,

    /// Raw `method` value; `None` when absent.
    pub method: Option<Value>,

    /// Raw request id. `None` (absent or `null`) marks a notification.
    pub id: Option<Box<RawValue>>,

    /// Request parameters; empty when absent or not an object.
    pub params: Map<String, Value>,
}

impl RequestEnvelope {
    /// Decode a raw HTTP body.
    ///
    /// Only the top-level shape is enforced here. A missing or non-string
    /// `method` is kept as-is for the dispatcher to reject.
    pub fn decode(body: &[u8]) -> Result<Self, EnvelopeError> {
        let mut fields: HashMap<String, Box<RawValue>> =
            serde_json::from_slice(body).map_err(|e| match e.classify() {
                Category::Data => EnvelopeError::NotAnObject,
                _ => EnvelopeError::InvalidJson(e),
            })?;

        let jsonrpc = fields
            .remove("jsonrpc")
            .and_then(|raw| serde_json::from_str::<String>(raw.get()).ok())
            .unwrap_or_else(|| JSONRPC_VERSION.to_string());

        let method = fields
            .remove("method")
            .and_then(|raw| serde_json::from_str::<Value>(raw.get()).ok());

        let id = fields
            .remove("id")
            .filter(|raw| raw.get().trim() != "null");

        let params = fields
            .remove("params")
            .and_then(|raw| serde_json::from_str::<Map<String, Value>>(raw.get()).ok())
            .unwrap_or_default();

        Ok(Self {
            jsonrpc,
            method,
            id,
            params,
        })
    }

    /// Whether this message expects no response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Method name, when the client sent a string.
    pub fn method_name(&self) -> Option<&str> {
        self.method.as_ref().and_then(Value::as_str)
    }

    /// Method for logs and error messages.
    pub fn method_label(&self) -> String {
        display_name(self.method.as_ref())
    }
}

/// Render a client-supplied name for a message: strings as-is, any other
/// JSON value as its JSON text, and a missing value as `null`.
pub fn display_name(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message} (code {code})")]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// Create an error with the given code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Method not found error.
    pub fn method_not_found(method: &str) -> Self {
        Self::new(codes::METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    /// Unknown tool error.
    pub fn unknown_tool(name: &str) -> Self {
        Self::new(codes::UNKNOWN_TOOL, format!("Unknown tool: {}", name))
    }
}

/// JSON-RPC response. Holds exactly one of `result` or `error`.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    jsonrpc: String,
    id: Box<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

impl ResponseEnvelope {
    /// Create a success response.
    pub fn success(jsonrpc: impl Into<String>, id: Box<RawValue>, result: Value) -> Self {
        Self {
            jsonrpc: jsonrpc.into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(jsonrpc: impl Into<String>, id: Box<RawValue>, error: RpcError) -> Self {
        Self {
            jsonrpc: jsonrpc.into(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Create a response from a handler outcome.
    pub fn from_result(
        jsonrpc: impl Into<String>,
        id: Box<RawValue>,
        outcome: Result<Value, RpcError>,
    ) -> Self {
        match outcome {
            Ok(result) => Self::success(jsonrpc, id, result),
            Err(error) => Self::error(jsonrpc, id, error),
        }
    }

    pub fn id(&self) -> &RawValue {
        &self.id
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn rpc_error(&self) -> Option<&RpcError> {
        self.error.as_ref()
    }
}

/// What the dispatcher decided for one inbound message.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The message was a notification; nothing is sent back.
    Notification,

    /// A response to send to the client.
    Reply(ResponseEnvelope),
}
