//! Method router.
//!
//! One decision per message, evaluated in a fixed order:
//!
//! 1. no `id` → notification, nothing is sent back (whatever the method)
//! 2. `initialize`
//! 3. `tools/list`
//! 4. `tools/call`
//! 5. anything else → `-32601`

use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::envelope::{Outcome, RequestEnvelope, ResponseEnvelope, RpcError};
use crate::core::McpServer;

/// Standard MCP methods handled by the server.
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const LIST_TOOLS: &str = "tools/list";
    pub const CALL_TOOL: &str = "tools/call";
}

/// Route a decoded message to its handler.
#[instrument(skip_all, fields(method = %request.method_label()))]
pub async fn dispatch(server: &McpServer, request: RequestEnvelope) -> Outcome {
    let method = request.method_label();
    let RequestEnvelope {
        jsonrpc,
        method: raw_method,
        id,
        params,
    } = request;

    let Some(id) = id else {
        info!("Notification received: {}, ignoring", method);
        return Outcome::Notification;
    };

    let result = match raw_method.as_ref().and_then(Value::as_str) {
        Some(methods::INITIALIZE) => {
            info!("Processing initialize request");
            Ok(server.initialize(&params))
        }
        Some(methods::LIST_TOOLS) => {
            info!("Processing tools/list request");
            Ok(json!({ "tools": server.list_tools() }))
        }
        Some(methods::CALL_TOOL) => {
            info!("Processing tools/call request");
            server.call_tool(&params).await
        }
        _ => {
            warn!("Unknown method: {}", method);
            Err(RpcError::method_not_found(&method))
        }
    };

    Outcome::Reply(ResponseEnvelope::from_result(jsonrpc, id, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::rpc::codes;

    fn server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    async fn run(server: &McpServer, body: Value) -> Outcome {
        let request = RequestEnvelope::decode(body.to_string().as_bytes()).unwrap();
        dispatch(server, request).await
    }

    /// Dispatch and return the serialized reply.
    async fn reply(server: &McpServer, body: Value) -> Value {
        match run(server, body).await {
            Outcome::Reply(response) => serde_json::to_value(response).unwrap(),
            Outcome::Notification => panic!("expected a reply"),
        }
    }

    #[tokio::test]
    async fn test_notifications_are_never_answered() {
        let server = server();
        for method in [
            json!("notifications/initialized"),
            json!("initialize"),
            json!("tools/call"),
            json!("no/such/method"),
            json!(42),
            Value::Null,
        ] {
            let outcome = run(&server, json!({"jsonrpc": "2.0", "method": method})).await;
            assert!(matches!(outcome, Outcome::Notification), "method {}", method);
        }
    }

    #[tokio::test]
    async fn test_id_is_echoed() {
        let server = server();
        for id in [json!(1), json!("req-1"), json!(0), json!(-7), json!(2.5)] {
            let response = reply(
                &server,
                json!({"jsonrpc": "2.0", "id": id, "method": "tools/list"}),
            )
            .await;
            assert_eq!(response["id"], id);
        }
    }

    #[tokio::test]
    async fn test_initialize_protocol_version() {
        let server = server();
        let response = reply(
            &server,
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize",
                   "params": {"protocolVersion": "2025-03-26"}}),
        )
        .await;
        assert_eq!(response["result"]["protocolVersion"], json!("2025-03-26"));

        let response = reply(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "initialize"})).await;
        assert_eq!(response["result"]["protocolVersion"], json!("2025-06-18"));
        assert!(response.get("error").is_none());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = reply(
            &server(),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/list"}),
        )
        .await;
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 3);
        for tool in tools {
            assert!(!tool["name"].as_str().unwrap().is_empty());
            assert!(!tool["description"].as_str().unwrap().is_empty());
            assert!(tool["inputSchema"].is_object());
        }
    }

    #[tokio::test]
    async fn test_tools_call_c_to_f() {
        let response = reply(
            &server(),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "c_to_f", "arguments": {"celsius": 0}}}),
        )
        .await;
        assert_eq!(
            response["result"]["content"],
            json!([{"type": "text", "text": "0°C = 32.0°F"}])
        );
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let response = reply(
            &server(),
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
                   "params": {"name": "launch_rocket"}}),
        )
        .await;
        assert_eq!(response["error"]["code"], json!(codes::UNKNOWN_TOOL));
        assert_eq!(response["error"]["message"], json!("Unknown tool: launch_rocket"));
        assert!(response.get("result").is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = reply(
            &server(),
            json!({"jsonrpc": "2.0", "id": "x", "method": "resources/list"}),
        )
        .await;
        assert_eq!(response["error"]["code"], json!(codes::METHOD_NOT_FOUND));
        assert_eq!(
            response["error"]["message"],
            json!("Method not found: resources/list")
        );
        assert_eq!(response["id"], json!("x"));
    }

    #[tokio::test]
    async fn test_missing_method_with_id() {
        let response = reply(&server(), json!({"jsonrpc": "2.0", "id": 9})).await;
        assert_eq!(response["error"]["message"], json!("Method not found: null"));
    }

    #[tokio::test]
    async fn test_non_string_method_is_shown_as_json() {
        let response = reply(&server(), json!({"jsonrpc": "2.0", "id": 1, "method": 42})).await;
        assert_eq!(response["error"]["code"], json!(codes::METHOD_NOT_FOUND));
        assert_eq!(response["error"]["message"], json!("Method not found: 42"));

        let response = reply(&server(), json!({"jsonrpc": "2.0", "id": 2, "method": null})).await;
        assert_eq!(response["error"]["message"], json!("Method not found: null"));
    }

    #[tokio::test]
    async fn test_jsonrpc_tag_is_echoed() {
        let response = reply(&server(), json!({"jsonrpc": "1.0", "id": 1, "method": "tools/list"})).await;
        assert_eq!(response["jsonrpc"], json!("1.0"));

        let response = reply(&server(), json!({"id": 1, "method": "tools/list"})).await;
        assert_eq!(response["jsonrpc"], json!("2.0"));
    }

    #[tokio::test]
    async fn test_weather_failure_is_soft() {
        let mut config = Config::default();
        config.weather.api_url = "http://127.0.0.1:9/v1/forecast".to_string();
        config.weather.timeout_secs = 2;
        let server = McpServer::new(config).unwrap();

        let response = reply(
            &server,
            json!({"jsonrpc": "2.0", "id": 10, "method": "tools/call",
                   "params": {"name": "get_tokyo_weather"}}),
        )
        .await;
        assert!(response.get("error").is_none());
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(
            text.contains("Tokyo weather unavailable") || text.contains("timed out"),
            "got {}",
            text
        );
    }
}
