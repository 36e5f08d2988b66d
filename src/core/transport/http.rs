//! HTTP transport implementation.
//!
//! HTTP server with JSON-RPC over POST requests. Every well-formed message
//! is answered with HTTP 200: protocol errors travel inside the JSON-RPC
//! envelope and notifications get an empty body. Only bodies that cannot
//! carry an envelope at all are rejected with 400.
//!
//! `OPTIONS` on the RPC path is an empty 200 whether it is answered by the
//! CORS layer or by `handle_options`.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

use super::{HttpConfig, TransportError, TransportResult};
use crate::core::McpServer;
use crate::core::rpc::{self, EnvelopeError, Outcome, RequestEnvelope};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Build the axum router for this transport.
    pub fn router(&self, server: McpServer) -> Router {
        let state = AppState { server };

        let mut app = Router::new()
            .route(
                &self.config.rpc_path,
                post(handle_rpc).get(handle_status).options(handle_options),
            )
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.address();
        info!("Starting transport: {}", self.config.description());

        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::serve(&addr, e))?;

        Ok(())
    }
}

impl IntoResponse for EnvelopeError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.server.config();
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": config.transport.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "documentation": format!("Send POST requests to {} with JSON-RPC messages", config.transport.rpc_path)
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// GET on the RPC path.
async fn handle_status() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "MCP server OK. Use POST for JSON-RPC."
    }))
}

/// OPTIONS on the RPC path when CORS is disabled.
async fn handle_options() -> StatusCode {
    StatusCode::OK
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(state): State<AppState>, body: Bytes) -> Response {
    debug!("Raw body: {}", String::from_utf8_lossy(&body));

    let request = match RequestEnvelope::decode(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejecting request: {}", e);
            return e.into_response();
        }
    };
    tracing::Span::current().record("method", request.method_label().as_str());

    match rpc::dispatch(&state.server, request).await {
        Outcome::Notification => StatusCode::OK.into_response(),
        Outcome::Reply(response) => (StatusCode::OK, Json(response)).into_response(),
    }
}
