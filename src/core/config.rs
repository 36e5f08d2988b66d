//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::transport::HttpConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{info, warn};

/// Protocol version advertised when the client does not request one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2025-06-18";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP transport configuration.
    pub transport: HttpConfig,

    /// Tool invocation limits.
    pub tools: ToolsConfig,

    /// Outbound weather API configuration.
    pub weather: WeatherConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,

    /// Free-form description reported in `serverInfo`.
    pub description: String,

    /// Protocol version used when `initialize` carries none.
    pub protocol_version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Limits applied by the tool invoker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Upper bound on a single tool call, in seconds.
    pub call_timeout_secs: u64,
}

/// Configuration for the Open-Meteo forecast endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint URL.
    pub api_url: String,

    pub latitude: f64,

    pub longitude: f64,

    /// IANA timezone requested from the API.
    pub timezone: String,

    /// Timeout for the outbound request, in seconds.
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            call_timeout_secs: 30,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            latitude: 35.6762,
            longitude: 139.6503,
            timezone: "Asia/Tokyo".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "Weather and Hobby Information Server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "A server providing tools for temperature conversion, \
                              Tokyo weather data, and personal hobby information"
                    .to_string(),
                protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: HttpConfig::default(),
            tools: ToolsConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = HttpConfig::from_env();

        if let Some(secs) = parse_env("MCP_TOOL_TIMEOUT_SECS") {
            config.tools.call_timeout_secs = secs;
        }

        if let Ok(url) = std::env::var("MCP_WEATHER_API_URL") {
            info!("Weather API endpoint overridden: {}", url);
            config.weather.api_url = url;
        }

        if let Some(secs) = parse_env("MCP_WEATHER_TIMEOUT_SECS") {
            config.weather.timeout_secs = secs;
        }

        config
    }
}

/// Read and parse an environment variable, keeping the default on bad input.
pub(crate) fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable value for {}: {:?}", key, raw);
            None
        }
    }
}
