//! Tokyo weather tool.
//!
//! Queries the Open-Meteo forecast API for current conditions at a fixed
//! location. Any field missing from the response is reported as `N/A`;
//! transport, status and decoding failures are returned as soft tool errors.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use rmcp::{handler::server::tool::cached_schema_for_type, model::JsonObject};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{error, info, instrument};

use super::common::format_optional;
use crate::core::config::WeatherConfig;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{
    Arguments, ToolHandler, ToolOutcome, ToolOutput, parse_arguments,
};

/// Fields requested in the `current` block.
const CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m";

// ============================================================================
// Tool Parameters
// ============================================================================

/// The weather tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TokyoWeatherParams {}

// ============================================================================
// Upstream Response
// ============================================================================

/// Subset of the Open-Meteo forecast response.
///
/// Every field is read on its own: a field that is missing or has an
/// unexpected type becomes `None` without discarding the others.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub current: Option<CurrentConditions>,
    #[serde(default, deserialize_with = "lenient")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentConditions {
    #[serde(default, deserialize_with = "lenient")]
    pub temperature_2m: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub wind_speed_10m: Option<f64>,
    #[serde(default, deserialize_with = "lenient_code")]
    pub weather_code: Option<i64>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// WMO codes are integers, but `3.0` is accepted as `3`.
fn lenient_code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        v.as_i64().or_else(|| {
            v.as_f64()
                .filter(|code| code.fract() == 0.0 && code.abs() <= i64::MAX as f64)
                .map(|code| code as i64)
        })
    }))
}

/// Current conditions as reported to the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherReport {
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    /// km/h.
    pub wind_speed: Option<f64>,
    /// WMO weather interpretation code.
    pub weather_code: Option<i64>,
    pub timezone: Option<String>,
}

impl From<ForecastResponse> for WeatherReport {
    fn from(response: ForecastResponse) -> Self {
        let current = response.current.unwrap_or_default();
        Self {
            temperature: current.temperature_2m,
            wind_speed: current.wind_speed_10m,
            weather_code: current.weather_code,
            timezone: response.timezone,
        }
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tokyo Weather: {}°C, Wind: {} km/h",
            format_optional(self.temperature),
            format_optional(self.wind_speed)
        )
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Tokyo weather tool backed by Open-Meteo.
#[derive(Debug, Clone)]
pub struct TokyoWeatherTool {
    config: WeatherConfig,
}

impl TokyoWeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_tokyo_weather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Fetch real-time weather data for Tokyo, Japan. \
        Returns current temperature in Celsius, wind speed in km/h, weather code, and timezone \
        information. This tool requires no parameters and uses the Open-Meteo free weather API.";

    /// Short description for the server summary.
    pub const SUMMARY: &'static str = "Fetch real-time weather data for Tokyo, Japan";

    pub fn new(config: WeatherConfig) -> Self {
        Self { config }
    }

    /// Fetch current conditions.
    ///
    /// The HTTP client is scoped to this call and dropped on every path.
    #[instrument(skip_all, fields(url = %self.config.api_url))]
    pub async fn fetch(&self) -> Result<WeatherReport, ToolError> {
        info!("Fetching current Tokyo weather");

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
            .map_err(|e| unavailable(format!("failed to build HTTP client: {}", e)))?;

        let response = client
            .get(&self.config.api_url)
            .query(&[
                ("latitude", self.config.latitude.to_string()),
                ("longitude", self.config.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", self.config.timezone.clone()),
            ])
            .send()
            .await
            .map_err(request_failed)?
            .error_for_status()
            .map_err(request_failed)?;

        let forecast: ForecastResponse = response.json().await.map_err(request_failed)?;

        Ok(WeatherReport::from(forecast))
    }
}

fn unavailable(reason: impl fmt::Display) -> ToolError {
    ToolError::execution_failed(format!("Tokyo weather unavailable: {}", reason))
}

fn request_failed(e: reqwest::Error) -> ToolError {
    error!("Weather request failed: {:?}", e);
    if e.is_timeout() {
        ToolError::Timeout
    } else {
        unavailable(e)
    }
}

#[async_trait::async_trait]
impl ToolHandler for TokyoWeatherTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn summary(&self) -> &'static str {
        Self::SUMMARY
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        cached_schema_for_type::<TokyoWeatherParams>()
    }

    async fn call(&self, arguments: Arguments) -> ToolOutcome {
        let _params: TokyoWeatherParams = parse_arguments(arguments)?;
        let report = self.fetch().await?;
        Ok(ToolOutput::text(report.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
    use std::collections::HashMap;

    /// Serve `router` on an ephemeral port and return its forecast URL.
    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1/forecast", addr)
    }

    fn tool_for(api_url: String) -> TokyoWeatherTool {
        TokyoWeatherTool::new(WeatherConfig {
            api_url,
            timeout_secs: 2,
            ..WeatherConfig::default()
        })
    }

    #[test]
    fn test_parse_full_response() {
        let json = r#"{
            "latitude": 35.7,
            "longitude": 139.625,
            "timezone": "Asia/Tokyo",
            "current": {"time": "2025-01-01T12:00", "temperature_2m": 8.4,
                        "weather_code": 3, "wind_speed_10m": 12.0}
        }"#;
        let response: ForecastResponse = serde_json::from_str(json).unwrap();
        let report = WeatherReport::from(response);
        assert_eq!(report.temperature, Some(8.4));
        assert_eq!(report.weather_code, Some(3));
        assert_eq!(report.timezone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(report.to_string(), "Tokyo Weather: 8.4°C, Wind: 12.0 km/h");
    }

    #[test]
    fn test_parse_partial_response() {
        let response: ForecastResponse =
            serde_json::from_str(r#"{"current": {"temperature_2m": null}}"#).unwrap();
        let report = WeatherReport::from(response);
        assert_eq!(report, WeatherReport::default());
        assert_eq!(report.to_string(), "Tokyo Weather: N/A°C, Wind: N/A km/h");
    }

    #[test]
    fn test_parse_mistyped_fields() {
        let json = r#"{
            "timezone": 9,
            "current": {"temperature_2m": "warm", "wind_speed_10m": 7, "weather_code": 3.0}
        }"#;
        let report = WeatherReport::from(serde_json::from_str::<ForecastResponse>(json).unwrap());
        assert_eq!(report.temperature, None);
        assert_eq!(report.wind_speed, Some(7.0));
        assert_eq!(report.weather_code, Some(3));
        assert_eq!(report.timezone, None);
        assert_eq!(report.to_string(), "Tokyo Weather: N/A°C, Wind: 7.0 km/h");

        let report = WeatherReport::from(
            serde_json::from_str::<ForecastResponse>(r#"{"current": [1, 2]}"#).unwrap(),
        );
        assert_eq!(report, WeatherReport::default());
    }

    #[tokio::test]
    async fn test_fetch_keeps_fields_around_a_mistyped_one() {
        let router = Router::new().route(
            "/v1/forecast",
            get(|| async {
                Json(serde_json::json!({
                    "current": {"temperature_2m": 21.5, "wind_speed_10m": 7.2, "weather_code": 3.5}
                }))
            }),
        );
        let tool = tool_for(spawn_upstream(router).await);

        let output = tool.call(Arguments::new()).await.unwrap();
        assert_eq!(output.text, "Tokyo Weather: 21.5°C, Wind: 7.2 km/h");
    }

    #[tokio::test]
    async fn test_fetch_sends_location_query() {
        let router = Router::new().route(
            "/v1/forecast",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                assert_eq!(query.get("latitude").map(String::as_str), Some("35.6762"));
                assert_eq!(query.get("longitude").map(String::as_str), Some("139.6503"));
                assert_eq!(query.get("current").map(String::as_str), Some(CURRENT_FIELDS));
                assert_eq!(query.get("timezone").map(String::as_str), Some("Asia/Tokyo"));
                Json(serde_json::json!({
                    "timezone": "Asia/Tokyo",
                    "current": {"temperature_2m": 21.5, "wind_speed_10m": 7.2, "weather_code": 1}
                }))
            }),
        );
        let tool = tool_for(spawn_upstream(router).await);

        let output = tool.call(Arguments::new()).await.unwrap();
        assert_eq!(output.text, "Tokyo Weather: 21.5°C, Wind: 7.2 km/h");
    }

    #[tokio::test]
    async fn test_fetch_upstream_error_status() {
        let router = Router::new().route(
            "/v1/forecast",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let tool = tool_for(spawn_upstream(router).await);

        let err = tool.call(Arguments::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
        assert!(err.to_string().contains("Tokyo weather unavailable"));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Port 9 (discard) is not expected to be listening locally.
        let tool = tool_for("http://127.0.0.1:9/v1/forecast".to_string());

        let err = tool.call(Arguments::new()).await.unwrap_err();
        assert!(matches!(
            err,
            ToolError::ExecutionFailed(_) | ToolError::Timeout
        ));
    }

    #[tokio::test]
    async fn test_fetch_invalid_body() {
        let router = Router::new().route("/v1/forecast", get(|| async { "not json" }));
        let tool = tool_for(spawn_upstream(router).await);

        let err = tool.call(Arguments::new()).await.unwrap_err();
        assert!(err.to_string().contains("Tokyo weather unavailable"));
    }

    // Integration test (requires network, run with: cargo test -- --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_fetch_live() {
        let tool = TokyoWeatherTool::new(WeatherConfig::default());
        let report = tool.fetch().await.unwrap();
        assert_eq!(report.timezone.as_deref(), Some("Asia/Tokyo"));
    }
}
