//! Celsius to Fahrenheit conversion tool.

use std::fmt;
use std::sync::Arc;

use rmcp::{handler::server::tool::cached_schema_for_type, model::JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Number;
use tracing::{info, instrument};

use super::common::format_float;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{
    Arguments, ToolHandler, ToolOutcome, ToolOutput, parse_arguments,
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the conversion tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CToFParams {
    /// Temperature value in Celsius degrees
    #[schemars(with = "f64")]
    pub celsius: Number,
}

/// A completed conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Input exactly as the client sent it.
    pub celsius: Number,
    pub fahrenheit: f64,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°C = {}°F",
            self.celsius,
            format_float(self.fahrenheit)
        )
    }
}

/// Convert a Celsius reading to Fahrenheit.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Celsius to Fahrenheit conversion tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct CToFTool;

impl CToFTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "c_to_f";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Convert temperature from Celsius to Fahrenheit. \
        Takes a temperature value in Celsius and returns the equivalent Fahrenheit value. \
        Useful for temperature conversions and weather-related calculations.";

    /// Short description for the server summary.
    pub const SUMMARY: &'static str = "Convert temperature from Celsius to Fahrenheit";

    /// Execute the conversion.
    #[instrument(skip_all, fields(celsius = %params.celsius))]
    pub fn execute(params: CToFParams) -> Result<Conversion, ToolError> {
        let celsius = params
            .celsius
            .as_f64()
            .ok_or_else(|| ToolError::invalid_arguments("'celsius' is not representable"))?;
        let fahrenheit = celsius_to_fahrenheit(celsius);
        info!("Converted {}°C to {}°F", celsius, fahrenheit);

        Ok(Conversion {
            celsius: params.celsius,
            fahrenheit,
        })
    }
}

#[async_trait::async_trait]
impl ToolHandler for CToFTool {
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
        cached_schema_for_type::<CToFParams>()
    }

    async fn call(&self, arguments: Arguments) -> ToolOutcome {
        let params: CToFParams = parse_arguments(arguments)?;
        let conversion = Self::execute(params)?;
        Ok(ToolOutput::text(conversion.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: serde_json::Value) -> Arguments {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
    }

    #[tokio::test]
    async fn test_call_freezing_point() {
        let output = CToFTool.call(args(json!({"celsius": 0}))).await.unwrap();
        assert_eq!(output.text, "0°C = 32.0°F");
    }

    #[tokio::test]
    async fn test_call_keeps_input_formatting() {
        let output = CToFTool.call(args(json!({"celsius": 37.5}))).await.unwrap();
        assert_eq!(output.text, "37.5°C = 99.5°F");

        let output = CToFTool.call(args(json!({"celsius": -40}))).await.unwrap();
        assert_eq!(output.text, "-40°C = -40.0°F");
    }

    #[tokio::test]
    async fn test_call_huge_reading_uses_exponent() {
        let output = CToFTool.call(args(json!({"celsius": 1e20}))).await.unwrap();
        assert!(output.text.ends_with("°C = 1.8e+20°F"), "got {}", output.text);
    }

    #[tokio::test]
    async fn test_call_missing_celsius() {
        let err = CToFTool.call(Arguments::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_call_rejects_string_celsius() {
        let err = CToFTool
            .call(args(json!({"celsius": "warm"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_schema_requires_celsius() {
        let schema = CToFTool.input_schema();
        assert_eq!(schema["properties"]["celsius"]["type"], json!("number"));
        assert_eq!(schema["required"], json!(["celsius"]));
    }
}
