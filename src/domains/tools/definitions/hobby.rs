//! Hobby lookup tool.
//!
//! Serves hobby details from a fixed table.

use std::fmt;
use std::sync::Arc;

use rmcp::{handler::server::tool::cached_schema_for_type, model::JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::domains::tools::handlers::{
    Arguments, ToolHandler, ToolOutcome, ToolOutput, parse_arguments,
};

/// Parameters for the hobby tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HobbyParams {
    /// The type of hobby (e.g., 'reading', 'writing', 'coding')
    #[serde(default = "default_hobby_type")]
    pub hobby_type: String,
}

fn default_hobby_type() -> String {
    "reading".to_string()
}

/// Details about one hobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HobbyInfo {
    pub name: String,
    pub description: String,
    pub frequency: String,
}

impl fmt::Display for HobbyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hobby: {}, Description: {}, Frequency: {}",
            self.name, self.description, self.frequency
        )
    }
}

/// (name, description, frequency)
const HOBBIES: &[(&str, &str, &str)] = &[
    (
        "reading",
        "Love reading books like the Bible and articles",
        "daily",
    ),
    ("writing", "Enjoy creative writing and blogging", "weekly"),
    (
        "coding",
        "Passionate about programming and software development",
        "daily",
    ),
];

/// Look up a hobby; unknown types get a placeholder entry.
pub fn lookup(hobby_type: &str) -> HobbyInfo {
    match HOBBIES.iter().find(|(name, _, _)| *name == hobby_type) {
        Some((name, description, frequency)) => HobbyInfo {
            name: name.to_string(),
            description: description.to_string(),
            frequency: frequency.to_string(),
        },
        None => HobbyInfo {
            name: hobby_type.to_string(),
            description: "Hobby information not available".to_string(),
            frequency: "unknown".to_string(),
        },
    }
}

/// Hobby lookup tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct HobbyTool;

impl HobbyTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_hobby";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Retrieve user hobby information based on hobby type. \
        Returns details about a specific hobby including description and frequency.";

    /// Short description for the server summary.
    pub const SUMMARY: &'static str = "Retrieve user hobby information";
}

#[async_trait::async_trait]
impl ToolHandler for HobbyTool {
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
        cached_schema_for_type::<HobbyParams>()
    }

    async fn call(&self, arguments: Arguments) -> ToolOutcome {
        let params: HobbyParams = parse_arguments(arguments)?;
        info!("Looking up hobby: {}", params.hobby_type);
        Ok(ToolOutput::text(lookup(&params.hobby_type).to_string()))
    }
}
