//! Static tool descriptors advertised by `tools/list`.

use serde::Serialize;
use serde_json::{json, Value};

pub const LOAD_TELOS_CONTEXT: &str = "load_telos_context";
pub const APPLY_TELOS_FILTER: &str = "apply_telos_filter";

/// A tool as advertised to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Every tool this server exposes, in advertisement order.
pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: LOAD_TELOS_CONTEXT,
            description: "Load personal TELOS context for decision filtering",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "request": {
                        "type": "string",
                        "description": "The request to filter through personal context"
                    }
                }
            }),
        },
        ToolDescriptor {
            name: APPLY_TELOS_FILTER,
            description: "Apply TELOS context to evaluate alignment with personal mission",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "content": {
                        "type": "string",
                        "description": "Content to evaluate"
                    },
                    "decision_type": {
                        "type": "string",
                        "description": "Type of decision"
                    }
                }
            }),
        },
    ]
}

/// Input schema for a tool, if the name is known.
pub fn input_schema(name: &str) -> Option<Value> {
    descriptors()
        .into_iter()
        .find(|d| d.name == name)
        .map(|d| d.input_schema)
}

/// Body of a `tools/list` result.
pub fn list_result() -> Value {
    json!({ "tools": descriptors() })
}
