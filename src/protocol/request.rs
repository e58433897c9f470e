use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::response::McpError;
use crate::schema::validate_value;
use crate::tools::{self, APPLY_TELOS_FILTER, LOAD_TELOS_CONTEXT};

/// Request envelope as it arrives on `POST /mcp`.
#[derive(Debug, Clone, Deserialize)]
pub struct McpRequest {
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl McpRequest {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Validate the envelope and resolve it into a typed [`Method`].
    ///
    /// Shape errors surface as structured errors instead of being read as
    /// empty values.
    pub fn into_method(self) -> Result<Method, McpError> {
        if self.method.is_empty() {
            return Err(McpError::invalid_request("method must be a non-empty string"));
        }

        let params = match self.params {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            _ => return Err(McpError::invalid_request("params must be an object")),
        };

        match self.method.as_str() {
            "tools/list" => Ok(Method::ToolsList),
            "tools/call" => {
                let params: ToolCallParams = serde_json::from_value(Value::Object(params))
                    .map_err(|e| McpError::invalid_params(format!("Invalid tools/call params: {e}")))?;
                params.into_tool_call().map(Method::ToolsCall)
            }
            _ => Ok(Method::Unknown(self.method)),
        }
    }
}

/// A request after boundary validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    ToolsList,
    ToolsCall(ToolCall),
    Unknown(String),
}

/// Raw parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl ToolCallParams {
    /// Check the arguments against the tool's advertised input schema, then
    /// deserialize them into the tool's argument type.
    pub fn into_tool_call(self) -> Result<ToolCall, McpError> {
        let arguments = match self.arguments {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(v) => v,
        };

        match self.name.as_str() {
            LOAD_TELOS_CONTEXT => {
                parse_arguments(&self.name, &arguments).map(ToolCall::LoadTelosContext)
            }
            APPLY_TELOS_FILTER => {
                parse_arguments(&self.name, &arguments).map(ToolCall::ApplyTelosFilter)
            }
            _ => Err(McpError::tool_not_found(&self.name)),
        }
    }
}

/// A validated tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    LoadTelosContext(LoadContextArgs),
    ApplyTelosFilter(ApplyFilterArgs),
}

/// Arguments for `load_telos_context`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoadContextArgs {
    /// Free-text description of what the caller intends to filter.
    #[serde(default)]
    pub request: Option<String>,
}

/// Arguments for `apply_telos_filter`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApplyFilterArgs {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub decision_type: Option<String>,
}

fn parse_arguments<T: DeserializeOwned>(tool: &str, arguments: &Value) -> Result<T, McpError> {
    // Every name matched by the caller has a descriptor.
    if let Some(schema) = tools::input_schema(tool) {
        validate_value(&schema, arguments).map_err(|e| {
            McpError::invalid_params(format!("Invalid arguments for {tool}: {e}"))
        })?;
    }

    serde_json::from_value(arguments.clone())
        .map_err(|e| McpError::invalid_params(format!("Invalid arguments for {tool}: {e}")))
}
