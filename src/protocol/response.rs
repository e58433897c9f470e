use serde::Serialize;
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Response envelope for `POST /mcp`.
///
/// Exactly one of `result` / `error` is populated. Both keys are always
/// serialized so clients can test either one against `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McpResponse {
    pub result: Option<Value>,
    pub error: Option<McpError>,
}

impl McpResponse {
    pub fn success(result: Value) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn error(error: McpError) -> Self {
        Self {
            result: None,
            error: Some(error),
        }
    }
}

impl From<McpError> for McpResponse {
    fn from(error: McpError) -> Self {
        Self::error(error)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

/// Structured error carried in the envelope. Codes follow JSON-RPC 2.0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
}

impl McpError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::new(PARSE_ERROR, format!("Parse error: {detail}"))
    }

    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, detail)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method {method} not found"))
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, detail)
    }

    pub fn tool_not_found(name: &str) -> Self {
        Self::new(INVALID_PARAMS, format!("Tool {name} not found"))
    }
}

// ---------------------------------------------------------------------------
// Tool results
// ---------------------------------------------------------------------------

/// Result of `load_telos_context`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadContextResult {
    pub content: String,
}

impl From<LoadContextResult> for Value {
    fn from(r: LoadContextResult) -> Self {
        Value::Object(Map::from_iter([("content".to_string(), Value::String(r.content))]))
    }
}

/// Result of `apply_telos_filter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    pub filtered_content: String,
}

impl From<FilterResult> for Value {
    fn from(r: FilterResult) -> Self {
        Value::Object(Map::from_iter([(
            "filtered_content".to_string(),
            Value::String(r.filtered_content),
        )]))
    }
}
