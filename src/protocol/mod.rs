pub mod request;
pub mod response;

pub use request::{
    ApplyFilterArgs, LoadContextArgs, McpRequest, Method, ToolCall, ToolCallParams,
};
pub use response::{
    FilterResult, LoadContextResult, McpError, McpResponse, INVALID_PARAMS, INVALID_REQUEST,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
