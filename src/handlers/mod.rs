pub mod apply_filter;
pub mod health;
pub mod load_context;

use crate::context::ContextSource;
use crate::protocol::{McpError, McpRequest, McpResponse, Method, ToolCall};
use crate::tools;

/// Dispatch an MCP request to the appropriate handler.
///
/// Always produces an envelope; no failure here is fatal to the server.
pub async fn dispatch(req: McpRequest, source: &ContextSource) -> McpResponse {
    let method = match req.into_method() {
        Ok(m) => m,
        Err(err) => {
            tracing::debug!(code = err.code, message = %err.message, "rejected request");
            return err.into();
        }
    };

    match method {
        Method::ToolsList => McpResponse::success(tools::list_result()),

        Method::ToolsCall(call) => dispatch_tool_call(call, source).await,

        Method::Unknown(name) => {
            tracing::debug!(method = %name, "unknown method");
            McpError::method_not_found(&name).into()
        }
    }
}

async fn dispatch_tool_call(call: ToolCall, source: &ContextSource) -> McpResponse {
    match call {
        ToolCall::LoadTelosContext(args) => {
            McpResponse::success(load_context::handle(args, source).await.into())
        }
        ToolCall::ApplyTelosFilter(args) => {
            McpResponse::success(apply_filter::handle(args, source).await.into())
        }
    }
}
