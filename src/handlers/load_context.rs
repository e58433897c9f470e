use crate::context::ContextSource;
use crate::protocol::{LoadContextArgs, LoadContextResult};

/// Handle a `load_telos_context` tool call.
///
/// Returns the context document verbatim. The optional `request` argument
/// is recorded in the log only.
pub async fn handle(args: LoadContextArgs, source: &ContextSource) -> LoadContextResult {
    if let Some(request) = args.request.as_deref() {
        tracing::debug!(request, "load_telos_context");
    }

    LoadContextResult {
        content: source.load().await,
    }
}
