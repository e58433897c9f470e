use crate::context::ContextSource;
use crate::protocol::{ApplyFilterArgs, FilterResult};

/// Number of context characters embedded in the filtered output.
pub const CONTEXT_PREVIEW_CHARS: usize = 200;

/// Stands in for the alignment analysis, which is not computed.
pub const ALIGNMENT_PLACEHOLDER: &str =
    "[This would contain AI-generated alignment analysis]";

/// Handle an `apply_telos_filter` tool call.
pub async fn handle(args: ApplyFilterArgs, source: &ContextSource) -> FilterResult {
    if let Some(decision_type) = args.decision_type.as_deref() {
        tracing::debug!(decision_type, "apply_telos_filter");
    }

    let context = source.load().await;
    FilterResult {
        filtered_content: render(&context, &args.content),
    }
}

/// Build the filtered text from a context document and caller content.
///
/// The caller content is embedded verbatim. Truncation of the context
/// counts characters, so a multi-byte character is never split.
pub fn render(context: &str, content: &str) -> String {
    let preview: String = context.chars().take(CONTEXT_PREVIEW_CHARS).collect();

    format!(
        "TELOS-Filtered Analysis:\n\n\
         Personal Context Applied: {preview}...\n\n\
         Content Analysis: {content}\n\n\
         Alignment Assessment: {ALIGNMENT_PLACEHOLDER}\n"
    )
}
