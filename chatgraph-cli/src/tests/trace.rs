//! Tests for trace line extraction and rendering.

use chatgraph::{Message, NodeUpdate};

use crate::{trace_lines, TraceLine};

/// **Scenario**: a retrieval update yields node, tool used and tool output lines.
#[test]
fn tool_message_yields_used_and_output() {
    // Given: an update from the retrieve node carrying a tool message
    let update = NodeUpdate::new(
        "retrieve",
        vec![Message::tool("retrieve_blog_posts", "CCC was founded in 2019.")],
    );
    // When
    let lines = trace_lines(&update);
    // Then
    assert_eq!(
        lines,
        vec![
            TraceLine::Node("retrieve".into()),
            TraceLine::ToolUsed("retrieve_blog_posts".into()),
            TraceLine::ToolOutput("CCC was founded in 2019.".into()),
        ]
    );
}

/// **Scenario**: human messages inside the graph are internal user messages; AI messages are skipped.
#[test]
fn human_message_is_internal_and_ai_is_skipped() {
    let update = NodeUpdate::new(
        "rewrite",
        vec![
            Message::human("Who coordinates CCC events?"),
            Message::ai("ignored"),
        ],
    );
    let lines = trace_lines(&update);
    assert_eq!(
        lines,
        vec![
            TraceLine::Node("rewrite".into()),
            TraceLine::InternalUserMessage("Who coordinates CCC events?".into()),
        ]
    );
}

/// **Scenario**: lines render with their markers.
#[test]
fn display_uses_markers() {
    assert_eq!(TraceLine::Node("agent".into()).to_string(), "🔹 Node: agent");
    assert_eq!(
        TraceLine::ToolUsed("search".into()).to_string(),
        "🛠️ Tool Used: search"
    );
    assert_eq!(
        TraceLine::ToolOutput("x".into()).to_string(),
        "📤 Tool Output:\nx"
    );
    assert_eq!(
        TraceLine::InternalUserMessage("q".into()).to_string(),
        "✏️ Internal User Message: q"
    );
}
