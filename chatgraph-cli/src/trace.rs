//! Execution trace lines for one node update.

use std::fmt;

use chatgraph::{Message, NodeUpdate};

/// One line of the execution trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceLine {
    Node(String),
    ToolUsed(String),
    ToolOutput(String),
    /// A human message produced inside the graph (e.g. a rewritten question).
    InternalUserMessage(String),
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceLine::Node(node) => write!(f, "🔹 Node: {}", node),
            TraceLine::ToolUsed(name) => write!(f, "🛠️ Tool Used: {}", name),
            TraceLine::ToolOutput(output) => write!(f, "📤 Tool Output:\n{}", output),
            TraceLine::InternalUserMessage(content) => {
                write!(f, "✏️ Internal User Message: {}", content)
            }
        }
    }
}

/// Trace lines for `update`: the node, then tool use/output and internal user messages in order.
/// AI messages are the answer, not trace.
pub fn trace_lines(update: &NodeUpdate) -> Vec<TraceLine> {
    let mut lines = vec![TraceLine::Node(update.node.clone())];
    for msg in &update.messages {
        match msg {
            Message::Tool { name, content } => {
                lines.push(TraceLine::ToolUsed(name.clone()));
                lines.push(TraceLine::ToolOutput(content.clone()));
            }
            Message::Human { content } => {
                lines.push(TraceLine::InternalUserMessage(content.clone()))
            }
            Message::Ai { .. } | Message::System { .. } => {}
        }
    }
    lines
}
