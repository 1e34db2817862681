//! Response shaping: pick the answer and tool metadata out of a run's messages.

use serde::{Deserialize, Serialize};

use crate::graph::NodeUpdate;
use crate::message::Message;

/// Answer returned by `/chat` when the run produced no AI message.
pub const FALLBACK_ANSWER: &str = "I don't know.";

/// Kind of the last tool used in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    /// A retrieval tool (its name contains "retrieve").
    Rag,
    Custom,
    None,
}

/// Name and kind of the last tool message of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMetadata {
    pub tool_name: Option<String>,
    pub tool_type: ToolType,
}

/// Last AI message, scanning from the end.
pub fn last_ai_message(messages: &[Message]) -> Option<&Message> {
    messages.iter().rev().find(|m| m.is_ai())
}

/// Content of the last AI message.
pub fn last_ai_answer(messages: &[Message]) -> Option<&str> {
    last_ai_message(messages).map(Message::content)
}

/// Metadata of the last tool message; `tool_type` is `None` when no tool ran.
pub fn tool_metadata(messages: &[Message]) -> ToolMetadata {
    let last_tool = messages.iter().rev().find_map(|m| match m {
        Message::Tool { name, .. } => Some(name),
        _ => None,
    });
    match last_tool {
        Some(name) => ToolMetadata {
            tool_name: Some(name.clone()),
            tool_type: if name.to_lowercase().contains("retrieve") {
                ToolType::Rag
            } else {
                ToolType::Custom
            },
        },
        None => ToolMetadata {
            tool_name: None,
            tool_type: ToolType::None,
        },
    }
}

/// Content of the update's last message; empty when the node produced no messages.
pub fn update_content(update: &NodeUpdate) -> String {
    update
        .messages
        .last()
        .map(|m| m.content().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation() -> Vec<Message> {
        vec![
            Message::human("who leads CCC?"),
            Message::ai("Let me check."),
            Message::tool("Retrieve_Members_Tool", "member list"),
            Message::ai("The lead is Asha."),
            Message::human("thanks"),
        ]
    }

    /// **Scenario**: the last AI message wins even when later non-AI messages exist.
    #[test]
    fn last_ai_answer_scans_from_end() {
        assert_eq!(last_ai_answer(&conversation()), Some("The lead is Asha."));
    }

    /// **Scenario**: no AI message yields None.
    #[test]
    fn last_ai_answer_none_without_ai() {
        assert_eq!(last_ai_answer(&[Message::human("hi")]), None);
    }

    /// **Scenario**: tool names containing "retrieve" (any case) are rag.
    #[test]
    fn retrieve_tool_is_rag_case_insensitive() {
        let meta = tool_metadata(&conversation());
        assert_eq!(meta.tool_name.as_deref(), Some("Retrieve_Members_Tool"));
        assert_eq!(meta.tool_type, ToolType::Rag);
    }

    /// **Scenario**: other tool names are custom; only the last tool message counts.
    #[test]
    fn last_tool_decides_type() {
        let msgs = vec![
            Message::tool("retrieve_faqs_tool", "faq"),
            Message::tool("get_weather", "sunny"),
        ];
        let meta = tool_metadata(&msgs);
        assert_eq!(meta.tool_name.as_deref(), Some("get_weather"));
        assert_eq!(meta.tool_type, ToolType::Custom);
    }

    /// **Scenario**: without tool messages the type is none and the name absent.
    #[test]
    fn no_tool_is_none() {
        let meta = tool_metadata(&[Message::ai("hi")]);
        assert_eq!(meta.tool_name, None);
        assert_eq!(meta.tool_type, ToolType::None);
        assert_eq!(serde_json::to_value(meta.tool_type).unwrap(), "none");
    }

    /// **Scenario**: update_content uses the last message, or "" for an empty update.
    #[test]
    fn update_content_last_message_or_empty() {
        let u = NodeUpdate::new("n", vec![Message::human("q"), Message::ai("a")]);
        assert_eq!(update_content(&u), "a");
        assert_eq!(update_content(&NodeUpdate::new("n", vec![])), "");
    }
}
