//! Chat messages and the conversation state that flows in and out of a graph.
//!
//! A run's state is a list of heterogeneous messages: what the user asked, what the model said,
//! and what tools returned. Serialized with a `type` tag so checkpoints and wire payloads stay
//! readable (`{"type":"ai","content":"..."}`).

use serde::{Deserialize, Serialize};

/// One chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Instructions for the model; never relayed to clients.
    System { content: String },
    /// User input, or a rewritten query a node injected on the user's behalf.
    Human { content: String },
    /// Model output. The last one in a run is the answer.
    Ai { content: String },
    /// Output of a tool call, tagged with the tool's name.
    Tool { name: String, content: String },
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::Human {
            content: content.into(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::Ai {
            content: content.into(),
        }
    }

    pub fn tool(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Tool {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Text of the message regardless of kind.
    pub fn content(&self) -> &str {
        match self {
            Self::System { content }
            | Self::Human { content }
            | Self::Ai { content }
            | Self::Tool { content, .. } => content,
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, Self::Ai { .. })
    }

    pub fn is_tool(&self) -> bool {
        matches!(self, Self::Tool { .. })
    }
}

/// Conversation state: the input to `invoke` / `stream` and the result of `invoke` / `get_state`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphState {
    pub messages: Vec<Message>,
}

impl GraphState {
    /// Input state for one user turn: a single human message.
    pub fn from_query(query: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::human(query)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: content() returns the text for every variant.
    #[test]
    fn content_returns_text_for_every_kind() {
        assert_eq!(Message::system("s").content(), "s");
        assert_eq!(Message::human("h").content(), "h");
        assert_eq!(Message::ai("a").content(), "a");
        assert_eq!(Message::tool("get_weather", "sunny").content(), "sunny");
    }

    /// **Scenario**: Messages serialize with a snake_case `type` tag and round-trip.
    #[test]
    fn message_serializes_with_type_tag() {
        let m = Message::tool("retrieve_faqs_tool", "answer");
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["type"], "tool");
        assert_eq!(v["name"], "retrieve_faqs_tool");
        let back: Message = serde_json::from_value(v).unwrap();
        assert_eq!(back, m);
    }

    /// **Scenario**: from_query builds a state with exactly one human message.
    #[test]
    fn from_query_wraps_single_human_message() {
        let s = GraphState::from_query("hello");
        assert_eq!(s.messages, vec![Message::human("hello")]);
    }
}
