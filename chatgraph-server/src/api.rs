//! Request and response bodies.

use chatgraph::ToolType;
use serde::{Deserialize, Serialize};

/// Body of `/chat`, `/chat/stream`, `/query`, `/query/stream` and the first `/query/ws` frame.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub thread_id: String,
    pub tool_type: ToolType,
    pub tool_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryResponse {
    pub answer: String,
    pub steps: Vec<String>,
    pub thread_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub final_answer: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub code: u16,
    pub message: String,
}
