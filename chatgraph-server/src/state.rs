//! Shared state for all routes.

use std::sync::Arc;

use chatgraph::{ConversationGraph, SuggestionGenerator};

/// Graph every transport calls, plus the suggestion generator for `/suggest`.
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<dyn ConversationGraph>,
    pub suggester: Arc<SuggestionGenerator>,
}

impl AppState {
    pub fn new(graph: Arc<dyn ConversationGraph>, suggester: Arc<SuggestionGenerator>) -> Self {
        Self { graph, suggester }
    }
}
