//! Follow-up suggestions: render a fixed prompt around the final answer and parse the reply.

use std::sync::Arc;

use crate::error::GraphError;
use crate::extract::last_ai_answer;
use crate::graph::ConversationGraph;
use crate::llm::LlmClient;
use crate::memory::RunnableConfig;
use crate::message::Message;

pub const SUGGESTION_PROMPT: &str = "
You are an assistant that generates follow-up query suggestions.

Rules:
- Use the provided final answer.
- If the final answer contains a question, generate possible answers to that question.
- If the final answer is neutral, suggest queries related to Cloud Computing Cell (CCC) and related to the neutral answer.
- Generate between 2 and 3 suggestions.
- Each suggestion must contain 3 to 6 words.
- Do NOT number the suggestions.
- Do NOT use bullets.

Final Answer:
{final_answer}
";

/// Prompt for `final_answer`.
pub fn render_prompt(final_answer: &str) -> String {
    SUGGESTION_PROMPT.replace("{final_answer}", final_answer)
}

/// One suggestion per non-blank line, with stray bullets / dashes stripped.
pub fn parse_suggestions(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.trim_matches(|c| c == '-' || c == '•' || c == ' ')
                .trim()
                .to_string()
        })
        .collect()
}

/// Calls an LLM with the suggestion prompt.
pub struct SuggestionGenerator {
    llm: Arc<dyn LlmClient>,
}

impl SuggestionGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn suggest(&self, final_answer: &str) -> Result<Vec<String>, GraphError> {
        let prompt = render_prompt(final_answer);
        let reply = self.llm.invoke(&[Message::human(prompt)]).await?;
        let suggestions = parse_suggestions(&reply.content);
        tracing::debug!(count = suggestions.len(), "suggestions generated");
        Ok(suggestions)
    }
}

/// Where the answer to build suggestions from was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionSource {
    /// The caller supplied it.
    Provided(String),
    /// Read from the thread's last AI message.
    Thread(String),
    /// No thread id was given and no answer provided.
    NoThread,
    /// The thread has no AI message yet.
    NoAnswer,
}

/// Picks the answer to build suggestions from: the provided one when non-empty, otherwise the
/// last AI answer of the thread.
pub async fn resolve_final_answer(
    graph: &dyn ConversationGraph,
    final_answer: Option<&str>,
    thread_id: Option<&str>,
) -> Result<SuggestionSource, GraphError> {
    if let Some(answer) = final_answer.filter(|a| !a.is_empty()) {
        return Ok(SuggestionSource::Provided(answer.to_string()));
    }
    let Some(thread_id) = thread_id.filter(|t| !t.is_empty()) else {
        return Ok(SuggestionSource::NoThread);
    };
    let state = graph
        .get_state(RunnableConfig::for_thread(thread_id))
        .await?;
    Ok(match last_ai_answer(&state.messages) {
        Some(answer) if !answer.is_empty() => SuggestionSource::Thread(answer.to_string()),
        _ => SuggestionSource::NoAnswer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ScriptedGraph, StreamChunk};
    use crate::llm::MockLlm;
    use crate::message::GraphState;

    /// **Scenario**: the rendered prompt ends with the final answer.
    #[test]
    fn render_prompt_inserts_answer() {
        let p = render_prompt("CCC hosts a hackathon in March.");
        assert!(p.contains("Final Answer:\nCCC hosts a hackathon in March."));
        assert!(!p.contains("{final_answer}"));
    }

    /// **Scenario**: bullets, dashes and blank lines are removed.
    #[test]
    fn parse_suggestions_strips_bullets_and_blank_lines() {
        let text = "- When is the hackathon?\n\n• Who can join CCC?  \n   \n--Show upcoming events-- \n";
        assert_eq!(
            parse_suggestions(text),
            vec![
                "When is the hackathon?",
                "Who can join CCC?",
                "Show upcoming events"
            ]
        );
    }

    /// **Scenario**: inner dashes survive; only the ends are stripped.
    #[test]
    fn parse_suggestions_keeps_inner_dashes() {
        assert_eq!(parse_suggestions("- cloud-native workshops"), vec!["cloud-native workshops"]);
    }

    /// **Scenario**: suggest sends one human message with the rendered prompt.
    #[tokio::test]
    async fn suggest_sends_rendered_prompt() {
        let llm = Arc::new(MockLlm::with_reply("Tell me more\nList upcoming events"));
        let generator = SuggestionGenerator::new(Arc::clone(&llm) as Arc<dyn LlmClient>);
        let out = generator.suggest("CCC is a society.").await.unwrap();
        assert_eq!(out, vec!["Tell me more", "List upcoming events"]);
        let sent = llm.last_messages().unwrap();
        assert_eq!(sent, vec![Message::human(render_prompt("CCC is a society."))]);
    }

    /// **Scenario**: a provided answer wins over the thread; empty answer falls through.
    #[tokio::test]
    async fn resolve_prefers_provided_answer() {
        let graph = ScriptedGraph::new(vec![]);
        let src = resolve_final_answer(&graph, Some("given"), Some("t"))
            .await
            .unwrap();
        assert_eq!(src, SuggestionSource::Provided("given".into()));
        let src = resolve_final_answer(&graph, Some(""), None).await.unwrap();
        assert_eq!(src, SuggestionSource::NoThread);
    }

    /// **Scenario**: without an answer the thread's last AI message is used.
    #[tokio::test]
    async fn resolve_reads_thread_state() {
        let graph = ScriptedGraph::new(vec![StreamChunk::single(
            "generate",
            vec![Message::ai("Events are on Friday.")],
        )]);
        graph
            .invoke(GraphState::from_query("events?"), RunnableConfig::for_thread("t1"))
            .await
            .unwrap();

        let src = resolve_final_answer(&graph, None, Some("t1")).await.unwrap();
        assert_eq!(src, SuggestionSource::Thread("Events are on Friday.".into()));
        let src = resolve_final_answer(&graph, None, Some("t2")).await.unwrap();
        assert_eq!(src, SuggestionSource::NoAnswer);
    }
}
