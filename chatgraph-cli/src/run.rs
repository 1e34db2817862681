//! One chat turn: stream the graph and report progress.

use chatgraph::{ConversationGraph, GraphError, GraphState, Message};
use tokio_stream::StreamExt;

use crate::session::ChatSession;
use crate::trace::{trace_lines, TraceLine};

/// Progress of a turn, in graph order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    Trace(TraceLine),
    /// Latest AI content; later ones replace earlier ones.
    Answer(String),
}

/// Runs `input` on the session's thread, calling `on_event` for every trace line and AI message.
///
/// The user input is recorded before the run; the final answer (last AI content, possibly empty)
/// is recorded only when the run completes.
pub async fn run_turn<F>(
    graph: &dyn ConversationGraph,
    session: &mut ChatSession,
    input: &str,
    mut on_event: F,
) -> Result<String, GraphError>
where
    F: FnMut(&TurnEvent),
{
    session.push_user(input);
    tracing::debug!(thread_id = %session.thread_id(), "turn start");

    let mut chunks = graph.stream(GraphState::from_query(input), session.config());
    let mut final_answer = String::new();
    while let Some(item) = chunks.next().await {
        let chunk = item?;
        for update in &chunk.updates {
            for line in trace_lines(update) {
                on_event(&TurnEvent::Trace(line));
            }
            for msg in &update.messages {
                if let Message::Ai { content } = msg {
                    final_answer = content.clone();
                    on_event(&TurnEvent::Answer(final_answer.clone()));
                }
            }
        }
    }

    session.push_assistant(final_answer.clone());
    Ok(final_answer)
}
