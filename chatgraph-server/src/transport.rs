//! Formatting of a graph run for the three transports.
//!
//! - [`chat_events`]: named SSE events (`thread`, `node`, `message`, `tool`, `error`, `done`).
//! - [`step_frames`]: JSON step frames for data-only SSE and WebSocket.
//! - [`collect_steps`]: the whole run folded into an answer plus step log.
//!
//! All three preserve the graph's order. A graph error is relayed as an `error` event/frame and
//! ends the run; `done` is only sent after a clean finish.

use axum::response::sse::Event;
use chatgraph::extract::update_content;
use chatgraph::{ChunkStream, GraphError, Message, StreamChunk};
use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use serde::Serialize;

/// Requested thread id when present and non-empty, else a fresh UUID v4.
pub fn resolve_thread_id(requested: Option<&str>) -> String {
    requested
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// One named SSE event of `/chat/stream`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Thread(String),
    Node(String),
    /// AI message content.
    Message(String),
    /// Tool name.
    Tool(String),
    Error(String),
    Done,
}

impl ChatEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Thread(_) => "thread",
            Self::Node(_) => "node",
            Self::Message(_) => "message",
            Self::Tool(_) => "tool",
            Self::Error(_) => "error",
            Self::Done => "done",
        }
    }

    pub fn data(&self) -> String {
        match self {
            Self::Thread(id) => id.clone(),
            Self::Node(node) => format!("🔹 Node: {}", node),
            Self::Message(content) => content.clone(),
            Self::Tool(name) => format!("Tool={}", name),
            Self::Error(message) => message.clone(),
            Self::Done => "end".to_string(),
        }
    }

    pub fn into_sse(self) -> Event {
        Event::default().event(self.name()).data(sse_data(&self.data()))
    }
}

/// SSE fields may not contain carriage returns; fold them into line breaks, which the event
/// builder then splits over several `data:` lines.
fn sse_data(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn chunk_events(chunk: &StreamChunk) -> Vec<ChatEvent> {
    let mut events = Vec::new();
    for update in &chunk.updates {
        events.push(ChatEvent::Node(update.node.clone()));
        for msg in &update.messages {
            match msg {
                Message::Ai { content } => events.push(ChatEvent::Message(content.clone())),
                Message::Tool { name, .. } => events.push(ChatEvent::Tool(name.clone())),
                Message::Human { .. } | Message::System { .. } => {}
            }
        }
    }
    events
}

/// Named events for a run: `thread`, then per node `node` + its AI/tool messages, then `done`.
pub fn chat_events(thread_id: String, chunks: ChunkStream) -> BoxStream<'static, ChatEvent> {
    let body = with_end_marker(chunks)
        .scan(false, |failed, item| {
            let out = if *failed {
                None
            } else {
                match item {
                    Some(Ok(chunk)) => Some(chunk_events(&chunk)),
                    Some(Err(e)) => {
                        *failed = true;
                        tracing::warn!(error = %e, "graph stream failed");
                        Some(vec![ChatEvent::Error(e.to_string())])
                    }
                    None => Some(vec![ChatEvent::Done]),
                }
            };
            future::ready(out)
        })
        .flat_map(stream::iter);
    stream::once(future::ready(ChatEvent::Thread(thread_id)))
        .chain(body)
        .boxed()
}

/// JSON frame of `/query/stream` and `/query/ws`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepFrame {
    Init {
        thread_id: String,
    },
    Step {
        step: usize,
        node: String,
        content: String,
    },
    Error {
        message: String,
    },
    Done,
}

/// Step frames for a run: `init`, one `step` per node (step = chunk number from 1), `done`.
pub fn step_frames(thread_id: String, chunks: ChunkStream) -> BoxStream<'static, StepFrame> {
    let body = with_end_marker(chunks)
        .scan((0usize, false), |(step, failed), item| {
            let out = if *failed {
                None
            } else {
                match item {
                    Some(Ok(chunk)) => {
                        *step += 1;
                        let n = *step;
                        Some(
                            chunk
                                .updates
                                .iter()
                                .map(|u| StepFrame::Step {
                                    step: n,
                                    node: u.node.clone(),
                                    content: update_content(u),
                                })
                                .collect::<Vec<_>>(),
                        )
                    }
                    Some(Err(e)) => {
                        *failed = true;
                        tracing::warn!(error = %e, step = *step, "graph stream failed");
                        Some(vec![StepFrame::Error {
                            message: e.to_string(),
                        }])
                    }
                    None => Some(vec![StepFrame::Done]),
                }
            };
            future::ready(out)
        })
        .flat_map(stream::iter);
    stream::once(future::ready(StepFrame::Init { thread_id }))
        .chain(body)
        .boxed()
}

/// `None` after the last item so the formatters can tell a clean end from an error.
fn with_end_marker(
    chunks: ChunkStream,
) -> impl futures::Stream<Item = Option<Result<StreamChunk, GraphError>>> + Send {
    chunks.map(Some).chain(stream::once(future::ready(None)))
}

/// Formats one step log entry.
pub fn format_step(step: usize, node: &str, content: &str) -> String {
    format!("Step {} | Node: {}\nResponse: {}", step, node, content)
}

/// Consumes a run: returns the last node's content as the answer plus one log entry per node.
pub async fn collect_steps(mut chunks: ChunkStream) -> Result<(String, Vec<String>), GraphError> {
    let mut answer = String::new();
    let mut steps = Vec::new();
    let mut step = 0usize;
    while let Some(item) = chunks.next().await {
        let chunk = item?;
        step += 1;
        for update in &chunk.updates {
            let content = update_content(update);
            steps.push(format_step(step, &update.node, &content));
            answer = content;
        }
    }
    Ok((answer, steps))
}
