//! Tests for run_turn: streaming events and transcript updates.

use chatgraph::{
    ConversationGraph, GraphError, Message, RunnableConfig, ScriptedGraph, StreamChunk,
};

use crate::{run_turn, ChatSession, Role, TraceLine, TurnEvent};

fn rag_graph() -> ScriptedGraph {
    ScriptedGraph::new(vec![
        StreamChunk::single("agent", vec![Message::ai("")]),
        StreamChunk::single(
            "retrieve",
            vec![Message::tool("retrieve_blog_posts", "Dr. Rao coordinates CCC.")],
        ),
        StreamChunk::single("generate", vec![Message::ai("Dr. Rao is the coordinator.")]),
    ])
}

/// **Scenario**: a turn reports trace lines and answers in graph order and records the final answer.
#[tokio::test]
async fn run_turn_streams_events_and_records_answer() {
    // Given: a scripted RAG graph and a session
    let graph = rag_graph();
    let mut session = ChatSession::with_thread_id("cli-1");
    let mut events = Vec::new();

    // When: running one turn
    let answer = run_turn(&graph, &mut session, "who leads CCC?", |ev| {
        events.push(ev.clone())
    })
    .await
    .unwrap();

    // Then: the answer is the last AI content
    assert_eq!(answer, "Dr. Rao is the coordinator.");
    assert_eq!(
        events,
        vec![
            TurnEvent::Trace(TraceLine::Node("agent".into())),
            TurnEvent::Answer("".into()),
            TurnEvent::Trace(TraceLine::Node("retrieve".into())),
            TurnEvent::Trace(TraceLine::ToolUsed("retrieve_blog_posts".into())),
            TurnEvent::Trace(TraceLine::ToolOutput("Dr. Rao coordinates CCC.".into())),
            TurnEvent::Trace(TraceLine::Node("generate".into())),
            TurnEvent::Answer("Dr. Rao is the coordinator.".into()),
        ]
    );
    // And: only the input and final answer are in the transcript
    let t = session.transcript();
    assert_eq!(t.len(), 2);
    assert_eq!((t[0].role, t[0].content.as_str()), (Role::User, "who leads CCC?"));
    assert_eq!(
        (t[1].role, t[1].content.as_str()),
        (Role::Assistant, "Dr. Rao is the coordinator.")
    );
}

/// **Scenario**: the turn runs on the session's thread, so the graph remembers it.
#[tokio::test]
async fn run_turn_uses_session_thread() {
    let graph = rag_graph();
    let mut session = ChatSession::with_thread_id("cli-2");
    run_turn(&graph, &mut session, "hello", |_| {}).await.unwrap();

    let state = graph
        .get_state(RunnableConfig::for_thread("cli-2"))
        .await
        .unwrap();
    assert_eq!(state.messages.first(), Some(&Message::human("hello")));
    assert_eq!(
        state.messages.last(),
        Some(&Message::ai("Dr. Rao is the coordinator."))
    );
}

/// **Scenario**: a graph failure is returned and no assistant turn is recorded.
#[tokio::test]
async fn run_turn_propagates_failure() {
    // Given: a graph that fails after the first chunk
    let graph = rag_graph().failing_after(1, "retriever down");
    let mut session = ChatSession::with_thread_id("cli-3");
    let mut events = Vec::new();

    // When
    let err = run_turn(&graph, &mut session, "q", |ev| events.push(ev.clone()))
        .await
        .unwrap_err();

    // Then
    assert!(matches!(err, GraphError::ExecutionFailed(ref m) if m == "retriever down"));
    assert_eq!(events.len(), 2);
    assert_eq!(session.transcript().len(), 1);
    assert_eq!(session.transcript()[0].role, Role::User);
}
