//! `/` and `/health`.

use axum::Json;
use serde_json::{json, Value};

use crate::api::HealthResponse;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        code: 200,
        message: "CCC Chatbot API is healthy.".to_string(),
    })
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "welcome": "Welcome to the CCC Chatbot API",
        "description": "This API relays a conversational graph with per-thread memory over \
            plain JSON, Server-Sent Events and WebSocket, and generates follow-up suggestions.",
        "available_endpoints": {
            "/chat": {
                "method": "POST",
                "type": "REST",
                "purpose": "Standard chatbot interaction: final answer plus last tool used",
                "body": {
                    "query": "string (required)",
                    "thread_id": "string (optional, used for memory)"
                }
            },
            "/chat/stream": {
                "method": "POST",
                "type": "SSE (Streaming)",
                "purpose": "Named events per node, AI message and tool call"
            },
            "/query": {
                "method": "POST",
                "type": "REST",
                "purpose": "Final answer plus a step-by-step node log"
            },
            "/query/stream": {
                "method": "POST",
                "type": "SSE (Streaming)",
                "purpose": "JSON step frames (init, step, done)"
            },
            "/query/ws": {
                "method": "GET",
                "type": "WebSocket",
                "purpose": "Send {query, thread_id?}; receive JSON step frames"
            },
            "/suggest": {
                "method": "POST",
                "type": "REST",
                "purpose": "Follow-up suggestions from a final answer or a thread's last answer",
                "body": {
                    "final_answer": "string (optional)",
                    "thread_id": "string (optional)"
                }
            },
            "/health": {
                "method": "GET",
                "purpose": "Health check for monitoring and deployment"
            }
        },
        "chatbot_capabilities": [
            "Multi-turn conversational memory",
            "Streaming and non-streaming responses",
            "Node-by-node execution trace",
            "Follow-up query suggestions"
        ]
    }))
}
