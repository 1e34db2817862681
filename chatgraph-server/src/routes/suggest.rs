//! `/suggest`: follow-up suggestions for a provided answer or a thread's last answer.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chatgraph::suggest::resolve_final_answer;
use chatgraph::SuggestionSource;

use crate::api::{SuggestRequest, SuggestResponse};
use crate::error::ServerError;
use crate::state::AppState;

pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, ServerError> {
    let source = resolve_final_answer(
        state.graph.as_ref(),
        req.final_answer.as_deref(),
        req.thread_id.as_deref(),
    )
    .await?;

    let final_answer = match source {
        SuggestionSource::Provided(a) | SuggestionSource::Thread(a) => a,
        SuggestionSource::NoThread => {
            return Ok(Json(SuggestResponse {
                suggestions: vec![],
                thread_id: None,
            }))
        }
        SuggestionSource::NoAnswer => {
            return Ok(Json(SuggestResponse {
                suggestions: vec![],
                thread_id: req.thread_id,
            }))
        }
    };

    let suggestions = state
        .suggester
        .suggest(&final_answer)
        .await
        .map_err(ServerError::Suggest)?;
    tracing::debug!(count = suggestions.len(), thread_id = ?req.thread_id, "suggest");

    Ok(Json(SuggestResponse {
        suggestions,
        thread_id: req.thread_id,
    }))
}
