use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use crate::models::HealthResponse;
use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let context = &state.context;
    Json(HealthResponse {
        status: if context.is_available() {
            "ok"
        } else {
            "degraded"
        },
        semesters: context.document().map_or(0, |d| d.semesters.len()),
        assistant: context.has_generator(),
    })
}
