use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use syllabus_query::Answer;

use crate::models::{AskRequest, AskResponse, ErrorResponse};
use crate::state::AppState;

pub const MISSING_QUESTION: &str = "Bad Request: \"question\" field is missing.";

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    req: Result<Json<AskRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match req {
        Ok(req) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected /ask body");
            return error(StatusCode::BAD_REQUEST, MISSING_QUESTION);
        }
    };

    let answer = state.context.answer(&req.question).await;
    if let Answer::Rule { rule, .. } = &answer {
        tracing::info!(rule = *rule, "answered by rule");
    }
    if !answer.is_available() {
        return error(StatusCode::INTERNAL_SERVER_ERROR, answer.text());
    }

    Json(AskResponse {
        answer: answer.text().to_string(),
    })
    .into_response()
}
