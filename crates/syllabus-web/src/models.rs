use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when syllabus data is loaded, `"degraded"` otherwise.
    pub status: &'static str,
    pub semesters: usize,
    pub assistant: bool,
}
