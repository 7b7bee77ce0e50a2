use crate::format::Document;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/gemini`.
#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub response: String,
}

/// Body of `POST /api/ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: String,
    pub html: String,
    pub document: Document,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
