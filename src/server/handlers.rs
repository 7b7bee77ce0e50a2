use super::types::{
    AskRequest, AskResponse, CompletionRequest, CompletionResponse, ErrorResponse, HealthResponse,
    QuestionsResponse,
};
use crate::{
    Error,
    format::format_response,
    llm::{Completion, LlmClient},
    prompt::{self, Question, SUGGESTED_QUESTIONS},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmClient>,
    pub model: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

impl AppState {
    pub fn new(llm: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }
}

/// Relays a prompt to the provider: `{"prompt"}` in, `{"response"}` out.
pub async fn relay(
    State(state): State<AppState>,
    payload: Result<Json<CompletionRequest>, JsonRejection>,
) -> Result<Json<CompletionResponse>, HandlerError> {
    let request = parse_body(payload)?;
    let response = complete(&state, &request.prompt).await?;
    Ok(Json(CompletionResponse { response }))
}

/// Validates the question, composes the prompt, relays it and formats the answer.
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, HandlerError> {
    let request = parse_body(payload)?;
    let question = Question::parse(&request.question).map_err(|e| {
        info!("Rejected question: {}", e);
        error_response(&e)
    })?;
    let prompt = prompt::compose(&question);

    let response = complete(&state, prompt.as_str()).await?;
    let document = format_response(&response);

    Ok(Json(AskResponse {
        response,
        html: document.to_html(),
        document,
    }))
}

pub async fn questions() -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        questions: SUGGESTED_QUESTIONS.iter().map(|q| q.to_string()).collect(),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model.clone(),
    })
}

async fn complete(state: &AppState, prompt: &str) -> Result<String, HandlerError> {
    let span = info_span!("relay", request_id = %Uuid::new_v4(), model = %state.model);

    async {
        info!("Relaying prompt ({} chars)", prompt.chars().count());

        match state.llm.generate_content(prompt).await {
            Ok(Completion::Text(text)) => {
                info!("Relayed completion ({} chars)", text.chars().count());
                Ok(text)
            }
            Ok(Completion::Missing { finish_reason }) => {
                warn!(
                    "Provider response had no candidate text (finish reason: {}), answering with an empty response",
                    finish_reason.as_deref().unwrap_or("none")
                );
                Ok(String::new())
            }
            Err(e) => {
                error!("Relay failed: {}", e);
                Err(error_response(&e))
            }
        }
    }
    .instrument(span)
    .await
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HandlerError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        let e = Error::from(rejection);
        warn!("Rejected request body: {}", e);
        error_response(&e)
    })
}

fn error_response(e: &Error) -> HandlerError {
    (
        e.status_code(),
        Json(ErrorResponse {
            error: e.client_message(),
        }),
    )
}
