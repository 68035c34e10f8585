//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{ChatRequest, ChatResponse, ErrorResponse, InfoResponse};
use super::AppState;
use crate::llm::LlmError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::Instrument;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat widget
        .route("/", get(serve_index))
        .route("/assets/*path", get(serve_static))
        .route("/api/info", get(get_info))
        .route("/api/chat", post(send_chat))
        .route("/version", get(get_version))
        .with_state(state)
}

async fn serve_index() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - chat widget not found in ui/dist</h1>".to_string()),
        )
            .into_response(),
    }
}

async fn get_info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        page: state.page.as_ref().clone(),
        model: state.chat.model_id().to_string(),
    })
}

async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!(
        "chat",
        %request_id,
        history_turns = req.history.len()
    );

    let reply = state
        .chat
        .handle(&req.message, &req.history)
        .instrument(span)
        .await?;

    Ok(Json(ChatResponse { reply }))
}

async fn get_version() -> &'static str {
    concat!("gemini_chat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

/// Handler failures. Every model failure is an upstream problem, so it is
/// reported as a bad gateway with the provider's message.
enum AppError {
    Upstream(LlmError),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Upstream(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Upstream(e) => (StatusCode::BAD_GATEWAY, e.message),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
