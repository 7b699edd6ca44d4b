// src/handler/ai_handler.rs
use std::sync::Arc;

use axum::{
    http::HeaderMap,
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::HttpError,
    middleware::JWTAuthMiddleware,
    models::ticketmodel::Ticket,
    service::assistant::{ticket_directive, ChatTurn},
    AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequestDto {
    #[validate(length(min = 1, message = "Prompt is required"))]
    pub prompt: String,

    #[serde(rename = "chatHistory", default)]
    pub chat_history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponseDto {
    pub text: String,
    // Present when the assistant's reply was a ticket-creation directive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<Ticket>,
}

pub fn ai_handler() -> Router {
    Router::new().route("/chat", post(chat))
}

/// Converse with the assistant. When the reply carries the ticket-creation
/// directive, the ticket is filed here on the user's behalf before the
/// reply goes out; a failed auto-file downgrades to a plain answer rather
/// than surfacing an error.
pub async fn chat(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    headers: HeaderMap,
    Json(body): Json<ChatRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let text = app_state
        .assistant
        .chat(&body.prompt, &body.chat_history)
        .await;

    let mut ticket = None;
    if let Some(summary) = ticket_directive(&text) {
        let description = format!(
            "Auto-filed by the assistant. Original message: {}",
            body.prompt
        );

        let ip_address = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').next().unwrap_or(v).trim().to_string());

        match app_state
            .ticket_service
            .create(&auth.user, summary, &description, ip_address)
            .await
        {
            Ok(created) => ticket = Some(created),
            Err(err) => {
                tracing::warn!(error = %err, "assistant-directed ticket creation failed");
            }
        }
    }

    Ok(Json(ChatResponseDto { text, ticket }))
}
