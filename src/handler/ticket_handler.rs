// src/handler/ticket_handler.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::HeaderMap,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddleware,
    models::{
        ticketmodel::{TicketPriority, TicketStatus},
        usermodel::UserRole,
    },
    service::ticket_service::TicketChanges,
    AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketDto {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "Description is required"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTicketDto {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    #[validate(length(min = 1, max = 2000))]
    pub remark: Option<String>,
}

pub fn ticket_handler() -> Router {
    Router::new()
        .route("/", get(list_tickets).post(create_ticket))
        .route("/analytics", get(get_analytics))
        .route(
            "/:ticket_id",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
}

/// Best-effort client address for the audit trail.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
}

pub async fn create_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    headers: HeaderMap,
    Json(body): Json<CreateTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let ticket = app_state
        .ticket_service
        .create(&auth.user, &body.title, &body.description, client_ip(&headers))
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": ticket
    })))
}

pub async fn list_tickets(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let tickets = app_state
        .ticket_service
        .list(&auth.user)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": tickets
    })))
}

pub async fn get_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(_auth): Extension<JWTAuthMiddleware>,
    Path(ticket_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let detail = app_state
        .ticket_service
        .get(ticket_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": detail
    })))
}

pub async fn update_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(ticket_id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<UpdateTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // Priority and status edits belong to the resolution side of the desk
    if !auth.user.role.is_agent() {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let changes = TicketChanges {
        status: body.status,
        priority: body.priority,
        remark: body.remark,
    };

    let ticket = app_state
        .ticket_service
        .update(&auth.user, ticket_id, changes, client_ip(&headers))
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": ticket
    })))
}

pub async fn delete_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(ticket_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.role != UserRole::Admin {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    // Deletion is idempotent; a missing id is not an error
    app_state
        .ticket_service
        .delete(ticket_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Ticket deleted"
    })))
}

pub async fn get_analytics(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.role != UserRole::Admin {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let data = app_state
        .analytics_service
        .dashboard()
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": data
    })))
}
