// src/handler/google_oauth.rs
use std::sync::Arc;

use axum::{
    extract::Query,
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect},
    routing::get,
    Extension, Router,
};
use axum_extra::extract::cookie::Cookie;
use serde::Deserialize;

use crate::{
    db::userdb::UserExt,
    error::HttpError,
    utils::token,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: String,
    pub state: String,
}

pub fn oauth_handler() -> Router {
    Router::new()
        .route("/google", get(google_login))
        .route("/google/callback", get(google_callback))
}

pub async fn google_login(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    if !app_state.oauth_service.is_configured() {
        return Err(HttpError::server_error("Google OAuth is not configured"));
    }

    let state = uuid::Uuid::new_v4().to_string();
    app_state.oauth_service.store_csrf_state(state.clone()).await;

    let url = app_state.oauth_service.get_authorization_url(&state);

    Ok(Redirect::to(&url))
}

pub async fn google_callback(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<OAuthCallbackQuery>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .oauth_service
        .validate_csrf_state(&query.state)
        .await
        .map_err(|e| HttpError::unauthorized(e.to_string()))?;

    let access_token = app_state
        .oauth_service
        .exchange_code(&query.code)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user_info = app_state
        .oauth_service
        .get_user_info(&access_token)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Existing accounts are reused by email; first OAuth login provisions
    // a passwordless user row
    let existing = app_state
        .db_client
        .get_user(None, Some(&user_info.email))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = match existing {
        Some(user) => user,
        None => app_state
            .db_client
            .create_oauth_user(user_info.name, user_info.email, user_info.sub)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
    };

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage * 60);
    let cookie = Cookie::build(("token", token))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, cookie.to_string().parse().unwrap());

    let redirect = Redirect::to(&app_state.env.app_url);

    let mut response = redirect.into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}
