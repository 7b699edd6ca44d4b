// service/google_oauth.rs
use serde::Deserialize;
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::Config;

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub email_verified: bool,
}

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("Google OAuth is not configured")]
    NotConfigured,

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("CSRF validation error: {0}")]
    CsrfValidation(String),
}

pub struct GoogleAuthService {
    client_id: String,
    client_secret: String,
    redirect_url: String,
    // CSRF states with their creation instant; entries expire after 5 minutes
    csrf_states: Arc<Mutex<HashMap<String, Instant>>>,
}

impl GoogleAuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_url: config.google_redirect_url.clone(),
            csrf_states: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    pub async fn store_csrf_state(&self, state: String) {
        let mut states = self.csrf_states.lock().await;
        states.insert(state, Instant::now());

        let now = Instant::now();
        states.retain(|_, created_at| now.duration_since(*created_at) < Duration::from_secs(300));
    }

    pub async fn validate_csrf_state(&self, state: &str) -> Result<(), OAuthError> {
        let mut states = self.csrf_states.lock().await;

        if let Some(created_at) = states.remove(state) {
            if created_at.elapsed() < Duration::from_secs(300) {
                Ok(())
            } else {
                Err(OAuthError::CsrfValidation("CSRF token expired".to_string()))
            }
        } else {
            Err(OAuthError::CsrfValidation("Invalid CSRF token".to_string()))
        }
    }

    pub fn get_authorization_url(&self, state: &str) -> String {
        format!(
            "https://accounts.google.com/o/oauth2/v2/auth?\
             client_id={}&\
             response_type=code&\
             scope=openid%20email%20profile&\
             redirect_uri={}&\
             state={}&\
             access_type=offline",
            self.client_id,
            urlencoding::encode(&self.redirect_url),
            urlencoding::encode(state)
        )
    }

    pub async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        if !self.is_configured() {
            return Err(OAuthError::NotConfigured);
        }

        let client = reqwest::Client::new();

        let params = [
            ("code", code),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_uri", &self.redirect_url),
            ("grant_type", "authorization_code"),
        ];

        let response = client
            .post("https://oauth2.googleapis.com/token")
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(OAuthError::TokenExchange(format!(
                "Token exchange failed: HTTP {} - {}",
                status, error_text
            )));
        }

        let token_response: Value = response.json().await?;

        let access_token = token_response["access_token"]
            .as_str()
            .ok_or_else(|| {
                OAuthError::TokenExchange("Access token missing from response".to_string())
            })?
            .to_string();

        Ok(access_token)
    }

    pub async fn get_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, OAuthError> {
        let client = reqwest::Client::new();
        let response = client
            .get("https://www.googleapis.com/oauth2/v3/userinfo")
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OAuthError::TokenExchange(format!(
                "Failed to fetch user info: {} - {}",
                status, error_text
            )));
        }

        let user_info = response.json().await?;
        Ok(user_info)
    }
}
