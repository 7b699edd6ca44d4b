// config.rs
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    // Google OAuth configuration
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_url: String,
    // Assistant (text-completion) configuration
    pub gemini_api_key: Option<String>,
    pub ai_timeout_secs: u64,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let jwt_maxage = std::env::var("JWT_MAXAGE").expect("JWT_MAXAGE must be set");
        let app_url =
            std::env::var("APP_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);

        // OAuth configuration (with defaults so the server can boot without it)
        let google_client_id =
            std::env::var("GOOGLE_CLIENT_ID").unwrap_or_else(|_| "".to_string());
        let google_client_secret =
            std::env::var("GOOGLE_CLIENT_SECRET").unwrap_or_else(|_| "".to_string());
        let google_redirect_url = std::env::var("GOOGLE_REDIRECT_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}/api/oauth/google/callback", port));

        // Assistant configuration; a missing key means the local responder is used
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let ai_timeout_secs = std::env::var("AI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(15);

        Config {
            database_url,
            app_url,
            jwt_secret,
            jwt_maxage: jwt_maxage.parse::<i64>().unwrap(),
            port,
            google_client_id,
            google_client_secret,
            google_redirect_url,
            gemini_api_key,
            ai_timeout_secs,
        }
    }
}
