use crate::resolve::EmptyPolicy;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_db: String,
    pub empty_policy: EmptyPolicy,
    /// Per-request timeout; `None` keeps the transport default.
    pub http_timeout_ms: Option<u64>,
    pub tracking_refresh_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("FLEETX_API_URL")
                .or_else(|_| std::env::var("VITE_API_URL"))
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            session_db: std::env::var("FLEETX_SESSION_DB").unwrap_or_else(|_| "./fleetx-session.sqlite".to_string()),
            empty_policy: std::env::var("FLEETX_EMPTY_POLICY").ok().map(|v| EmptyPolicy::parse(&v)).unwrap_or_default(),
            http_timeout_ms: std::env::var("FLEETX_HTTP_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()),
            tracking_refresh_secs: std::env::var("FLEETX_TRACKING_REFRESH_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_db: "./fleetx-session.sqlite".to_string(),
            empty_policy: EmptyPolicy::default(),
            http_timeout_ms: None,
            tracking_refresh_secs: 30,
        }
    }
}
