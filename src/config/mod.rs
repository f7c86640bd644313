use std::env;
use std::time::Duration;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub api_service_url: String,
    pub api_service_token: Option<String>,
    pub api_request_timeout: Duration,
    pub azimuth_epsilon: f64,
    pub fallback_azimuth: Option<f64>,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        let token = get_env("API_SERVICE_TOKEN", "");
        Self {
            listen_addr: get_env("LISTEN_ADDR", "0.0.0.0:8088"),
            api_service_url: get_env("API_SERVICE_URL", "http://localhost:8080/apiservice"),
            api_service_token: (!token.is_empty()).then_some(token),
            api_request_timeout: Duration::from_secs(
                get_env("API_REQUEST_TIMEOUT_SECS", "30").parse().unwrap_or(30),
            ),
            azimuth_epsilon: get_env("AZIMUTH_EPSILON", "0.2")
                .parse()
                .unwrap_or(crate::azimuth::AZIMUTH_EPSILON),
            fallback_azimuth: get_env("AZIMUTH_FALLBACK", "").parse().ok(),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
