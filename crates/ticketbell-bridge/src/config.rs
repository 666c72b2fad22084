use serde::{Deserialize, Serialize};

/// Connection settings for the booking backend's notifications API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin of the backend, e.g. `http://localhost:8080`. The notifications
    /// API lives under `/api/notifications` below it.
    pub base_url: String,
    /// Bearer token sent with every request, if any.
    pub access_token: Option<String>,
    /// Upper bound for a single request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            access_token: None,
            request_timeout_secs: 30,
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// How to reach the notifications API.
    pub api: ApiConfig,
}
