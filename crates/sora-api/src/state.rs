//! # Application State & Configuration
//!
//! Shared state for the API: configuration read once from the
//! environment at startup, plus the optional calculation service
//! client. The engines themselves are stateless pure functions — the
//! state carries no table data and no per-request mutability.

use std::sync::Arc;

use sora_calcsvc::CalcServiceClient;

/// Server configuration, collected from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to bind (`SORA_API_PORT`, default 8080).
    pub port: u16,
    /// Base URL of the external calculation service
    /// (`SORA_CALC_SERVICE_URL`, optional — SAIL delegation is off
    /// without it).
    pub calc_service_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            calc_service_url: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        let port = std::env::var("SORA_API_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);
        let calc_service_url = std::env::var("SORA_CALC_SERVICE_URL")
            .ok()
            .filter(|v| !v.is_empty());
        Self {
            port,
            calc_service_url,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Immutable server configuration.
    pub config: Arc<AppConfig>,
    /// Client for the external calculation service, when configured.
    pub calc_client: Option<Arc<CalcServiceClient>>,
}

impl AppState {
    /// Build state with default configuration and no remote client.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Build state from explicit configuration; wires the calculation
    /// service client when a URL is configured and valid.
    pub fn with_config(config: AppConfig) -> Self {
        let calc_client = config.calc_service_url.as_deref().and_then(|url| {
            match CalcServiceClient::new(url) {
                Ok(client) => Some(Arc::new(client)),
                Err(err) => {
                    tracing::error!(%url, %err, "invalid calculation service URL; delegation disabled");
                    None
                }
            }
        });
        Self {
            config: Arc::new(config),
            calc_client,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_has_no_remote() {
        let state = AppState::new();
        assert!(state.calc_client.is_none());
        assert_eq!(state.config.port, 8080);
    }

    #[test]
    fn test_invalid_calc_url_disables_delegation() {
        let state = AppState::with_config(AppConfig {
            port: 8080,
            calc_service_url: Some("not a url".to_string()),
        });
        assert!(state.calc_client.is_none());
    }

    #[test]
    fn test_valid_calc_url_wires_client() {
        let state = AppState::with_config(AppConfig {
            port: 8080,
            calc_service_url: Some("http://calcsvc:8000".to_string()),
        });
        assert!(state.calc_client.is_some());
    }
}
