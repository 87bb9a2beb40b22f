use inkmath_core::InkError;
use serde::Deserialize;

/// inkmath runtime settings.
///
/// Everything is sourced from environment variables; there is no config
/// file. Secrets must pass `validate` before the server starts.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Environment mode ("dev" or "prod"); reported in health output
    pub env: String,
    /// Bearer secret expected on inbound requests
    pub auth_token: String,
    /// Gemini API key
    pub gemini_api_key: String,
    /// Gemini model name
    pub gemini_model: String,
    /// Log level when RUST_LOG is unset
    pub log_level: String,
    /// Directory for rolling NDJSON log files; console-only when unset
    pub log_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8900,
            env: "dev".to_string(),
            auth_token: String::new(),
            gemini_api_key: String::new(),
            gemini_model: "gemini-2.0-flash".to_string(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: std::env::var("INKMATH_BIND").unwrap_or(defaults.bind_address),
            port: std::env::var("INKMATH_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            env: std::env::var("INKMATH_ENV").unwrap_or(defaults.env),
            auth_token: std::env::var("INKMATH_AUTH_TOKEN").unwrap_or_default(),
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_dir: std::env::var("INKMATH_LOG_DIR").ok(),
        }
    }

    /// Reject settings that cannot serve requests.
    pub fn validate(&self) -> Result<(), InkError> {
        if self.auth_token.is_empty() {
            return Err(InkError::Config(
                "INKMATH_AUTH_TOKEN is not set".to_string(),
            ));
        }
        if self.gemini_api_key.is_empty() {
            return Err(InkError::Config("GEMINI_API_KEY is not set".to_string()));
        }
        Ok(())
    }

    /// Socket address string the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_target_dev_on_8900() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8900");
        assert_eq!(settings.env, "dev");
        assert_eq!(settings.gemini_model, "gemini-2.0-flash");
    }

    #[test]
    fn validate_rejects_missing_secrets() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_err());

        settings.auth_token = "secret".into();
        assert!(settings.validate().is_err());

        settings.gemini_api_key = "key".into();
        assert!(settings.validate().is_ok());
    }
}
