// Configuration constants for the server

use std::time::Duration;

use tts_core::DEFAULT_CHUNK_SIZE;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub default_voice: String,
    pub chunk_size: usize,
    pub max_text_length: usize,
    pub rate_limit_per_minute: u32,
    pub request_timeout_secs: u64,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            default_voice: "en".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_text_length: 5000,
            rate_limit_per_minute: 60,
            request_timeout_secs: 60,
            cors_allowed_origins: None,
            static_dir: "static".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let default_voice = std::env::var("DEFAULT_VOICE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.default_voice);

        let chunk_size = std::env::var("CHUNK_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &usize| *v > 0)
            .unwrap_or(defaults.chunk_size);

        let max_text_length = std::env::var("MAX_TEXT_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_text_length);

        let rate_limit_per_minute = std::env::var("RATE_LIMIT_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.rate_limit_per_minute);

        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.static_dir);

        Self {
            port,
            default_voice,
            chunk_size,
            max_text_length,
            rate_limit_per_minute,
            request_timeout_secs,
            cors_allowed_origins,
            static_dir,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_voice, "en");
        assert_eq!(config.chunk_size, 8192);
        assert_eq!(config.max_text_length, 5000);
    }
}
