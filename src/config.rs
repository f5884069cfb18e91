use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url_development: String,
    pub api_base_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub network_timeout_seconds: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url_development: "http://localhost:5001/api".to_string(),
            api_base_url_production: "http://localhost:5001/api".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
            network_timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    /// Loads configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url_development: option_env!("API_BASE_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url_development),
            api_base_url_production: option_env!("API_BASE_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url_production),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            log_level: option_env!("LOG_LEVEL")
                .map(str::to_string)
                .unwrap_or(defaults.log_level),
            network_timeout_seconds: option_env!("NETWORK_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.network_timeout_seconds),
        }
    }

    /// API base URL for the current environment, without trailing slash
    pub fn api_base_url(&self) -> &str {
        let url = match self.environment.as_str() {
            "production" => &self.api_base_url_production,
            _ => &self.api_base_url_development,
        };
        url.trim_end_matches('/')
    }

    /// Log level for wasm-logger. Logging disabled still lets warnings through.
    pub fn log_level(&self) -> log::Level {
        if !self.enable_logging {
            return log::Level::Warn;
        }
        match self.log_level.to_ascii_lowercase().as_str() {
            "error" => log::Level::Error,
            "warn" => log::Level::Warn,
            "debug" => log::Level::Debug,
            "trace" => log::Level::Trace,
            _ => log::Level::Info,
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_environment_selects_production_url() {
        let config = AppConfig {
            api_base_url_production: "https://hr.example.com/api/".to_string(),
            environment: "production".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.api_base_url(), "https://hr.example.com/api");
    }

    #[test]
    fn unknown_environment_falls_back_to_development() {
        let config = AppConfig {
            environment: "staging".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.api_base_url(), "http://localhost:5001/api");
    }

    #[test]
    fn disabled_logging_keeps_warnings() {
        let config = AppConfig {
            enable_logging: false,
            log_level: "debug".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Warn);

        let verbose = AppConfig {
            log_level: "DEBUG".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(verbose.log_level(), log::Level::Debug);
    }
}
