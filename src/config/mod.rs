use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration key: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Key/value configuration source
///
/// A snapshot of the process environment, taken after `.env` (if any) has been
/// loaded. Values set later through [`ConfigService::set`] override it.
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Empty source, used by tests and embedders.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }

        let service = Self::new();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) -> &Self {
        self.config.insert(key.to_string(), value.to_string());
        self
    }

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Typed settings for the HTTP service
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Accepted bearer tokens; never empty.
    pub auth_tokens: Vec<String>,
    pub database_url: Option<String>,
    pub init_timeout: Duration,
    /// `None` allows any origin.
    pub cors_allow_origin: Option<String>,
}

impl AppConfig {
    pub const DEFAULT_HOST: &'static str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8000;
    pub const DEFAULT_INIT_TIMEOUT_SECS: u64 = 30;

    pub fn from_service(config: &ConfigService) -> Result<Self, ConfigError> {
        let auth_tokens: Vec<String> = config
            .get("AUTH_TOKENS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(String::from)
            .collect();
        if auth_tokens.is_empty() {
            return Err(ConfigError::Missing("AUTH_TOKENS"));
        }

        let cors_allow_origin = match config.get_or("CORS_ALLOW_ORIGIN", "*").trim() {
            "*" | "" => None,
            origin => Some(origin.to_string()),
        };

        Ok(Self {
            host: config.get_or("HOST", Self::DEFAULT_HOST),
            port: config.parse_or("PORT", Self::DEFAULT_PORT)?,
            auth_tokens,
            database_url: config.get("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            init_timeout: Duration::from_secs(
                config.parse_or("INIT_TIMEOUT_SECS", Self::DEFAULT_INIT_TIMEOUT_SECS)?,
            ),
            cors_allow_origin,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
