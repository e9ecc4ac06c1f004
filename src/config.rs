// Provider configuration: where the travel-data provider lives and how we authenticate with it

use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://test.api.amadeus.com";
pub const DEFAULT_TOKEN_BUFFER_SECONDS: i64 = 300;

pub const ENV_API_BASE: &str = "AMADEUS_API_BASE";
pub const ENV_CLIENT_ID: &str = "AMADEUS_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "AMADEUS_CLIENT_SECRET";
pub const ENV_TOKEN_BUFFER: &str = "AMADEUS_TOKEN_BUFFER_SECONDS";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Provider credentials are not configured")]
    MissingCredentials,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

#[derive(Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    // Subtracted from the provider's expires_in so a token never expires mid-flight
    pub token_refresh_buffer_secs: i64,
    pub auth_timeout: Duration,
    pub lookup_timeout: Duration,
    pub search_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            client_id: None,
            client_secret: None,
            token_refresh_buffer_secs: DEFAULT_TOKEN_BUFFER_SECONDS,
            auth_timeout: Duration::from_secs(20),
            lookup_timeout: Duration::from_secs(20),
            search_timeout: Duration::from_secs(30),
        }
    }
}

// Never print the secret
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("token_refresh_buffer_secs", &self.token_refresh_buffer_secs)
            .field("auth_timeout", &self.auth_timeout)
            .field("lookup_timeout", &self.lookup_timeout)
            .field("search_timeout", &self.search_timeout)
            .finish()
    }
}

impl ProviderConfig {
    // Load from the process environment, reading a .env file first when one exists
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url;
        }
        config.client_id = lookup(ENV_CLIENT_ID);
        config.client_secret = lookup(ENV_CLIENT_SECRET);

        if let Some(raw) = lookup(ENV_TOKEN_BUFFER) {
            config.token_refresh_buffer_secs =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TOKEN_BUFFER.to_string(),
                    value: raw.clone(),
                })?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn with_token_refresh_buffer(mut self, seconds: i64) -> Self {
        self.token_refresh_buffer_secs = seconds;
        self
    }

    // Empty strings count as absent
    pub fn credentials(&self) -> Result<(&str, &str), ConfigError> {
        let id = self.client_id.as_deref().filter(|v| !v.is_empty());
        let secret = self.client_secret.as_deref().filter(|v| !v.is_empty());
        match (id, secret) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    // One client per search; dropping it releases its connections
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))
    }
}
