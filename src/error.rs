// Error types for the search pipeline
use crate::config::ConfigError;
use thiserror::Error;

// Every collaborator failure is wrapped into one of these kinds; nothing is retried
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid search criteria: {0}")]
    InvalidCriteria(String),

    #[error("Unable to fetch access token: {0}")]
    Auth(String),

    #[error("Token response was missing an access token")]
    MissingAccessToken,

    #[error("Failed to resolve location code for {place}: {reason}")]
    Resolution { place: String, reason: String },

    #[error("No location matches were found for {place}")]
    NotFound { place: String },

    #[error("Flight search failed: {0}")]
    Fetch(String),
}

impl SearchError {
    // Failures caused by the provider rather than by local setup or input
    pub fn is_upstream(&self) -> bool {
        !matches!(self, SearchError::Config(_) | SearchError::InvalidCriteria(_))
    }
}
