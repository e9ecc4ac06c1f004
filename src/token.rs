// Access token lifecycle for the provider's OAuth client-credentials flow

use crate::config::ProviderConfig;
use crate::error::SearchError;
use crate::provider::TokenResponse;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

pub const TOKEN_PATH: &str = "/v1/security/oauth2/token";

// Upper bound on a provider-declared lifetime, keeps the expiry arithmetic in range
const MAX_TOKEN_LIFETIME_SECS: i64 = i32::MAX as i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.value.is_empty() && now < self.expires_at
    }
}

// Owns the single cached token. The (value, expiry) pair is swapped as one value under the
// lock; the lock is never held across a request, so concurrent callers may both refresh and
// the last writer wins.
pub struct TokenManager {
    config: ProviderConfig,
    cache: RwLock<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            cache: RwLock::new(None),
        }
    }

    pub async fn get_token(&self, client: &reqwest::Client) -> Result<String, SearchError> {
        let (client_id, client_secret) = self.config.credentials()?;

        let now = Utc::now();
        let cached = self.cache.read().clone();
        if let Some(token) = cached.filter(|t| t.is_valid_at(now)) {
            debug!("Reusing cached access token (expires at {})", token.expires_at);
            return Ok(token.value);
        }

        let token = self.request_token(client, client_id, client_secret, now).await?;
        let value = token.value.clone();
        *self.cache.write() = Some(token);
        Ok(value)
    }

    async fn request_token(
        &self,
        client: &reqwest::Client,
        client_id: &str,
        client_secret: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, SearchError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ];

        let response = client
            .post(self.config.endpoint(TOKEN_PATH))
            .form(&form)
            .timeout(self.config.auth_timeout)
            .send()
            .await
            .map_err(|e| SearchError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Token exchange rejected with {}: {}", status, body);
            return Err(SearchError::Auth(format!("provider returned {}", status)));
        }

        let payload: TokenResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Auth(format!("malformed token response: {}", e)))?;

        let value = payload
            .access_token
            .filter(|v| !v.is_empty())
            .ok_or(SearchError::MissingAccessToken)?;

        let expires_at = expiry_from(
            now,
            payload.expires_in.unwrap_or(0),
            self.config.token_refresh_buffer_secs,
        );
        info!("Obtained new access token, valid until {}", expires_at);

        Ok(AccessToken { value, expires_at })
    }

    pub fn cached(&self) -> Option<AccessToken> {
        self.cache.read().clone()
    }

    pub fn invalidate(&self) {
        *self.cache.write() = None;
    }
}

// now + max(0, expires_in - buffer)
pub fn expiry_from(now: DateTime<Utc>, expires_in: i64, buffer: i64) -> DateTime<Utc> {
    let lifetime = expires_in
        .saturating_sub(buffer)
        .clamp(0, MAX_TOKEN_LIFETIME_SECS);
    now + Duration::seconds(lifetime)
}
