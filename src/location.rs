// Free-text place name -> provider location code

use crate::config::ProviderConfig;
use crate::error::SearchError;
use crate::provider::LocationResponse;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

pub const LOCATIONS_PATH: &str = "/v1/reference-data/locations";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationCode(String);

impl LocationCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct LocationResolver {
    url: String,
    timeout: Duration,
}

impl LocationResolver {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            url: config.endpoint(LOCATIONS_PATH),
            timeout: config.lookup_timeout,
        }
    }

    // Several matches: the provider's first entry wins. Callers who need a different one
    // must pass a more specific name.
    pub async fn resolve(
        &self,
        client: &reqwest::Client,
        place: &str,
        token: &str,
    ) -> Result<LocationCode, SearchError> {
        let resolution_error = |reason: String| SearchError::Resolution {
            place: place.to_string(),
            reason,
        };

        let response = client
            .get(&self.url)
            .query(&[("subType", "CITY"), ("keyword", place)])
            .bearer_auth(token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| resolution_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Location lookup for {} rejected with {}: {}", place, status, body);
            return Err(resolution_error(format!("provider returned {}", status)));
        }

        let payload: LocationResponse = response
            .json()
            .await
            .map_err(|e| resolution_error(format!("malformed location response: {}", e)))?;

        let first = payload
            .into_matches()
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::NotFound {
                place: place.to_string(),
            })?;

        let code = first
            .iata_code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| resolution_error("first match has no location code".to_string()))?;

        debug!("Resolved {} to {}", place, code);
        Ok(LocationCode(code))
    }
}
