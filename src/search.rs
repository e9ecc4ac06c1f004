// Search orchestration: token -> both locations (concurrently) -> offers -> enrichment

use crate::config::ProviderConfig;
use crate::enrich::{enrich, EnrichedOffer};
use crate::error::SearchError;
use crate::location::LocationResolver;
use crate::offers::OfferFetcher;
use crate::token::TokenManager;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

// Immutable input to a single search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub travel_class: Option<String>,
    #[serde(default)]
    pub non_stop: Option<bool>,
}

impl SearchCriteria {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: NaiveDate,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_date,
            return_date: None,
            max_price: None,
            currency_code: None,
            travel_class: None,
            non_stop: None,
        }
    }

    pub fn with_return_date(mut self, return_date: NaiveDate) -> Self {
        self.return_date = Some(return_date);
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn with_currency_code(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = Some(currency_code.into());
        self
    }

    pub fn with_travel_class(mut self, travel_class: impl Into<String>) -> Self {
        self.travel_class = Some(travel_class.into());
        self
    }

    pub fn with_non_stop(mut self, non_stop: bool) -> Self {
        self.non_stop = Some(non_stop);
        self
    }

    pub fn is_round_trip(&self) -> bool {
        self.return_date.is_some()
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.origin.trim().is_empty() {
            return Err(SearchError::InvalidCriteria("origin is empty".to_string()));
        }
        if self.destination.trim().is_empty() {
            return Err(SearchError::InvalidCriteria(
                "destination is empty".to_string(),
            ));
        }
        if let Some(price) = self.max_price {
            if !price.is_finite() || price <= 0.0 {
                return Err(SearchError::InvalidCriteria(format!(
                    "maxPrice must be positive, got {}",
                    price
                )));
            }
        }
        if let Some(currency) = &self.currency_code {
            if currency.chars().count() != 3 {
                return Err(SearchError::InvalidCriteria(format!(
                    "currencyCode must have 3 characters, got {:?}",
                    currency
                )));
            }
        }
        if let Some(return_date) = self.return_date {
            if return_date < self.departure_date {
                return Err(SearchError::InvalidCriteria(format!(
                    "returnDate {} is before departureDate {}",
                    return_date, self.departure_date
                )));
            }
        }
        Ok(())
    }
}

// What an endpoint or agent tool depends on
#[async_trait]
pub trait FlightSearch: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<EnrichedOffer>, SearchError>;
}

pub struct SearchOrchestrator {
    config: ProviderConfig,
    tokens: Arc<TokenManager>,
    resolver: LocationResolver,
    fetcher: OfferFetcher,
}

impl SearchOrchestrator {
    pub fn new(config: ProviderConfig) -> Self {
        let tokens = Arc::new(TokenManager::new(config.clone()));
        Self::with_token_manager(config, tokens)
    }

    // Share one token cache between several orchestrators
    pub fn with_token_manager(config: ProviderConfig, tokens: Arc<TokenManager>) -> Self {
        Self {
            resolver: LocationResolver::new(&config),
            fetcher: OfferFetcher::new(&config),
            config,
            tokens,
        }
    }

    pub fn from_env() -> Result<Self, SearchError> {
        Ok(Self::new(ProviderConfig::from_env()?))
    }

    pub fn token_manager(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    // All or nothing: any stage failure aborts the rest of the pipeline
    #[instrument(
        skip(self, criteria),
        fields(origin = %criteria.origin, destination = %criteria.destination)
    )]
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<EnrichedOffer>, SearchError> {
        criteria.validate()?;

        // Scoped to this search, released on every exit path when it drops
        let client = self.config.http_client()?;

        let token = self.tokens.get_token(&client).await?;

        // First failure wins; the other lookup is dropped
        let (origin, destination) = futures::try_join!(
            self.resolver.resolve(&client, &criteria.origin, &token),
            self.resolver.resolve(&client, &criteria.destination, &token),
        )?;

        let fetched = self
            .fetcher
            .fetch(&client, &origin, &destination, criteria, &token)
            .await?;

        let offers = enrich(fetched.offers, &fetched.dictionaries.carriers());
        info!(
            "Found {} offers from {} to {}",
            offers.len(),
            origin,
            destination
        );
        Ok(offers)
    }
}

#[async_trait]
impl FlightSearch for SearchOrchestrator {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<EnrichedOffer>, SearchError> {
        SearchOrchestrator::search(self, criteria).await
    }
}
