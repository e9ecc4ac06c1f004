// Flight-offer search: request assembly and retrieval

use crate::config::ProviderConfig;
use crate::error::SearchError;
use crate::location::LocationCode;
use crate::provider::{Dictionaries, FlightOffersResponse, RawOffer};
use crate::search::SearchCriteria;
use std::time::Duration;
use tracing::{debug, warn};

pub const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";

// Fixed policy, not exposed to callers
pub const ADULTS: u32 = 1;
pub const MAX_RESULTS: u32 = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedOffers {
    pub offers: Vec<RawOffer>,
    pub dictionaries: Dictionaries,
}

#[derive(Debug, Clone)]
pub struct OfferFetcher {
    url: String,
    timeout: Duration,
}

impl OfferFetcher {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            url: config.endpoint(FLIGHT_OFFERS_PATH),
            timeout: config.search_timeout,
        }
    }

    pub async fn fetch(
        &self,
        client: &reqwest::Client,
        origin: &LocationCode,
        destination: &LocationCode,
        criteria: &SearchCriteria,
        token: &str,
    ) -> Result<FetchedOffers, SearchError> {
        let params = build_query(origin, destination, criteria);
        debug!("Searching flight offers with {:?}", params);

        let response = client
            .get(&self.url)
            .query(&params)
            .bearer_auth(token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SearchError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The raw body is the only useful diagnostic the provider gives us
            let detail = response
                .text()
                .await
                .unwrap_or_else(|e| format!("{} (body unreadable: {})", status, e));
            warn!("Flight offer search rejected with {}: {}", status, detail);
            return Err(SearchError::Fetch(detail));
        }

        let payload: FlightOffersResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Fetch(format!("malformed offers response: {}", e)))?;

        Ok(FetchedOffers {
            offers: payload.data,
            dictionaries: payload.dictionaries,
        })
    }
}

// Optional parameters are left out entirely when absent
pub fn build_query(
    origin: &LocationCode,
    destination: &LocationCode,
    criteria: &SearchCriteria,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("originLocationCode", origin.to_string()),
        ("destinationLocationCode", destination.to_string()),
        (
            "departureDate",
            criteria.departure_date.format(DATE_FORMAT).to_string(),
        ),
        ("adults", ADULTS.to_string()),
        ("max", MAX_RESULTS.to_string()),
    ];

    if let Some(return_date) = criteria.return_date {
        params.push(("returnDate", return_date.format(DATE_FORMAT).to_string()));
    }
    if let Some(max_price) = criteria.max_price {
        params.push(("maxPrice", format_price(max_price)));
    }
    if let Some(currency) = non_empty(&criteria.currency_code) {
        params.push(("currencyCode", currency.to_uppercase()));
    }
    if let Some(travel_class) = non_empty(&criteria.travel_class) {
        params.push(("travelClass", travel_class.to_uppercase()));
    }
    if let Some(non_stop) = criteria.non_stop {
        params.push(("nonStop", non_stop.to_string()));
    }

    params
}

// The provider filters on whole prices; ties go to the even neighbour
pub fn format_price(price: f64) -> String {
    format!("{}", price.round_ties_even() as i64)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
