// Flight search orchestration over a third-party travel-data provider:
// OAuth token caching, location resolution, offer search and carrier enrichment

pub mod config;
pub mod enrich;
pub mod error;
pub mod location;
pub mod offers;
pub mod provider;
pub mod search;
pub mod token;

#[cfg(test)]
pub(crate) mod mock_provider;

// Re-export key types for convenience
pub use config::{ConfigError, ProviderConfig};
pub use enrich::{enrich, EnrichedOffer};
pub use error::SearchError;
pub use location::{LocationCode, LocationResolver};
pub use offers::{FetchedOffers, OfferFetcher};
pub use provider::{CarrierDictionary, Dictionaries, RawOffer};
pub use search::{FlightSearch, SearchCriteria, SearchOrchestrator};
pub use token::{AccessToken, TokenManager};
