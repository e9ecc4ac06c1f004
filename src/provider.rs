// Data structures for the provider's JSON payloads
// Only the fields the pipeline reads are typed; everything else is carried through untouched

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

// POST /v1/security/oauth2/token
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

// GET /v1/reference-data/locations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationResponse {
    // Missing and `null` both mean no matches
    #[serde(default)]
    pub data: Option<Vec<LocationMatch>>,
}

impl LocationResponse {
    pub fn into_matches(self) -> Vec<LocationMatch> {
        self.data.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMatch {
    #[serde(default)]
    pub iata_code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sub_type: Option<String>,
}

// GET /v2/shopping/flight-offers
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default)]
    pub data: Vec<RawOffer>,
    #[serde(default)]
    pub dictionaries: Dictionaries,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Dictionaries {
    // The provider sometimes sends `null` here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carriers: Option<CarrierDictionary>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Dictionaries {
    pub fn carriers(&self) -> CarrierDictionary {
        self.carriers.clone().unwrap_or_default()
    }
}

// Carrier code -> display name, scoped to one offer-fetch response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CarrierDictionary(HashMap<String, String>);

impl CarrierDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.0.insert(code.into(), name.into());
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CarrierDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// A priced, bookable offer as the provider sent it
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawOffer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itineraries: Option<Vec<Itinerary>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Itinerary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Segment {
    #[serde(
        rename = "carrierCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub carrier_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawOffer {
    // itineraries[0].segments[0].carrierCode, if the offer has one
    pub fn first_carrier_code(&self) -> Option<&str> {
        self.itineraries
            .as_deref()?
            .first()?
            .segments
            .as_deref()?
            .first()?
            .carrier_code
            .as_deref()
    }
}
