// Stub travel-data provider for tests, backed by wiremock
// Mounted expectations (`expect`) are verified when the server drops at the end of each test

use crate::config::ProviderConfig;
use crate::location::LOCATIONS_PATH;
use crate::offers::FLIGHT_OFFERS_PATH;
use crate::token::TOKEN_PATH;
use serde_json::{json, Value};
use wiremock::matchers::{any, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "tok123";
const TEST_BEARER: &str = "Bearer tok123";
pub const TEST_CLIENT_ID: &str = "test-client";
pub const TEST_CLIENT_SECRET: &str = "test-secret";

pub struct MockProvider {
    server: MockServer,
}

impl MockProvider {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn config(&self) -> ProviderConfig {
        ProviderConfig::default()
            .with_base_url(self.uri())
            .with_credentials(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
    }

    pub async fn expect_no_requests(&self) {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    pub async fn expect_token(&self, token: &str, expires_in: i64, times: u64) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains(format!("client_id={}", TEST_CLIENT_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "amadeusOAuth2Token",
                "access_token": token,
                "expires_in": expires_in,
                "state": "approved"
            })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub async fn respond_token(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn reject_token(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    pub async fn expect_location(&self, keyword: &str, code: &str, times: u64) {
        self.location_mock(keyword)
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"iataCode": code, "name": keyword.to_uppercase(), "subType": "CITY"}]
            })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub async fn respond_location(&self, keyword: &str, body: Value) {
        self.location_mock(keyword)
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn reject_location(&self, keyword: &str, status: u16) {
        self.location_mock(keyword)
            .respond_with(ResponseTemplate::new(status).set_body_string("lookup failed"))
            .mount(&self.server)
            .await;
    }

    fn location_mock(&self, keyword: &str) -> wiremock::MockBuilder {
        Mock::given(method("GET"))
            .and(path(LOCATIONS_PATH))
            .and(query_param("subType", "CITY"))
            .and(query_param("keyword", keyword))
            .and(header("Authorization", TEST_BEARER))
    }

    // `params` are extra query parameters the request must carry
    pub async fn respond_offers(&self, params: &[(&str, &str)], body: Value, times: u64) {
        let mut builder = Mock::given(method("GET"))
            .and(path(FLIGHT_OFFERS_PATH))
            .and(query_param("adults", "1"))
            .and(query_param("max", "5"))
            .and(header("Authorization", TEST_BEARER));
        for (key, value) in params {
            builder = builder.and(query_param(*key, *value));
        }

        builder
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub async fn reject_offers(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(FLIGHT_OFFERS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }
}
