use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result, truncate_body};
use crate::model::{Coordinate, PlaceSuggestion};

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Inputs shorter than this never hit the network.
const MIN_QUERY_LEN: usize = 2;

/// Default cap on autocomplete suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Resolves free-text place names to coordinates and name suggestions.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Resolve a place name to coordinates, picking the first provider match.
    async fn resolve(&self, place_name: &str) -> Result<Coordinate>;

    /// Ranked name suggestions for a partial input. Never fails: suggestion
    /// lookups are a non-critical affordance, so failures are swallowed.
    async fn suggest(&self, partial: &str, limit: usize) -> Vec<PlaceSuggestion>;
}

/// Open-Meteo geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(GEOCODING_URL)
    }

    /// Use a non-default endpoint, e.g. a mock server in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    async fn search(&self, name: &str) -> Result<SearchResponse> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[("name", name)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(Error::bad_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::MalformedData(format!(
                "geocoding response: {e} (body: {})",
                truncate_body(&body)
            ))
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

#[async_trait]
impl Geocoder for GeocodingClient {
    async fn resolve(&self, place_name: &str) -> Result<Coordinate> {
        let response = self.search(place_name).await?;

        let first = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(place_name.to_string()))?;

        Ok(Coordinate {
            latitude: first.latitude,
            longitude: first.longitude,
        })
    }

    async fn suggest(&self, partial: &str, limit: usize) -> Vec<PlaceSuggestion> {
        let partial = partial.trim();
        if partial.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        let response = match self.search(partial).await {
            Ok(r) => r,
            Err(err) => {
                log::debug!("suggestion lookup for '{partial}' failed: {err}");
                return Vec::new();
            }
        };

        // provider order, deduplicated by exact name
        let mut suggestions: Vec<PlaceSuggestion> = Vec::new();
        for result in response.results {
            if suggestions.len() >= limit {
                break;
            }
            if suggestions.iter().any(|s| s.display_name == result.name) {
                continue;
            }
            suggestions.push(PlaceSuggestion {
                display_name: result.name,
                country: result.country,
                region: result.admin1,
            });
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_search(server: &MockServer, body: &str) {
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(server)
            .await;
    }

    fn client_for(server: &MockServer) -> GeocodingClient {
        GeocodingClient::with_base_url(format!("{}/v1/search", server.uri())).unwrap()
    }

    const TWO_RESULTS: &str = r#"{"results": [
        {"name": "Windhoek", "latitude": -22.57, "longitude": 17.08, "country": "Namibia", "admin1": "Khomas"},
        {"name": "Windhoek East", "latitude": -22.58, "longitude": 17.1, "country": "Namibia", "admin1": "Khomas"}
    ]}"#;

    #[tokio::test]
    async fn resolve_picks_first_match() {
        let server = MockServer::start().await;
        mock_search(&server, TWO_RESULTS).await;

        let coord = client_for(&server).resolve("Windhoek").await.unwrap();
        assert_eq!(coord.latitude, -22.57);
        assert_eq!(coord.longitude, 17.08);
    }

    #[tokio::test]
    async fn resolve_sends_place_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Windhoek"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(TWO_RESULTS, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).resolve("Windhoek").await.unwrap();
    }

    #[tokio::test]
    async fn resolve_not_found_on_empty_results() {
        let server = MockServer::start().await;
        mock_search(&server, r#"{"generationtime_ms": 0.5}"#).await;

        let err = client_for(&server).resolve("Nowhereville").await.unwrap_err();
        match err {
            Error::NotFound(place) => assert_eq!(place, "Nowhereville"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolve_transport_error_on_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = client_for(&server).resolve("Windhoek").await.unwrap_err();
        match err {
            Error::Transport { status, message } => {
                assert_eq!(status, Some(429));
                assert!(message.contains("rate limited"));
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolve_malformed_on_bad_body() {
        let server = MockServer::start().await;
        mock_search(&server, "<html>maintenance</html>").await;

        let err = client_for(&server).resolve("Windhoek").await.unwrap_err();
        assert!(matches!(err, Error::MalformedData(_)));
    }

    #[tokio::test]
    async fn short_input_suggests_nothing_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.suggest("a", DEFAULT_SUGGESTION_LIMIT).await.is_empty());
        assert!(client.suggest(" ", DEFAULT_SUGGESTION_LIMIT).await.is_empty());
        assert!(client.suggest("", DEFAULT_SUGGESTION_LIMIT).await.is_empty());
        // MockServer verifies expect(0) on drop
    }

    #[tokio::test]
    async fn suggest_dedupes_and_caps() {
        let server = MockServer::start().await;
        mock_search(
            &server,
            r#"{"results": [
                {"name": "Springfield", "latitude": 1.0, "longitude": 1.0, "country": "US", "admin1": "Illinois"},
                {"name": "Springfield", "latitude": 2.0, "longitude": 2.0, "country": "US", "admin1": "Missouri"},
                {"name": "Springdale", "latitude": 3.0, "longitude": 3.0, "country": "US", "admin1": "Arkansas"},
                {"name": "Springboro", "latitude": 4.0, "longitude": 4.0, "country": "US", "admin1": "Ohio"}
            ]}"#,
        )
        .await;

        let suggestions = client_for(&server).suggest("Spring", 2).await;
        let names: Vec<_> = suggestions.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(names, ["Springfield", "Springdale"]);
        assert_eq!(suggestions[0].region.as_deref(), Some("Illinois"));
    }

    #[tokio::test]
    async fn suggest_swallows_provider_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(client_for(&server).suggest("Spring", 5).await.is_empty());
    }
}
