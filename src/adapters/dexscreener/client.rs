//! DexScreener HTTP client
//!
//! Public, unauthenticated endpoints only:
//! - `/token-profiles/latest/v1`, `/token-boosts/latest/v1`, `/token-boosts/top/v1`
//! - `/latest/dex/search?q=`
//! - `/tokens/v1/{chain}/{a,b,c}` (at most 30 addresses)
//!
//! No retries here. A failed request surfaces as `MarketDataError` and the
//! collector records it against the source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{parse_listings, parse_pairs, SearchResponse};
use crate::domain::{PairRecord, TokenIdentifier};
use crate::ports::{ListingFeed, MarketDataError, MarketDataPort, TokenListing, MAX_BATCH_SIZE};

pub const DEFAULT_BASE_URL: &str = "https://api.dexscreener.com";

/// Configuration for the DexScreenerClient
#[derive(Debug, Clone)]
pub struct DexScreenerConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl DexScreenerConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    config: DexScreenerConfig,
    http: Client,
}

impl DexScreenerClient {
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_config(DexScreenerConfig::default())
    }

    pub fn with_config(config: DexScreenerConfig) -> Result<Self, MarketDataError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| MarketDataError::Http(e.to_string()))?;

        Ok(Self { config, http })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn feed_path(feed: ListingFeed) -> &'static str {
        match feed {
            ListingFeed::LatestProfiles => "/token-profiles/latest/v1",
            ListingFeed::LatestBoosts => "/token-boosts/latest/v1",
            ListingFeed::TopBoosts => "/token-boosts/top/v1",
        }
    }

    fn token_pairs_path(chain_id: &str, addresses: &[TokenIdentifier]) -> String {
        let joined = addresses
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(",");
        format!("/tokens/v1/{}/{}", chain_id, joined)
    }

    /// GET `path` and decode the body, mapping status codes to errors
    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, MarketDataError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| MarketDataError::Http(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited);
        }
        if !status.is_success() {
            return Err(MarketDataError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MarketDataError::Parse(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl MarketDataPort for DexScreenerClient {
    async fn listings(&self, feed: ListingFeed) -> Result<Vec<TokenListing>, MarketDataError> {
        // A bare object is treated as a one-entry feed
        let body: Value = self.get_json(Self::feed_path(feed), &[]).await?;
        let entries = match body {
            Value::Array(items) => items,
            Value::Object(_) => vec![body],
            _ => Vec::new(),
        };
        Ok(parse_listings(entries))
    }

    async fn search_pairs(&self, query: &str) -> Result<Vec<PairRecord>, MarketDataError> {
        let response: SearchResponse = self
            .get_json("/latest/dex/search", &[("q", query)])
            .await?;
        Ok(parse_pairs(response.pairs.unwrap_or_default()))
    }

    async fn token_pairs(
        &self,
        chain_id: &str,
        addresses: &[TokenIdentifier],
    ) -> Result<Vec<PairRecord>, MarketDataError> {
        if addresses.is_empty() {
            return Ok(Vec::new());
        }
        if addresses.len() > MAX_BATCH_SIZE {
            return Err(MarketDataError::InvalidRequest(format!(
                "{} addresses exceeds batch limit of {}",
                addresses.len(),
                MAX_BATCH_SIZE
            )));
        }

        let path = Self::token_pairs_path(chain_id, addresses);
        let body: Value = self.get_json(&path, &[]).await?;
        match body {
            Value::Array(items) => Ok(parse_pairs(items)),
            Value::Null => Ok(Vec::new()),
            other => Err(MarketDataError::Parse(format!(
                "{}: expected array, got {}",
                path,
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http_stub::StubServer;

    const PAIR: &str = r#"[{"chainId":"solana","pairAddress":"P1","baseToken":{"address":"M1","symbol":"ONE"},"priceUsd":"0.5"}]"#;

    fn client(server: &StubServer) -> DexScreenerClient {
        DexScreenerClient::with_config(DexScreenerConfig::new(server.url(), Duration::from_secs(5)))
            .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = DexScreenerClient::new();
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = DexScreenerConfig::new("http://localhost:8080/", Duration::from_secs(5));
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_feed_paths() {
        assert_eq!(
            DexScreenerClient::feed_path(ListingFeed::LatestProfiles),
            "/token-profiles/latest/v1"
        );
        assert_eq!(
            DexScreenerClient::feed_path(ListingFeed::LatestBoosts),
            "/token-boosts/latest/v1"
        );
        assert_eq!(DexScreenerClient::feed_path(ListingFeed::TopBoosts), "/token-boosts/top/v1");
    }

    #[test]
    fn test_token_pairs_path_joins_addresses() {
        let addresses = vec![TokenIdentifier::new("aaa"), TokenIdentifier::new("bbb")];
        assert_eq!(
            DexScreenerClient::token_pairs_path("solana", &addresses),
            "/tokens/v1/solana/aaa,bbb"
        );
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_request() {
        // Unroutable base url: any request would fail
        let client = DexScreenerClient::with_config(DexScreenerConfig::new(
            "http://127.0.0.1:9",
            Duration::from_millis(50),
        ))
        .unwrap();
        let pairs = client.token_pairs("solana", &[]).await.unwrap();
        assert!(pairs.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_batch_rejected_before_request() {
        let client = DexScreenerClient::new().unwrap();
        let addresses: Vec<TokenIdentifier> =
            (0..31).map(|i| TokenIdentifier::new(format!("t{}", i))).collect();

        let result = client.token_pairs("solana", &addresses).await;
        assert!(matches!(result, Err(MarketDataError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_rate_limited() {
        let server = StubServer::start(vec![(429, r#"{"error":"slow down"}"#)]).await;
        let result = client(&server).search_pairs("SOL").await;
        assert!(matches!(result, Err(MarketDataError::RateLimited)));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let server = StubServer::start(vec![(503, "{}")]).await;
        let result = client(&server).search_pairs("SOL").await;

        match result {
            Err(MarketDataError::Status { endpoint, status }) => {
                assert_eq!(endpoint, "/latest/dex/search");
                assert_eq!(status, 503);
            }
            other => panic!("expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_sends_query_and_parses_pairs() {
        let server = StubServer::start(vec![(200, r#"{"schemaVersion":"1.0.0","pairs":[{"chainId":"solana","pairAddress":"P1","baseToken":{"address":"M1"}}]}"#)]).await;
        let pairs = client(&server).search_pairs("raydium solana").await.unwrap();

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].pair_identity.as_str(), "P1");
        assert!(server.requests()[0]
            .request_line
            .starts_with("GET /latest/dex/search?q=raydium+solana "));
    }

    #[tokio::test]
    async fn test_null_search_pairs_is_empty() {
        let server = StubServer::start(vec![(200, r#"{"schemaVersion":"1.0.0","pairs":null}"#)]).await;
        let pairs = client(&server).search_pairs("SOL").await.unwrap();
        assert!(pairs.is_empty());
    }

    #[tokio::test]
    async fn test_token_pairs_object_body_is_parse_error() {
        let server = StubServer::start(vec![(200, r#"{"pairs":[]}"#)]).await;
        let result = client(&server)
            .token_pairs("solana", &[TokenIdentifier::new("M1")])
            .await;
        assert!(matches!(result, Err(MarketDataError::Parse(_))));
    }

    #[tokio::test]
    async fn test_token_pairs_array_body() {
        let server = StubServer::start(vec![(200, PAIR)]).await;
        let addresses = vec![TokenIdentifier::new("M1"), TokenIdentifier::new("M2")];
        let pairs = client(&server).token_pairs("solana", &addresses).await.unwrap();

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].price_usd, Some(0.5));
        assert!(server.requests()[0]
            .request_line
            .starts_with("GET /tokens/v1/solana/M1,M2 "));
    }

    #[tokio::test]
    async fn test_listing_feed_accepts_single_object() {
        let server = StubServer::start(vec![(200, r#"{"chainId":"solana","tokenAddress":"M9"}"#)]).await;
        let listings = client(&server).listings(ListingFeed::TopBoosts).await.unwrap();

        assert_eq!(listings, vec![TokenListing::new("solana", "M9")]);
        assert!(server.requests()[0]
            .request_line
            .starts_with("GET /token-boosts/top/v1 "));
    }
}
