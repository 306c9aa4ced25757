//! @acp:module "HTTP API Client"
//! @acp:summary "reqwest-backed implementation of the scenario backend"
//! @acp:domain client
//! @acp:layer service

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{HealthStatus, LookupEntry, ScenarioRequest, ScenarioResponse};
use super::{ScenarioBackend, GENERATE_PATH, HEALTH_PATH, REGIONS_PATH, TOPICS_PATH};
use crate::config::Config;
use crate::error::{ApiError, ScenarioError};

/// HTTP client for the scenario backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// @acp:summary "Build a client from resolved configuration"
    pub fn new(config: &Config) -> crate::Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ScenarioError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Send, then classify: transport failure, non-2xx, or undecodable body
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        let started = Instant::now();
        debug!("→ {}", path);

        let response = request.send().await.map_err(|e| {
            warn!("{} failed before a response arrived: {}", path, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            warn!("{} body read failed: {}", path, e);
            ApiError::from(e)
        })?;

        debug!(
            "← {} {} ({} bytes, {} ms)",
            path,
            status.as_u16(),
            bytes.len(),
            started.elapsed().as_millis()
        );

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("{} returned an unexpected body: {}", path, e);
            ApiError::Decode(e.to_string())
        })
    }
}

/// Base URL must be absolute; a trailing slash is added so `join` appends
fn parse_base_url(raw: &str) -> crate::Result<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized).map_err(|e| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "not a base URL".to_string(),
        }
        .into());
    }
    Ok(url)
}

#[async_trait]
impl ScenarioBackend for ApiClient {
    async fn generate_scenario(
        &self,
        request: &ScenarioRequest,
    ) -> Result<ScenarioResponse, ApiError> {
        let url = self.endpoint(GENERATE_PATH)?;
        debug!("generating scenarios for {}/{}", request.region, request.topic);
        self.execute(self.http.post(url).json(request), GENERATE_PATH).await
    }

    async fn get_regions(&self) -> Result<Vec<LookupEntry>, ApiError> {
        let url = self.endpoint(REGIONS_PATH)?;
        self.execute(self.http.get(url), REGIONS_PATH).await
    }

    async fn get_topics(&self) -> Result<Vec<LookupEntry>, ApiError> {
        let url = self.endpoint(TOPICS_PATH)?;
        self.execute(self.http.get(url), TOPICS_PATH).await
    }

    async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint(HEALTH_PATH)?;
        self.execute(self.http.get(url), HEALTH_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&Config {
            base_url: base.to_string(),
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_join() {
        let api = client("http://localhost:8000");
        assert_eq!(
            api.endpoint(GENERATE_PATH).unwrap().as_str(),
            "http://localhost:8000/api/scenarios/generate"
        );
        assert_eq!(api.endpoint(HEALTH_PATH).unwrap().as_str(), "http://localhost:8000/health");
    }

    #[test]
    fn test_endpoint_join_keeps_base_prefix() {
        let api = client("https://example.org/forecast/");
        assert_eq!(
            api.endpoint(REGIONS_PATH).unwrap().as_str(),
            "https://example.org/forecast/api/scenarios/regions"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Api(ApiError::InvalidBaseUrl { .. })
        ));
    }
}
