// src/infrastructure/api.rs
use crate::application::{CatalogSource, MissionSource};
use crate::domain::{CatalogRecord, DomainError, MissionInfo, SearchResultPage};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// HTTP client for the exoplanet catalog API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, DomainError> {
        let mut builder =
            Client::builder().user_agent(concat!("exoseeker/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DomainError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    #[instrument(level = "debug", skip(self, query))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<T, DomainError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;

        let status = response.status();
        debug!(%status, "Received response");
        if status == StatusCode::NOT_FOUND {
            return Err(DomainError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(DomainError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::InvalidResponse(format!("{url}: {e}")))
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn search(&self, query: &[(String, String)]) -> Result<SearchResultPage, DomainError> {
        self.get_json(&self.endpoint("catalog"), query).await
    }

    async fn get_item(&self, id: i64) -> Result<CatalogRecord, DomainError> {
        self.get_json(&self.endpoint(&format!("catalog/{id}")), &[])
            .await
    }
}

#[async_trait]
impl MissionSource for ApiClient {
    async fn fetch_mission_stats(&self) -> Result<Value, DomainError> {
        self.get_json(&self.endpoint("mission-stats"), &[]).await
    }

    async fn fetch_missions(&self) -> Result<BTreeMap<String, MissionInfo>, DomainError> {
        self.get_json(&self.endpoint("missions"), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8000/api", "catalog", "http://localhost:8000/api/catalog")]
    #[case("http://localhost:8000/api/", "/catalog/7", "http://localhost:8000/api/catalog/7")]
    #[case("https://exo.example", "mission-stats", "https://exo.example/mission-stats")]
    fn given_base_url_when_building_endpoint_then_joins_with_single_slash(
        #[case] base: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        let client = ApiClient::new(base, None).unwrap();

        assert_eq!(client.endpoint(path), expected);
    }
}
