//! HTTP client for the recommendation service.

use crate::error::{Result, TestrecError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use url::Url;

/// Request structure for the recommend endpoint
#[derive(Serialize)]
struct RecommendRequest<'a> {
    query: &'a str,
}

/// Response structure from the recommend endpoint
#[derive(Deserialize)]
struct RecommendResponse {
    #[serde(default)]
    recommendations: Vec<Recommendation>,
}

/// One recommended test as returned over the wire.
///
/// `skills` may be absent and `duration` is optional; scoring substitutes
/// its own sentinel for a missing duration.
#[derive(Debug, Clone, Deserialize)]
pub struct Recommendation {
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl Recommendation {
    /// Recommended skills, lowercased into a set for scoring.
    pub fn skill_set(&self) -> BTreeSet<String> {
        self.skills.iter().map(|s| s.to_lowercase()).collect()
    }
}

/// Client for the recommendation service
///
/// Requests carry no timeout: evaluation runs sequentially and waits for
/// the service however long it takes.
#[derive(Debug)]
pub struct RecommendClient {
    client: Client,
    recommend_url: Url,
}

impl RecommendClient {
    /// Create a client for the service at `service_url` (e.g. <http://localhost:8000>).
    pub fn new(service_url: &str) -> Result<Self> {
        let base = Url::parse(service_url).map_err(|e| {
            TestrecError::InvalidInput(format!("invalid service URL {:?}: {}", service_url, e))
        })?;

        let recommend_url = base.join("recommend").map_err(|e| {
            TestrecError::InvalidInput(format!("invalid service URL {:?}: {}", service_url, e))
        })?;

        Ok(Self {
            client: Client::new(),
            recommend_url,
        })
    }

    /// POST a query and return the service's recommendations, in service order.
    pub async fn recommend(&self, query: &str) -> Result<Vec<Recommendation>> {
        let response = self
            .client
            .post(self.recommend_url.clone())
            .json(&RecommendRequest { query })
            .send()
            .await
            .map_err(|e| TestrecError::Service(format!("Network error: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(TestrecError::Service(format!(
                "Recommendation service error {}: {}",
                status, body
            )));
        }

        let result: RecommendResponse = response
            .json()
            .await
            .map_err(|e| TestrecError::Service(format!("Failed to parse response: {}", e)))?;

        Ok(result.recommendations)
    }
}
