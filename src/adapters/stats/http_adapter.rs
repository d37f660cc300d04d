//! HTTP stats adapter. Implements StatsGateway against the architecture REST API.
//!
//! Each capability maps to a POST route; the body is the selection options and
//! the response is a JSON list of `{ "id", "count" }` tallies.

use crate::domain::{DomainError, FlowStatistics, IdSelectionOptions, StatsCapability, Tally};
use crate::ports::StatsGateway;
use std::time::Duration;
use tracing::{debug, info, warn};

/// REST stats gateway.
pub struct HttpStatsGateway {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpStatsGateway {
    /// Create a new gateway.
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g., "https://ea.example.com")
    /// * `token` - Optional bearer token
    /// * `timeout` - Per-request timeout
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::StatsGateway(format!("build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    fn url_for(&self, capability: StatsCapability) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), capability.path())
    }
}

#[async_trait::async_trait]
impl StatsGateway for HttpStatsGateway {
    async fn calculate_stats(
        &self,
        capability: StatsCapability,
        selector: &IdSelectionOptions,
    ) -> Result<FlowStatistics, DomainError> {
        let url = self.url_for(capability);
        info!(
            capability = %capability,
            anchor = %selector.entity_reference,
            url = %url,
            "requesting stats"
        );

        let mut request = self.client.post(&url).json(selector);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::StatsGateway(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "stats API returned error");
            return Err(DomainError::StatsGateway(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let tallies: Vec<Tally> = response.json().await.map_err(|e| {
            DomainError::StatsGateway(format!("Failed to parse API response: {}", e))
        })?;

        debug!(tallies = tallies.len(), "received stats");
        Ok(FlowStatistics::from_tallies(tallies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityKind, EntityReference, HierarchyQueryScope};
    use mockito::{Matcher, Server};

    fn selector(kind: EntityKind, id: i64) -> IdSelectionOptions {
        IdSelectionOptions::new(EntityReference::new(kind, id), HierarchyQueryScope::Exact)
    }

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let gw = HttpStatsGateway::new("http://host/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(
            gw.url_for(StatsCapability::LogicalFlow),
            "http://host/api/logical-flow/stats"
        );
    }

    #[tokio::test]
    async fn test_posts_selector_and_parses_tallies() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/logical-flow/stats")
            .match_header("authorization", "Bearer secret")
            .match_body(Matcher::Json(serde_json::json!({
                "entityReference": { "kind": "APPLICATION", "id": 7 },
                "scope": "EXACT"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 1, "count": 2}, {"id": 3, "count": 5}]"#)
            .create_async()
            .await;

        let gw = HttpStatsGateway::new(server.url(), Some("secret".into()), Duration::from_secs(5))
            .unwrap();
        let stats = gw
            .calculate_stats(StatsCapability::LogicalFlow, &selector(EntityKind::Application, 7))
            .await
            .unwrap();

        assert_eq!(stats.get(1), Some(2));
        assert_eq!(stats.get(3), Some(5));
        assert_eq!(stats.total(), 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_data_type_capability_hits_usage_route() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/data-type-usage/stats")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let gw = HttpStatsGateway::new(server.url(), None, Duration::from_secs(5)).unwrap();
        let stats = gw
            .calculate_stats(StatsCapability::DataTypeUsage, &selector(EntityKind::DataType, 2))
            .await
            .unwrap();

        assert!(stats.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_maps_to_gateway_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/logical-flow/stats")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let gw = HttpStatsGateway::new(server.url(), None, Duration::from_secs(5)).unwrap();
        let err = gw
            .calculate_stats(StatsCapability::LogicalFlow, &selector(EntityKind::Application, 1))
            .await
            .unwrap_err();

        match err {
            DomainError::StatsGateway(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
