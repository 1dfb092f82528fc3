use crate::config::SourceConfig;
use crate::error::{FetchError, PipelineError};
use crate::models::*;
use crate::retry::{run_with_retry, RetryPolicy};
use async_trait::async_trait;
use franchise_registry::Slot;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// External per-player statistics, one call per concern.
///
/// Implementations return validated records; shape problems surface as
/// `FetchError::MalformedPayload`.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Career totals of every player who appeared for the franchise
    async fn franchise_totals(&self, franchise: &str) -> Result<Vec<RawPlayerCandidate>, FetchError>;

    /// Eligible slots; empty when the source has no usable position
    async fn player_positions(&self, player_id: &str) -> Result<Vec<Slot>, FetchError>;

    /// Every season of the player's career, with team
    async fn player_seasons(&self, player_id: &str) -> Result<PlayerSeasons, FetchError>;

    /// Lifetime awards
    async fn player_awards(&self, player_id: &str) -> Result<Vec<Award>, FetchError>;
}

/// JSON-over-HTTP stats source
pub struct HttpStatsSource {
    config: SourceConfig,
    client: Client,
    retry: RetryPolicy,
}

impl HttpStatsSource {
    /// Create a new source with the configured per-request timeout
    pub fn new(config: SourceConfig) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PipelineError::Client(e.to_string()))?;
        let retry = RetryPolicy::from_config(&config);

        Ok(Self { config, client, retry })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// GET one JSON document with retries
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        let url = url.as_str();
        run_with_retry(url, self.retry, move || self.get_once(url)).await
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| self.transport(url, e))?;

        if !response.status().is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: response.status().as_u16() });
        }

        let body = response.text().await.map_err(|e| self.transport(url, e))?;
        serde_json::from_str(&body).map_err(|e| FetchError::malformed(url, e.to_string()))
    }

    fn transport(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout { url: url.to_string(), timeout_ms: self.config.timeout_ms }
        } else {
            FetchError::Transport { url: url.to_string(), message: error.to_string() }
        }
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn franchise_totals(&self, franchise: &str) -> Result<Vec<RawPlayerCandidate>, FetchError> {
        let payload: FranchiseTotalsPayload =
            self.get_json(&format!("franchises/{}/players", franchise)).await?;
        let candidates = payload.validate(franchise)?;
        info!("Fetched {} candidates for {}", candidates.len(), franchise);
        Ok(candidates)
    }

    async fn player_positions(&self, player_id: &str) -> Result<Vec<Slot>, FetchError> {
        let payload: PositionsPayload = self.get_json(&format!("players/{}/position", player_id)).await?;
        payload.validate()
    }

    async fn player_seasons(&self, player_id: &str) -> Result<PlayerSeasons, FetchError> {
        let payload: SeasonsPayload = self.get_json(&format!("players/{}/seasons", player_id)).await?;
        payload.validate()
    }

    async fn player_awards(&self, player_id: &str) -> Result<Vec<Award>, FetchError> {
        let payload: AwardsPayload = self.get_json(&format!("players/{}/awards", player_id)).await?;
        payload.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let source = HttpStatsSource::new(SourceConfig {
            base_url: "https://stats.example.com/v1/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(source.url("players/7/awards"), "https://stats.example.com/v1/players/7/awards");
    }

    #[tokio::test]
    async fn test_unreachable_source_exhausts_retries() {
        let source = HttpStatsSource::new(SourceConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_ms: 200,
            max_attempts: 2,
            backoff_ms: 1,
        })
        .unwrap();

        let err = source.franchise_totals("ATL").await.unwrap_err();
        assert!(matches!(err, FetchError::RetriesExhausted { attempts: 2, .. }), "{err:?}");
    }
}
