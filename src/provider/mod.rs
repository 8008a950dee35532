//! Regional rate providers.
//!
//! A provider supplies per-region rates for champions. The analyzer never
//! talks to a provider directly: the API and CLI fetch first, then analyze
//! the materialized [`RateMap`]. Provider failures are surfaced as-is.

mod dataset;

pub use dataset::*;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::models::{ChampionRates, RateMap, Region};

/// Errors raised while obtaining regional rates.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unknown champion: {0}")]
    UnknownChampion(String),

    #[error("Upstream timed out after {millis} ms")]
    Timeout { millis: u64 },

    #[error("Malformed rate data: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source of per-region champion rates.
#[async_trait]
pub trait RegionalRateProvider: Send + Sync {
    /// Provider identifier for logging.
    fn name(&self) -> &'static str;

    /// Known regions, in display order.
    async fn list_regions(&self) -> Result<Vec<Region>, ProviderError>;

    /// Known champion names.
    async fn list_champions(&self) -> Result<Vec<String>, ProviderError>;

    /// Win, pick and ban rates for one champion across all regions.
    async fn fetch_champion(&self, champion: &str) -> Result<ChampionRates, ProviderError>;

    /// Rates for every known champion.
    async fn fetch_all(&self) -> Result<Vec<ChampionRates>, ProviderError>;

    /// Win rates for one champion, keyed by region in region order.
    async fn fetch(&self, champion: &str) -> Result<RateMap, ProviderError> {
        Ok(self.fetch_champion(champion).await?.win_rates())
    }
}

/// Wraps a provider so every call fails with [`ProviderError::Timeout`]
/// once `timeout` elapses.
pub struct TimeoutProvider {
    inner: Arc<dyn RegionalRateProvider>,
    timeout: Duration,
}

impl TimeoutProvider {
    pub fn new(inner: Arc<dyn RegionalRateProvider>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn run<T, F>(&self, op: &str, fut: F) -> Result<T, ProviderError>
    where
        T: Send,
        F: std::future::Future<Output = Result<T, ProviderError>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    provider = self.inner.name(),
                    op,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Provider call timed out"
                );
                Err(ProviderError::Timeout {
                    millis: self.timeout.as_millis() as u64,
                })
            }
        }
    }
}

#[async_trait]
impl RegionalRateProvider for TimeoutProvider {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn list_regions(&self) -> Result<Vec<Region>, ProviderError> {
        self.run("list_regions", self.inner.list_regions()).await
    }

    async fn list_champions(&self) -> Result<Vec<String>, ProviderError> {
        self.run("list_champions", self.inner.list_champions()).await
    }

    async fn fetch_champion(&self, champion: &str) -> Result<ChampionRates, ProviderError> {
        self.run("fetch_champion", self.inner.fetch_champion(champion))
            .await
    }

    async fn fetch_all(&self) -> Result<Vec<ChampionRates>, ProviderError> {
        self.run("fetch_all", self.inner.fetch_all()).await
    }
}
