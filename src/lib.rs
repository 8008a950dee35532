//! # Rift Divergence
//!
//! Regional champion win-rate divergence analysis.
//!
//! ## Architecture
//!
//! - **models**: Rate maps, regions and analysis results
//! - **calculate**: Divergence analyzer (statistics, divergences, insights)
//! - **provider**: Sources of per-region champion rates
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod provider;

pub use calculate::{AnalysisError, AnalyzerConfig, DivergenceAnalyzer};
pub use models::*;
pub use provider::{ProviderError, RegionalRateProvider};

use std::time::Duration;

/// Parse a human-friendly duration string (e.g., "6h", "30m", "90s", "250ms").
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(n) = s.strip_suffix("ms") {
        return n.parse().ok().map(Duration::from_millis);
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('h') {
        (n, 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        // Default to seconds
        (s, 1)
    };

    let num: u64 = num_str.parse().ok()?;
    num.checked_mul(multiplier).map(Duration::from_secs)
}
