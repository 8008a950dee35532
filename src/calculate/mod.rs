//! Statistics calculation engine.
//!
//! Computes cross-region statistics for a champion's win rates and derives:
//! - Summary statistics (mean, population std, extremes)
//! - Regions diverging from the mean by more than a threshold
//! - Rule-based insights describing the spread

mod insights;

pub use insights::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    AnalysisResult, ChampionRates, Divergence, DivergenceType, RateMap, Statistics,
};

/// Errors from analyzing a rate map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("No regional rates to analyze")]
    EmptyInput,

    #[error("Invalid rate for region {region}: {value}")]
    InvalidValue { region: String, value: f64 },

    #[error("Rates are too far apart to compute a finite {statistic}")]
    NonFiniteStatistic { statistic: &'static str },
}

/// Analyzer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Minimum absolute distance from the mean (exclusive) for a region to diverge
    pub significance_threshold: f64,

    pub insights: InsightThresholds,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            significance_threshold: 0.05,
            insights: InsightThresholds::default(),
        }
    }
}

/// Turns a [`RateMap`] into an [`AnalysisResult`].
///
/// Stateless apart from its configuration; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct DivergenceAnalyzer {
    config: AnalyzerConfig,
}

impl DivergenceAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Default configuration with a different significance threshold.
    pub fn with_threshold(significance_threshold: f64) -> Self {
        Self::new(AnalyzerConfig {
            significance_threshold,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one champion's regional win rates.
    pub fn analyze(&self, rates: &RateMap) -> Result<AnalysisResult, AnalysisError> {
        validate_rates(rates)?;

        let statistics = calculate_statistics(rates)?;
        let divergences = find_divergences(
            rates,
            statistics.mean_winrate,
            self.config.significance_threshold,
        );
        let insights = generate_insights(&statistics, &divergences, &self.config.insights);

        Ok(AnalysisResult {
            statistics,
            divergences,
            insights,
        })
    }

    /// Analyze every champion independently, keeping input order.
    pub fn analyze_all(
        &self,
        champions: &[ChampionRates],
    ) -> Vec<(String, Result<AnalysisResult, AnalysisError>)> {
        champions
            .iter()
            .map(|c| (c.name.clone(), self.analyze(&c.win_rates())))
            .collect()
    }
}

/// Reject empty maps and non-finite rates.
pub fn validate_rates(rates: &RateMap) -> Result<(), AnalysisError> {
    if rates.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    match rates.iter().find(|(_, rate)| !rate.is_finite()) {
        Some((region, value)) => Err(AnalysisError::InvalidValue {
            region: region.to_string(),
            value,
        }),
        None => Ok(()),
    }
}

/// Compute summary statistics. Extremes go to the first region that reaches them.
pub fn calculate_statistics(rates: &RateMap) -> Result<Statistics, AnalysisError> {
    let mut iter = rates.iter();
    let (first_region, first_rate) = iter.next().ok_or(AnalysisError::EmptyInput)?;

    let (mut max_region, mut max_winrate) = (first_region, first_rate);
    let (mut min_region, mut min_winrate) = (first_region, first_rate);
    for (region, rate) in iter {
        if rate > max_winrate {
            max_region = region;
            max_winrate = rate;
        }
        if rate < min_winrate {
            min_region = region;
            min_winrate = rate;
        }
    }

    let values: Vec<f64> = rates.values().collect();
    let mean_winrate = finite(calculate_mean(&values), "mean")?.clamp(min_winrate, max_winrate);
    let std_winrate = finite(calculate_population_std(&values, mean_winrate), "std")?;

    Ok(Statistics {
        mean_winrate,
        std_winrate,
        max_winrate,
        min_winrate,
        max_region: max_region.to_string(),
        min_region: min_region.to_string(),
    })
}

fn finite(value: f64, statistic: &'static str) -> Result<f64, AnalysisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::NonFiniteStatistic { statistic })
    }
}

/// Arithmetic mean, accumulated as offsets from the first value.
///
/// Identical inputs return that value exactly. Empty input returns 0.0.
pub fn calculate_mean(values: &[f64]) -> f64 {
    let Some(&pivot) = values.first() else {
        return 0.0;
    };
    let offset: f64 = values.iter().map(|v| v - pivot).sum();
    pivot + offset / values.len() as f64
}

/// Population standard deviation (divisor N) around a precomputed mean.
pub fn calculate_population_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / values.len() as f64).sqrt()
}

/// Regions whose rate is strictly more than `threshold` away from `mean`,
/// largest difference first. Equal differences keep input order.
pub fn find_divergences(rates: &RateMap, mean: f64, threshold: f64) -> Vec<Divergence> {
    let mut divergences: Vec<Divergence> = rates
        .iter()
        .filter_map(|(region, winrate)| {
            let difference = (winrate - mean).abs();
            (difference > threshold).then(|| Divergence {
                region: region.to_string(),
                winrate,
                difference,
                kind: if winrate > mean {
                    DivergenceType::Above
                } else {
                    DivergenceType::Below
                },
            })
        })
        .collect();

    // Vec::sort_by is stable
    divergences.sort_by(|a, b| b.difference.total_cmp(&a.difference));
    divergences
}
