//! Divergence analysis output models.

use serde::{Deserialize, Serialize};

/// Whether a region sits above or below the cross-region mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivergenceType {
    Above,
    Below,
}

impl std::fmt::Display for DivergenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DivergenceType::Above => write!(f, "above"),
            DivergenceType::Below => write!(f, "below"),
        }
    }
}

/// Summary statistics over one champion's regional win rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Arithmetic mean
    pub mean_winrate: f64,

    /// Population standard deviation (divisor N)
    pub std_winrate: f64,

    pub max_winrate: f64,
    pub min_winrate: f64,

    /// First region attaining the maximum
    pub max_region: String,

    /// First region attaining the minimum
    pub min_region: String,
}

/// A region whose win rate differs from the mean by more than the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    pub region: String,
    pub winrate: f64,

    /// Absolute difference from the mean
    pub difference: f64,

    #[serde(rename = "type")]
    pub kind: DivergenceType,
}

/// Full result of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub statistics: Statistics,

    /// Sorted by difference, largest first
    pub divergences: Vec<Divergence>,

    pub insights: Vec<String>,
}
