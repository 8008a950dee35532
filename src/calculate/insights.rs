//! Rule-based natural-language insights.

use serde::{Deserialize, Serialize};

use crate::models::{Divergence, Statistics};

/// Cut-offs for the variance and balance insights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsightThresholds {
    /// Standard deviation above which variance is called high
    pub high_variance_std: f64,

    /// Best-region win rate above which a champion is flagged overpowered
    pub overpowered_winrate: f64,

    /// Worst-region win rate below which a champion is flagged underpowered
    pub underpowered_winrate: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            high_variance_std: 0.03,
            overpowered_winrate: 0.55,
            underpowered_winrate: 0.45,
        }
    }
}

pub const CONSISTENT_WIN_RATE: &str = "Relatively consistent win rate across regions";
pub const OVERPOWERED: &str = "Potentially overpowered in some regions";
pub const UNDERPOWERED: &str = "Potentially underpowered in some regions";

/// Build the ordered insight list: variance, strongest divergence, balance.
///
/// Always yields between one and three entries.
pub fn generate_insights(
    stats: &Statistics,
    divergences: &[Divergence],
    thresholds: &InsightThresholds,
) -> Vec<String> {
    let mut insights = Vec::with_capacity(3);

    if stats.std_winrate > thresholds.high_variance_std {
        insights.push(format!(
            "High variance in win rate across regions (std: {:.2})",
            stats.std_winrate
        ));
    } else {
        insights.push(CONSISTENT_WIN_RATE.to_string());
    }

    if let Some(top) = divergences.first() {
        insights.push(format!(
            "Strongest divergence in {} ({} average by {:.2})",
            top.region, top.kind, top.difference
        ));
    }

    if stats.max_winrate > thresholds.overpowered_winrate {
        insights.push(OVERPOWERED.to_string());
    } else if stats.min_winrate < thresholds.underpowered_winrate {
        insights.push(UNDERPOWERED.to_string());
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DivergenceType;
    use pretty_assertions::assert_eq;

    fn stats(std: f64, max: f64, min: f64) -> Statistics {
        Statistics {
            mean_winrate: (max + min) / 2.0,
            std_winrate: std,
            max_winrate: max,
            min_winrate: min,
            max_region: "KR".to_string(),
            min_region: "BR".to_string(),
        }
    }

    #[test]
    fn test_consistent_only() {
        let insights = generate_insights(&stats(0.02, 0.54, 0.47), &[], &InsightThresholds::default());
        assert_eq!(insights, vec![CONSISTENT_WIN_RATE.to_string()]);
    }

    #[test]
    fn test_variance_boundary_is_not_high() {
        let insights = generate_insights(&stats(0.03, 0.52, 0.48), &[], &InsightThresholds::default());
        assert_eq!(insights, vec![CONSISTENT_WIN_RATE.to_string()]);
    }

    #[test]
    fn test_high_variance_with_divergence_and_overpowered() {
        let divergences = vec![Divergence {
            region: "KR".to_string(),
            winrate: 0.61,
            difference: 0.0849,
            kind: DivergenceType::Above,
        }];
        let insights = generate_insights(
            &stats(0.041, 0.61, 0.47),
            &divergences,
            &InsightThresholds::default(),
        );

        assert_eq!(
            insights,
            vec![
                "High variance in win rate across regions (std: 0.04)".to_string(),
                "Strongest divergence in KR (above average by 0.08)".to_string(),
                OVERPOWERED.to_string(),
            ]
        );
    }

    #[test]
    fn test_overpowered_takes_precedence_over_underpowered() {
        let insights = generate_insights(&stats(0.1, 0.60, 0.40), &[], &InsightThresholds::default());
        assert_eq!(insights.last().unwrap(), OVERPOWERED);
        assert!(!insights.iter().any(|i| i == UNDERPOWERED));
    }

    #[test]
    fn test_underpowered() {
        let insights = generate_insights(&stats(0.02, 0.50, 0.44), &[], &InsightThresholds::default());
        assert_eq!(insights.last().unwrap(), UNDERPOWERED);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = InsightThresholds {
            high_variance_std: 0.01,
            overpowered_winrate: 0.53,
            underpowered_winrate: 0.40,
        };
        let insights = generate_insights(&stats(0.02, 0.54, 0.47), &[], &thresholds);
        assert_eq!(
            insights,
            vec![
                "High variance in win rate across regions (std: 0.02)".to_string(),
                OVERPOWERED.to_string(),
            ]
        );
    }
}
