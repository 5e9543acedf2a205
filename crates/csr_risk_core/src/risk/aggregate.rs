//! Portfolio aggregate risk score.
//!
//! `aggregate = mean(risk_score)` over every project of every company.
//! Missing scores count as zero. An empty portfolio scores `0`, never NaN.
//! The mean is kept unrounded; `rounded()` is the display boundary.

use crate::portfolio::PortfolioSnapshot;

/// Mean project risk across a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateRiskScore {
    /// Unrounded arithmetic mean.
    pub mean: f64,
    /// Projects contributing to the mean.
    pub project_count: usize,
}

impl AggregateRiskScore {
    pub const ZERO: AggregateRiskScore = AggregateRiskScore {
        mean: 0.0,
        project_count: 0,
    };

    /// Mean rounded to the nearest integer (half away from zero).
    ///
    /// A non-finite mean (NaN scores upstream) displays as `0`.
    pub fn rounded(&self) -> i64 {
        if !self.mean.is_finite() {
            return 0;
        }
        self.mean.round() as i64
    }
}

/// Arithmetic mean of `risk_score` across all projects.
pub fn aggregate_risk_score(snapshot: &PortfolioSnapshot) -> AggregateRiskScore {
    mean_risk(snapshot.projects().map(|(_, p)| p.risk_score()))
}

pub(crate) fn mean_risk(scores: impl Iterator<Item = f64>) -> AggregateRiskScore {
    let (sum, count) = scores.fold((0.0_f64, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        return AggregateRiskScore::ZERO;
    }
    AggregateRiskScore {
        mean: sum / count as f64,
        project_count: count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_happens_only_at_boundary() {
        let score = mean_risk([70.0, 71.0].into_iter());
        assert!((score.mean - 70.5).abs() < 1e-12);
        assert_eq!(score.rounded(), 71);
    }

    #[test]
    fn nan_mean_displays_zero() {
        let score = mean_risk([f64::NAN, 50.0].into_iter());
        assert!(score.mean.is_nan());
        assert_eq!(score.rounded(), 0);
    }
}
