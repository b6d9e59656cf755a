//! Maps a raw section score to a presentation percentage.

use serde::Serialize;

use crate::config::AnswerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceEstimator {
    max_expected_score: u32,
    floor: u8,
}

impl ConfidenceEstimator {
    pub fn new(max_expected_score: u32, floor: u8) -> Self {
        Self {
            max_expected_score,
            floor: floor.min(100),
        }
    }

    pub fn from_config(config: &AnswerConfig) -> Self {
        Self::new(config.max_expected_score, config.confidence_floor)
    }

    /// Percentage of the expected maximum, rounded, clamped to [0, 100] and
    /// raised to the floor. Used only for result-backed answers; the
    /// no-result answer reports 0 directly.
    pub fn estimate(&self, score: u32) -> u8 {
        let ratio = if self.max_expected_score == 0 {
            1.0
        } else {
            f64::from(score) / f64::from(self.max_expected_score)
        };
        let pct = (ratio * 100.0).round().clamp(0.0, 100.0) as u8;
        pct.max(self.floor)
    }
}

impl Default for ConfidenceEstimator {
    fn default() -> Self {
        Self::from_config(&AnswerConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_percentage(pct: u8) -> Self {
        match pct {
            80.. => Self::High,
            60..=79 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_to_expected_max() {
        let est = ConfidenceEstimator::default();
        assert_eq!(est.estimate(25), 50);
        assert_eq!(est.estimate(31), 62);
        assert_eq!(est.estimate(50), 100);
    }

    #[test]
    fn clamped_at_hundred() {
        let est = ConfidenceEstimator::default();
        assert_eq!(est.estimate(90), 100);
        assert_eq!(est.estimate(u32::MAX), 100);
    }

    #[test]
    fn floored_at_thirty() {
        let est = ConfidenceEstimator::default();
        assert_eq!(est.estimate(0), 30);
        assert_eq!(est.estimate(5), 30);
        assert_eq!(est.estimate(14), 30);
        assert_eq!(est.estimate(16), 32);
    }

    #[test]
    fn always_within_bounds() {
        let est = ConfidenceEstimator::default();
        for score in 0..200 {
            let pct = est.estimate(score);
            assert!((30..=100).contains(&pct), "score {score} → {pct}");
        }
    }

    #[test]
    fn zero_expected_max_reports_full_confidence() {
        assert_eq!(ConfidenceEstimator::new(0, 30).estimate(3), 100);
    }

    #[test]
    fn levels() {
        assert_eq!(ConfidenceLevel::from_percentage(100), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_percentage(80), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_percentage(79), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_percentage(60), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_percentage(30), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_percentage(0), ConfidenceLevel::Low);
    }
}
