use std::fmt;

use serde::Serialize;

/// Ordered rating tiers. Boundaries sit at final scores 2.5, 5 and 7.5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Low,
    Moderate,
    High,
    Exceptional,
}

impl Rating {
    pub const ALL: [Rating; 4] = [
        Rating::Low,
        Rating::Moderate,
        Rating::High,
        Rating::Exceptional,
    ];

    /// Tier `min(floor(final * 4 / 10), 3)`; negative or NaN scores map to
    /// the lowest tier.
    pub fn from_final_score(final_score: f64) -> Self {
        let index = (final_score * 4.0 / 10.0).floor();
        if !(index >= 1.0) {
            return Rating::Low;
        }
        Self::ALL[(index as usize).min(Self::ALL.len() - 1)]
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Low => "low",
            Rating::Moderate => "moderate",
            Rating::High => "high",
            Rating::Exceptional => "exceptional",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of scoring one face. Built only by the aggregator.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreReport {
    symmetry: f64,
    jawline: f64,
    skin_quality: f64,
    proportion: f64,
    final_score: f64,
    rating: Rating,
    recommendations: Vec<String>,
}

impl ScoreReport {
    pub(crate) fn new(
        symmetry: f64,
        jawline: f64,
        skin_quality: f64,
        proportion: f64,
        final_score: f64,
        rating: Rating,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            symmetry,
            jawline,
            skin_quality,
            proportion,
            final_score,
            rating,
            recommendations,
        }
    }

    pub fn symmetry(&self) -> f64 {
        self.symmetry
    }

    pub fn jawline(&self) -> f64 {
        self.jawline
    }

    pub fn skin_quality(&self) -> f64 {
        self.skin_quality
    }

    pub fn proportion(&self) -> f64 {
        self.proportion
    }

    pub fn final_score(&self) -> f64 {
        self.final_score
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, Rating::Low)]
    #[case(2.49, Rating::Low)]
    #[case(2.5, Rating::Moderate)]
    #[case(4.99, Rating::Moderate)]
    #[case(5.0, Rating::High)]
    #[case(7.49, Rating::High)]
    #[case(7.5, Rating::Exceptional)]
    #[case(10.0, Rating::Exceptional)]
    #[case(12.0, Rating::Exceptional)]
    #[case(-3.0, Rating::Low)]
    #[case(f64::NAN, Rating::Low)]
    fn test_rating_tiers(#[case] final_score: f64, #[case] expected: Rating) {
        assert_eq!(Rating::from_final_score(final_score), expected);
    }

    #[test]
    fn test_rating_monotonic() {
        let mut prev = Rating::from_final_score(-1.0);
        for i in -100..=1100 {
            let r = Rating::from_final_score(i as f64 / 100.0);
            assert!(r >= prev, "tier dropped at {}", i as f64 / 100.0);
            prev = r;
        }
    }

    #[test]
    fn test_rating_labels_and_serde() {
        assert_eq!(Rating::Exceptional.to_string(), "exceptional");
        assert_eq!(
            serde_json::to_string(&Rating::Moderate).unwrap(),
            "\"moderate\""
        );
    }
}
