//! Combines the four sub-scores into a final score, rating tier and
//! recommendation list.
//!
//! Each category has an ordered table of half-open bands `[prev, below)`;
//! the last band's upper bound is infinite, so every value (NaN included)
//! lands in exactly one band.

use crate::scoring::score_report::{Rating, ScoreReport};

pub const BONUS_POSITIVE_ABOVE: f64 = 8.0;
pub const BONUS_ENCOURAGING_BELOW: f64 = 4.0;

pub const POSITIVE_BONUS: &str = "Outstanding overall - keep doing what you're doing!";
pub const ENCOURAGING_BONUS: &str = "A modest start, but small changes can add up.";

#[derive(Debug)]
pub struct Band {
    pub below: f64,
    pub message: &'static str,
}

#[derive(Debug)]
pub struct RecommendationRule {
    pub label: &'static str,
    pub bands: &'static [Band],
}

pub const SYMMETRY_RULE: RecommendationRule = RecommendationRule {
    label: "Symmetry",
    bands: &[
        Band {
            below: 4.0,
            message: "needs improvement, facial exercises could help balance things out.",
        },
        Band {
            below: 7.0,
            message: "fairly balanced, small posture tweaks may help.",
        },
        Band {
            below: f64::INFINITY,
            message: "excellent balance.",
        },
    ],
};

pub const JAWLINE_RULE: RecommendationRule = RecommendationRule {
    label: "Jawline",
    bands: &[
        Band {
            below: 3.0,
            message: "weak definition, chewing exercises may sharpen it.",
        },
        Band {
            below: 6.0,
            message: "decent edge, with room for more definition.",
        },
        Band {
            below: f64::INFINITY,
            message: "sharp and well defined.",
        },
    ],
};

pub const SKIN_RULE: RecommendationRule = RecommendationRule {
    label: "Skin",
    bands: &[
        Band {
            below: 3.0,
            message: "needs care, start with hydration and a basic routine.",
        },
        Band {
            below: 6.0,
            message: "okay, a gentle cleanser could add some glow.",
        },
        Band {
            below: f64::INFINITY,
            message: "excellent clarity, keep it up.",
        },
    ],
};

pub const PROPORTION_RULE: RecommendationRule = RecommendationRule {
    label: "Proportions",
    bands: &[
        Band {
            below: 7.0,
            message: "could improve, a hairstyle change may balance them.",
        },
        Band {
            below: f64::INFINITY,
            message: "good, well balanced.",
        },
    ],
};

impl RecommendationRule {
    /// Index of the band containing `score`.
    pub fn band_index(&self, score: f64) -> usize {
        self.bands
            .iter()
            .position(|b| score < b.below)
            .unwrap_or(self.bands.len() - 1)
    }

    pub fn recommend(&self, score: f64) -> String {
        let band = &self.bands[self.band_index(score)];
        format!("{} at {score:.2} - {}", self.label, band.message)
    }
}

pub fn final_score(symmetry: f64, jawline: f64, skin_quality: f64, proportion: f64) -> f64 {
    (symmetry + jawline + skin_quality + proportion) / 4.0
}

pub fn aggregate(symmetry: f64, jawline: f64, skin_quality: f64, proportion: f64) -> ScoreReport {
    let final_score = final_score(symmetry, jawline, skin_quality, proportion);
    let rating = Rating::from_final_score(final_score);

    let mut recommendations = vec![
        SYMMETRY_RULE.recommend(symmetry),
        JAWLINE_RULE.recommend(jawline),
        SKIN_RULE.recommend(skin_quality),
        PROPORTION_RULE.recommend(proportion),
    ];
    if final_score > BONUS_POSITIVE_ABOVE {
        recommendations.push(POSITIVE_BONUS.to_string());
    } else if final_score < BONUS_ENCOURAGING_BELOW {
        recommendations.push(ENCOURAGING_BONUS.to_string());
    }

    ScoreReport::new(
        symmetry,
        jawline,
        skin_quality,
        proportion,
        final_score,
        rating,
        recommendations,
    )
}
