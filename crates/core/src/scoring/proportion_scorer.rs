//! Face height-to-width ratio.

use crate::detection::domain::landmark_set::{
    FaceRegion, LandmarkSet, CHIN, JAW_LEFT_CORNER, JAW_RIGHT_CORNER,
};
use crate::shared::geometry::{distance, mean};

pub const MAX_SCORE: f64 = 10.0;

/// Returned when the jaw corners coincide and no ratio exists.
pub const DEGENERATE_SCORE: f64 = 0.0;

const RATIO_WEIGHT: f64 = 10.0;

/// `min(height / width * 10, 10)` with width between the jaw corners and
/// height from the chin to the mean inner-brow position. Not floored.
pub fn score(landmarks: &LandmarkSet) -> f64 {
    let width = distance(
        landmarks.point(JAW_LEFT_CORNER),
        landmarks.point(JAW_RIGHT_CORNER),
    );
    let Some(brow) = mean(landmarks.region(FaceRegion::BrowSpan)) else {
        return DEGENERATE_SCORE;
    };
    if width == 0.0 {
        log::debug!("proportion: zero face width, using fallback");
        return DEGENERATE_SCORE;
    }

    let height = distance(landmarks.point(CHIN), brow);
    let ratio = height / width;
    let score = (ratio * RATIO_WEIGHT).min(MAX_SCORE);
    log::debug!("proportion width={width:.2} height={height:.2} ratio={ratio:.4}");
    score
}
