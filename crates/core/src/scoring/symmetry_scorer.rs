//! Left/right balance from eye centroids and nose tip.

use crate::detection::domain::landmark_set::{FaceRegion, LandmarkSet, NOSE_TIP};
use crate::shared::geometry::{distance, mean, midpoint};

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// Penalty multiplier applied to the eye-span / nose-offset ratio.
const DIFF_WEIGHT: f64 = 2.0;

/// Largest penalty subtracted from the maximum score.
const MAX_PENALTY: f64 = 9.0;

/// Scores symmetry in `[1, 10]`.
///
/// `diff = eye_distance / nose_offset`, where `nose_offset` is the distance
/// from the nose tip to the midpoint between eye centroids. A zero offset
/// counts as `diff = 1`.
pub fn score(landmarks: &LandmarkSet) -> f64 {
    let (Some(left_eye), Some(right_eye)) = (
        mean(landmarks.region(FaceRegion::LeftEye)),
        mean(landmarks.region(FaceRegion::RightEye)),
    ) else {
        return MIN_SCORE;
    };
    let nose_tip = landmarks.point(NOSE_TIP);

    let eye_distance = distance(left_eye, right_eye);
    let nose_offset = distance(nose_tip, midpoint(left_eye, right_eye));
    let diff = if nose_offset == 0.0 {
        1.0
    } else {
        eye_distance / nose_offset
    };

    let raw = MAX_SCORE - (diff * DIFF_WEIGHT).min(MAX_PENALTY);
    let clamped = raw.clamp(MIN_SCORE, MAX_SCORE);
    log::debug!("symmetry diff={diff:.4} raw={raw:.4} clamped={clamped:.4}");
    clamped
}
