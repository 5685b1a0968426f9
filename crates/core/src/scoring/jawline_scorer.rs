//! Jaw definition from the turning angles along the jaw contour.

use crate::detection::domain::landmark_set::{FaceRegion, LandmarkSet};
use crate::shared::geometry::angle_between;

pub const MAX_SCORE: f64 = 10.0;

const ANGLE_WEIGHT: f64 = 10.0;

/// Mean turning angle (radians) across consecutive jaw segments, times 10,
/// capped at 10. A perfectly straight contour scores 0.
///
/// A zero-length segment (two coincident jaw points) has no direction and
/// contributes an angle of 0.
pub fn score(landmarks: &LandmarkSet) -> f64 {
    let jaw = landmarks.region(FaceRegion::Jaw);
    let angles: Vec<f64> = jaw
        .windows(3)
        .map(|w| angle_between(w[1] - w[0], w[2] - w[1]).unwrap_or(0.0))
        .collect();

    let mean_angle = angles.iter().sum::<f64>() / angles.len() as f64;
    let score = (mean_angle * ANGLE_WEIGHT).min(MAX_SCORE);
    log::debug!("jawline mean_angle={mean_angle:.4} score={score:.4}");
    score
}
