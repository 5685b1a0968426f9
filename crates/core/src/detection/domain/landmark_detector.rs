use crate::detection::domain::landmark_set::LandmarkSet;
use crate::shared::frame::Frame;

/// Domain interface for face detection plus 68-point landmark extraction.
///
/// Returns one `LandmarkSet` per detected face, in detector order (possibly
/// empty). Implementations are shared read-only across concurrent
/// analyses, hence `&self` and `Sync`.
pub trait LandmarkDetector: Send + Sync {
    fn detect(&self, frame: &Frame) -> Result<Vec<LandmarkSet>, Box<dyn std::error::Error>>;
}
