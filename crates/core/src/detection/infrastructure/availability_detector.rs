use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::detection::domain::landmark_set::LandmarkSet;
use crate::shared::frame::Frame;

pub type DetectorLoader =
    Box<dyn FnOnce() -> Result<Box<dyn LandmarkDetector>, Box<dyn std::error::Error>>>;

/// Holds the process-wide detector, or nothing if loading it failed.
///
/// A failed load is logged once and does not stop startup; every
/// subsequent `detect` call then reports zero faces.
pub struct AvailabilityDetector {
    inner: Option<Box<dyn LandmarkDetector>>,
}

impl AvailabilityDetector {
    pub fn load(loader: DetectorLoader) -> Self {
        match loader() {
            Ok(detector) => {
                log::info!("Landmark detector loaded");
                Self {
                    inner: Some(detector),
                }
            }
            Err(e) => {
                log::error!("Failed to load landmark detector: {e}");
                Self { inner: None }
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }
}

impl LandmarkDetector for AvailabilityDetector {
    fn detect(&self, frame: &Frame) -> Result<Vec<LandmarkSet>, Box<dyn std::error::Error>> {
        match &self.inner {
            Some(detector) => detector.detect(frame),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_faces::reference_face;

    struct FixedDetector;

    impl LandmarkDetector for FixedDetector {
        fn detect(&self, _frame: &Frame) -> Result<Vec<LandmarkSet>, Box<dyn std::error::Error>> {
            Ok(vec![reference_face()])
        }
    }

    fn fixed_loader() -> Result<Box<dyn LandmarkDetector>, Box<dyn std::error::Error>> {
        Ok(Box::new(FixedDetector))
    }

    fn failing_loader() -> Result<Box<dyn LandmarkDetector>, Box<dyn std::error::Error>> {
        Err("model file missing".into())
    }

    fn frame() -> Frame {
        Frame::new(vec![0u8; 4 * 4 * 3], 4, 4, 3)
    }

    #[test]
    fn test_loaded_detector_delegates() {
        let detector = AvailabilityDetector::load(Box::new(fixed_loader));
        assert!(detector.is_available());
        assert_eq!(detector.detect(&frame()).unwrap().len(), 1);
    }

    #[test]
    fn test_failed_load_yields_no_faces() {
        let detector = AvailabilityDetector::load(Box::new(failing_loader));
        assert!(!detector.is_available());
        assert!(detector.detect(&frame()).unwrap().is_empty());
    }
}
