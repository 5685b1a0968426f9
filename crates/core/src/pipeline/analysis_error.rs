use thiserror::Error;

/// Expected failures of a single analysis. Anything else is a bug or an
/// infrastructure fault and is logged rather than returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid image file")]
    InvalidImage,
    #[error("No face detected")]
    NoFaceDetected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(AnalysisError::InvalidImage.to_string(), "Invalid image file");
        assert_eq!(AnalysisError::NoFaceDetected.to_string(), "No face detected");
    }
}
