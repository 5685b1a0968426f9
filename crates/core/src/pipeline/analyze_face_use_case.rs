use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::detection::domain::landmark_set::LandmarkSet;
use crate::imaging::domain::image_decoder::ImageDecoder;
use crate::pipeline::analysis_error::AnalysisError;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::scoring::score_report::ScoreReport;
use crate::scoring::{
    jawline_scorer, proportion_scorer, score_aggregator, skin_quality_scorer, symmetry_scorer,
};
use crate::shared::frame::Frame;

/// Single-image analysis: decode → detect → score → aggregate.
///
/// Stateless between calls; one instance can serve many threads.
pub struct AnalyzeFaceUseCase {
    decoder: Box<dyn ImageDecoder>,
    detector: Arc<dyn LandmarkDetector>,
    logger: Arc<dyn PipelineLogger>,
}

impl AnalyzeFaceUseCase {
    pub fn new(
        decoder: Box<dyn ImageDecoder>,
        detector: Arc<dyn LandmarkDetector>,
        logger: Arc<dyn PipelineLogger>,
    ) -> Self {
        Self {
            decoder,
            detector,
            logger,
        }
    }

    pub fn execute(&self, bytes: &[u8]) -> Result<ScoreReport, AnalysisError> {
        let start = Instant::now();
        let frame = self.decoder.decode(bytes).map_err(|e| {
            log::debug!("Image decode failed: {e}");
            AnalysisError::InvalidImage
        })?;
        self.logger.timing("decode", elapsed_ms(start));

        let start = Instant::now();
        let faces = match self.detector.detect(&frame) {
            Ok(faces) => faces,
            Err(e) => {
                log::warn!("Landmark detection failed, treating as no face: {e}");
                Vec::new()
            }
        };
        self.logger.timing("detect", elapsed_ms(start));
        self.logger.metric("faces", faces.len() as f64);

        if faces.len() > 1 {
            log::info!("{} faces detected, scoring the first", faces.len());
        }
        let landmarks = faces.first().ok_or(AnalysisError::NoFaceDetected)?;

        let start = Instant::now();
        let report = score_face(&frame, landmarks);
        self.logger.timing("score", elapsed_ms(start));
        Ok(report)
    }

    /// Reads `path` and analyzes its contents. An unreadable file counts as
    /// an invalid image.
    pub fn execute_path(&self, path: &Path) -> Result<ScoreReport, AnalysisError> {
        let bytes = std::fs::read(path).map_err(|e| {
            log::warn!("Failed to read {}: {e}", path.display());
            AnalysisError::InvalidImage
        })?;
        self.execute(&bytes)
    }
}

fn score_face(frame: &Frame, landmarks: &LandmarkSet) -> ScoreReport {
    let symmetry = symmetry_scorer::score(landmarks);
    let jawline = jawline_scorer::score(landmarks);
    let skin_quality = skin_quality_scorer::score(frame);
    let proportion = proportion_scorer::score(landmarks);
    score_aggregator::aggregate(symmetry, jawline, skin_quality, proportion)
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
