use std::path::PathBuf;
use std::sync::Arc;

use crate::pipeline::analysis_error::AnalysisError;
use crate::pipeline::analyze_face_use_case::AnalyzeFaceUseCase;
use crate::scoring::score_report::ScoreReport;

pub type AnalysisResult = Result<ScoreReport, AnalysisError>;

/// Runs one analysis per input path.
///
/// Implementations return exactly one result per input, in input order.
/// The outer error is reserved for executor failures (e.g. a worker panic).
pub trait BatchAnalyzer {
    fn analyze_all(
        &self,
        use_case: Arc<AnalyzeFaceUseCase>,
        inputs: Vec<PathBuf>,
    ) -> Result<Vec<AnalysisResult>, Box<dyn std::error::Error>>;
}
