use serde::Serialize;

use crate::pipeline::analysis_error::AnalysisError;
use crate::scoring::score_report::{Rating, ScoreReport};

/// JSON body returned to clients for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Report(ReportPayload),
    Error { error: String },
}

/// Report scores rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub symmetry: f64,
    pub jawline: f64,
    pub skin_quality: f64,
    #[serde(rename = "facialRatios")]
    pub proportion: f64,
    pub final_score: f64,
    pub rating: Rating,
    pub recommendations: Vec<String>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl From<&ScoreReport> for ReportPayload {
    fn from(report: &ScoreReport) -> Self {
        Self {
            symmetry: round2(report.symmetry()),
            jawline: round2(report.jawline()),
            skin_quality: round2(report.skin_quality()),
            proportion: round2(report.proportion()),
            final_score: round2(report.final_score()),
            rating: report.rating(),
            recommendations: report.recommendations().to_vec(),
        }
    }
}

impl From<Result<ScoreReport, AnalysisError>> for AnalysisResponse {
    fn from(result: Result<ScoreReport, AnalysisError>) -> Self {
        match result {
            Ok(report) => AnalysisResponse::Report(ReportPayload::from(&report)),
            Err(e) => AnalysisResponse::Error {
                error: e.to_string(),
            },
        }
    }
}
