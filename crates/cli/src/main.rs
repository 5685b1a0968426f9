use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use facescore_core::detection::domain::landmark_detector::LandmarkDetector;
use facescore_core::detection::infrastructure::availability_detector::AvailabilityDetector;
use facescore_core::detection::infrastructure::onnx_face_locator::{
    OnnxFaceLocator, DEFAULT_CONFIDENCE,
};
use facescore_core::detection::infrastructure::onnx_landmark_detector::OnnxLandmarkDetector;
use facescore_core::imaging::infrastructure::image_crate_decoder::ImageCrateDecoder;
use facescore_core::pipeline::analysis_response::AnalysisResponse;
use facescore_core::pipeline::analyze_face_use_case::AnalyzeFaceUseCase;
use facescore_core::pipeline::batch_analyzer::BatchAnalyzer;
use facescore_core::pipeline::infrastructure::threaded_batch_analyzer::ThreadedBatchAnalyzer;
use facescore_core::pipeline::pipeline_logger::{LogPipelineLogger, PipelineLogger};
use facescore_core::shared::constants::{
    FACE_MODEL_NAME, FACE_MODEL_URL, IMAGE_EXTENSIONS, LANDMARK_MODEL_NAME,
};
use facescore_core::shared::model_resolver::ModelResolver;

/// Score facial geometry in photographs.
///
/// Prints one JSON object per input, in input order.
#[derive(Parser)]
#[command(name = "facescore")]
struct Cli {
    /// Input image files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Face detection ONNX model (default: cached or downloaded).
    #[arg(long)]
    face_model: Option<PathBuf>,

    /// 68-point landmark ONNX model (default: model cache).
    #[arg(long)]
    landmark_model: Option<PathBuf>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Number of images analyzed in parallel.
    #[arg(long, default_value = "1")]
    workers: usize,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    for input in cli.inputs.iter().filter(|p| !is_image(p)) {
        log::warn!("{} does not have an image extension", input.display());
    }

    let logger = Arc::new(LogPipelineLogger::new());
    let detector = build_detector(&cli);
    logger.info(&startup_message(&cli, detector.is_available()));
    let detector: Arc<dyn LandmarkDetector> = Arc::new(detector);
    let use_case = Arc::new(AnalyzeFaceUseCase::new(
        Box::new(ImageCrateDecoder::new()),
        detector,
        logger.clone(),
    ));

    let analyzer = ThreadedBatchAnalyzer::new(cli.workers, logger.clone());
    let results = analyzer.analyze_all(use_case, cli.inputs.clone())?;

    for result in results {
        let response = AnalysisResponse::from(result);
        let json = if cli.pretty {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        };
        println!("{json}");
    }

    logger.summary();
    Ok(())
}

/// Loads the two-stage ONNX detector. Failures are logged and leave the
/// detector unavailable, so every image reports no face.
fn build_detector(cli: &Cli) -> AvailabilityDetector {
    let face_model = cli.face_model.clone();
    let landmark_model = cli.landmark_model.clone();
    let confidence = cli.confidence;

    AvailabilityDetector::load(Box::new(
        move || -> Result<Box<dyn LandmarkDetector>, Box<dyn std::error::Error>> {
            let resolver = ModelResolver::with_platform_cache(None)?;
            let face_path = match face_model {
                Some(path) => path,
                None => {
                    log::info!("Resolving model: {FACE_MODEL_NAME}");
                    let path = resolver.resolve(
                        FACE_MODEL_NAME,
                        Some(FACE_MODEL_URL),
                        Some(Box::new(download_progress)),
                    )?;
                    eprintln!();
                    path
                }
            };
            let landmark_path = match landmark_model {
                Some(path) => path,
                None => resolver.resolve(LANDMARK_MODEL_NAME, None, None)?,
            };

            let locator = OnnxFaceLocator::new(&face_path, confidence)?;
            Ok(Box::new(OnnxLandmarkDetector::new(locator, &landmark_path)?))
        },
    ))
}

fn startup_message(cli: &Cli, detector_available: bool) -> String {
    let mut message = format!(
        "Analyzing {} image(s) with {} worker(s)",
        cli.inputs.len(),
        cli.workers
    );
    if !detector_available {
        message.push_str("; landmark detector unavailable, every image will report no face");
    }
    message
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if cli.workers == 0 {
        return Err("Workers must be at least 1".into());
    }
    for (flag, path) in [
        ("--face-model", &cli.face_model),
        ("--landmark-model", &cli.landmark_model),
    ] {
        if let Some(path) = path {
            if !path.exists() {
                return Err(format!("{flag} file not found: {}", path.display()).into());
            }
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}
