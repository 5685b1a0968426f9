use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::pipeline::analyze_face_use_case::AnalyzeFaceUseCase;
use crate::pipeline::batch_analyzer::{AnalysisResult, BatchAnalyzer};
use crate::pipeline::pipeline_logger::PipelineLogger;

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

/// Fans inputs out to a fixed pool of worker threads.
///
/// Layout: `main [enqueue] → workers [execute_path] → main [reorder]`
///
/// Workers share one use case; each result is tagged with its input index
/// so the output order does not depend on scheduling.
pub struct ThreadedBatchAnalyzer {
    workers: usize,
    channel_capacity: usize,
    logger: Arc<dyn PipelineLogger>,
}

impl ThreadedBatchAnalyzer {
    pub fn new(workers: usize, logger: Arc<dyn PipelineLogger>) -> Self {
        Self {
            workers: workers.max(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            logger,
        }
    }
}

impl BatchAnalyzer for ThreadedBatchAnalyzer {
    fn analyze_all(
        &self,
        use_case: Arc<AnalyzeFaceUseCase>,
        inputs: Vec<PathBuf>,
    ) -> Result<Vec<AnalysisResult>, Box<dyn std::error::Error>> {
        let total = inputs.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let (job_tx, job_rx) = crossbeam_channel::bounded::<(usize, PathBuf)>(self.channel_capacity);
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<(usize, AnalysisResult)>();

        let handles: Vec<JoinHandle<()>> = (0..self.workers.min(total))
            .map(|_| spawn_worker(use_case.clone(), job_rx.clone(), result_tx.clone()))
            .collect();
        drop(job_rx);
        drop(result_tx);

        let feeder = std::thread::spawn(move || {
            for job in inputs.into_iter().enumerate() {
                if job_tx.send(job).is_err() {
                    break;
                }
            }
        });

        let mut slots: Vec<Option<AnalysisResult>> = vec![None; total];
        let mut completed = 0;
        for (index, result) in result_rx {
            slots[index] = Some(result);
            completed += 1;
            self.logger.progress(completed, total);
        }

        join_threads(feeder, handles)?;

        slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| -> Box<dyn std::error::Error> {
                    format!("no result for input {i}").into()
                })
            })
            .collect()
    }
}

fn spawn_worker(
    use_case: Arc<AnalyzeFaceUseCase>,
    job_rx: crossbeam_channel::Receiver<(usize, PathBuf)>,
    result_tx: crossbeam_channel::Sender<(usize, AnalysisResult)>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for (index, path) in job_rx {
            log::debug!("Analyzing {}", path.display());
            let result = use_case.execute_path(&path);
            if result_tx.send((index, result)).is_err() {
                break;
            }
        }
    })
}

fn join_threads(
    feeder: JoinHandle<()>,
    workers: Vec<JoinHandle<()>>,
) -> Result<(), Box<dyn std::error::Error>> {
    feeder.join().map_err(|_| "feeder thread panicked")?;
    for handle in workers {
        handle.join().map_err(|_| "analysis worker panicked")?;
    }
    Ok(())
}
