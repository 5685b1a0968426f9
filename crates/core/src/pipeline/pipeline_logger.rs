use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Observer for analysis events: stage timings, metrics, batch progress.
///
/// Shared by concurrent analyses, so every method takes `&self`.
pub trait PipelineLogger: Send + Sync {
    /// Report how many inputs of a batch have finished.
    fn progress(&self, current: usize, total: usize);

    /// Record how long a named stage took for one image.
    fn timing(&self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces found).
    fn metric(&self, name: &str, value: f64);

    fn info(&self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&self, _current: usize, _total: usize) {}
    fn timing(&self, _stage: &str, _duration_ms: f64) {}
    fn metric(&self, _name: &str, _value: f64) {}
    fn info(&self, _message: &str) {}
}

#[derive(Default)]
struct Recorded {
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    completed: usize,
}

/// Forwards events to the `log` facade and keeps per-stage statistics for
/// an end-of-run summary.
pub struct LogPipelineLogger {
    recorded: Mutex<Recorded>,
    start_time: Instant,
}

impl LogPipelineLogger {
    pub fn new() -> Self {
        Self {
            recorded: Mutex::new(Recorded::default()),
            start_time: Instant::now(),
        }
    }

    fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        let recorded = self.recorded();
        if recorded.timings.is_empty() && recorded.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Analysis summary ({} images, {:.1}s total):",
            recorded.completed,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = recorded.timings.iter().collect();
        stages.sort_by(|a, b| a.0.cmp(b.0));
        for (stage, durations) in stages {
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:7.1}ms  total {total_ms:8.0}ms"
            ));
        }

        let mut metrics: Vec<_> = recorded.metrics.iter().collect();
        metrics.sort_by(|a, b| a.0.cmp(b.0));
        for (name, values) in metrics {
            let avg = values.iter().sum::<f64>() / values.len().max(1) as f64;
            lines.push(format!("  {name}: avg {avg:.1}"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<Vec<f64>> {
        self.recorded().timings.get(stage).cloned()
    }

    pub fn metrics_for(&self, name: &str) -> Option<Vec<f64>> {
        self.recorded().metrics.get(name).cloned()
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn progress(&self, current: usize, total: usize) {
        self.recorded().completed = current;
        log::info!("Analyzed {current}/{total} images");
    }

    fn timing(&self, stage: &str, duration_ms: f64) {
        log::debug!("{stage} took {duration_ms:.1}ms");
        self.recorded()
            .timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&self, name: &str, value: f64) {
        self.recorded()
            .metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let logger = NullPipelineLogger;
        logger.progress(1, 10);
        logger.timing("detect", 5.0);
        logger.metric("faces", 1.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values() {
        let logger = LogPipelineLogger::new();
        logger.timing("detect", 20.0);
        logger.timing("detect", 30.0);
        logger.timing("score", 5.0);

        assert_eq!(logger.timings_for("detect").unwrap(), vec![20.0, 30.0]);
        assert_eq!(logger.timings_for("score").unwrap(), vec![5.0]);
        assert!(logger.timings_for("decode").is_none());
    }

    #[test]
    fn test_metric_records_values() {
        let logger = LogPipelineLogger::new();
        logger.metric("faces", 1.0);
        logger.metric("faces", 2.0);
        assert_eq!(logger.metrics_for("faces").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_summary_lists_stages_and_metrics() {
        let logger = LogPipelineLogger::new();
        logger.progress(2, 2);
        logger.timing("decode", 4.0);
        logger.timing("detect", 10.0);
        logger.metric("faces", 1.0);
        logger.metric("faces", 2.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Analysis summary (2 images"));
        assert!(summary.contains("decode"));
        assert!(summary.contains("detect"));
        assert!(summary.contains("faces: avg 1.5"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        assert!(LogPipelineLogger::new().summary_string().is_none());
    }

    #[test]
    fn test_concurrent_recording() {
        let logger = std::sync::Arc::new(LogPipelineLogger::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let logger = logger.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        logger.timing("score", 1.0);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(logger.timings_for("score").unwrap().len(), 100);
    }
}
