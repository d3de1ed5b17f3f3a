use std::path::{Path, PathBuf};

use log::{error, info};

use crate::config::BatchConfig;
use crate::error::JobError;
use crate::job::plan_job;
use crate::transcoder::{encoder_command, transcode_file};

#[derive(Debug)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: JobError,
}

/// Outcome of one batch run. Every processed file lands in exactly one of
/// `succeeded` or `failed`.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    pub fn new(total: usize) -> Self {
        BatchReport {
            total,
            ..Default::default()
        }
    }

    pub fn record(&mut self, path: &Path, outcome: Result<(), JobError>) {
        match outcome {
            Ok(()) => self.succeeded += 1,
            Err(error) => self.failed.push(FailedFile {
                path: path.to_path_buf(),
                error,
            }),
        }
    }

    pub fn processed(&self) -> usize {
        self.succeeded + self.failed.len()
    }

    pub fn failed_paths(&self) -> Vec<&Path> {
        self.failed.iter().map(|f| f.path.as_path()).collect()
    }

    /// Completion marker, then every failed path in a single record.
    pub fn log_summary(&self) {
        info!(
            "Processing complete: {} of {} file(s) converted, {} failed",
            self.succeeded,
            self.total,
            self.failed.len()
        );

        if !self.failed.is_empty() {
            let listing = self
                .failed
                .iter()
                .map(|f| format!("  {:?}: {}", f.path, f.error))
                .collect::<Vec<_>>()
                .join("\n");
            error!("The following files failed to process:\n{}", listing);
        }
    }
}

/// Converts `files` one at a time. The next encoder is not started until the previous one
/// has exited, and a failure never stops the loop.
pub async fn run_batch(files: &[PathBuf], config: &BatchConfig) -> BatchReport {
    let total = files.len();
    let mut report = BatchReport::new(total);

    for (index, file) in files.iter().enumerate() {
        info!("==== Processing file {} of {}: {:?} ====", index + 1, total, file);

        let outcome = convert_file(file, config).await;
        report.record(file, outcome);
    }

    report
}

/// Plans the job for `file` and runs the encoder on the blocking pool.
///
/// Each failure is logged once, where it happens; encoder failures are logged by
/// [`transcode_file`].
pub async fn convert_file(file: &Path, config: &BatchConfig) -> Result<(), JobError> {
    let job = plan_job(file, config).map_err(|e| {
        error!("Cannot plan conversion for {:?}: {}", file, e);
        e
    })?;

    if config.dry_run {
        info!("Dry run, not executing: {:?}", encoder_command(&job, config));
        return Ok(());
    }

    let config_clone = config.clone();
    match tokio::task::spawn_blocking(move || transcode_file(&job, &config_clone)).await {
        Ok(result) => result,
        Err(join_err) => {
            error!(
                "Conversion task for {:?} failed (panic/cancellation): {}",
                file, join_err
            );
            Err(JobError::Task(join_err.to_string()))
        }
    }
}
