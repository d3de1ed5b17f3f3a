pub mod batch;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod job;
pub mod transcoder;

#[cfg(test)]
mod test_support;

pub use batch::{BatchReport, FailedFile, run_batch};
pub use config::{BatchConfig, load_config};
pub use discovery::find_source_files;
pub use error::{ConfigError, DiscoveryError, JobError};
pub use job::{ConversionJob, plan_job};

// Helper to get hostname or a default
pub fn get_hostname() -> String {
    hostname::get()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown-host".to_string())
}

/// Label identifying one run in the console output, `batch-<host>-<uuid>`.
pub fn batch_label() -> String {
    format!("batch-{}-{}", get_hostname(), uuid::Uuid::new_v4())
}
