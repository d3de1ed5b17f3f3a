use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Problems building a [`crate::config::BatchConfig`]. All of them stop the run before discovery.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    FileNotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Discovery failures abort the whole run; no partial file list is used.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Input root is not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("Failed to walk input tree {root:?}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Per-file failures. The batch loop records these and moves on to the next file.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("{path:?} is not under the input root {root:?}")]
    OutsideInputRoot { path: PathBuf, root: PathBuf },

    #[error("File name is not valid UTF-8: {0:?}")]
    NonUtf8FileName(PathBuf),

    #[error("Failed to create output directory {dir:?}: {source}")]
    OutputDirectory {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to launch encoder '{program}': {source}")]
    EncoderLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Encoder exited with {status}")]
    EncoderExit { status: ExitStatus },

    #[error("Conversion task failed (panic/cancellation): {0}")]
    Task(String),
}
