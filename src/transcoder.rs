use std::process::{Command, Stdio};

use log::{debug, error, info, trace};

use crate::config::BatchConfig;
use crate::error::JobError;
use crate::job::ConversionJob;

/// Builds `<program> -i <input> -o <output> -Z <profile>` with the parent's stdio attached,
/// so encoder progress shows up live on the operator's console.
pub fn encoder_command(job: &ConversionJob, config: &BatchConfig) -> Command {
    let mut cmd = Command::new(&config.encoder_program);
    cmd.arg("-i");
    cmd.arg(job.input_path.as_os_str());
    cmd.arg("-o");
    cmd.arg(job.output_path.as_os_str());
    cmd.arg("-Z");
    cmd.arg(&config.encoder_profile);
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    cmd
}

/// Creates the output directory tree for `job`, then runs the encoder and blocks until it exits.
///
/// There is no timeout: a hung encoder holds up the caller until it is killed externally.
pub fn transcode_file(job: &ConversionJob, config: &BatchConfig) -> Result<(), JobError> {
    if let Some(parent_dir) = job.output_dir() {
        if !parent_dir.exists() {
            match std::fs::create_dir_all(parent_dir) {
                Ok(_) => info!("Created output directory: {:?}", parent_dir),
                Err(e) => {
                    error!("Failed to create output directory {:?}: {}", parent_dir, e);
                    return Err(JobError::OutputDirectory {
                        dir: parent_dir.to_path_buf(),
                        source: e,
                    });
                }
            }
        }
    }

    info!(
        "Starting transcoding: {:?} -> {:?}",
        job.input_path, job.output_path
    );
    debug!("Encoder profile: {:?}", config.encoder_profile);

    let mut cmd = encoder_command(job, config);
    trace!("Executing encoder command: {:?}", cmd);

    match cmd.status() {
        Ok(status) if status.success() => {
            info!(
                "Transcoding successful: {:?} -> {:?}",
                job.input_path, job.output_path
            );
            Ok(())
        }
        Ok(status) => {
            error!(
                "{} exited with {} for {:?}. Check encoder output above for details.",
                config.encoder_program, status, job.input_path
            );
            Err(JobError::EncoderExit { status })
        }
        Err(e) => {
            error!(
                "Failed to execute {} for {:?}: {}",
                config.encoder_program, job.input_path, e
            );
            Err(JobError::EncoderLaunch {
                program: config.encoder_program.clone(),
                source: e,
            })
        }
    }
}
