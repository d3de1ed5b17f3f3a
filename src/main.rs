use batch_transcoder::cli::Cli;
use batch_transcoder::{batch_label, find_source_files, run_batch};
use clap::Parser;
use log::{debug, error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config().map_err(|e| {
        error!("{}", e);
        e
    })?;

    let label = batch_label();
    info!(
        "Starting {}: {:?} -> {:?}",
        label, config.input_root, config.output_root
    );
    debug!("Configuration: {:?}", config);

    // Discovery runs to completion before the first encoder starts.
    let files = find_source_files(&config).map_err(|e| {
        error!("Discovery failed: {}. Exiting.", e);
        e
    })?;

    let report = run_batch(&files, &config).await;
    report.log_summary();

    info!("{} finished.", label);
    Ok(())
}
