use std::path::PathBuf;

use clap::Parser;

use crate::config::{BatchConfig, load_config};
use crate::error::ConfigError;

/// Convert every matching video under an input tree into a mirrored output tree.
#[derive(Debug, Parser)]
#[command(name = "batch-transcoder", version)]
pub struct Cli {
    /// TOML configuration file. Environment variables (BATCH_TRANSCODER_*) override it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Root of the tree to scan for source files.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Root of the mirrored output tree.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extension of eligible source files, matched case-sensitively (e.g. .VOB).
    #[arg(long)]
    pub source_ext: Option<String>,

    /// File name to skip even though it has the source extension.
    #[arg(long)]
    pub exclude: Option<String>,

    /// Extension given to converted files.
    #[arg(long)]
    pub target_ext: Option<String>,

    /// Encoder executable, looked up on PATH.
    #[arg(long)]
    pub encoder: Option<String>,

    /// Encoder preset passed through after -Z.
    #[arg(short = 'Z', long)]
    pub profile: Option<String>,

    /// Log the planned encoder commands without running them.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Layers the flags on top of the file and environment configuration, then validates.
    pub fn into_config(self) -> Result<BatchConfig, ConfigError> {
        let base = load_config(self.config.as_deref())?;
        self.apply(base).validated()
    }

    fn apply(self, mut config: BatchConfig) -> BatchConfig {
        if let Some(input) = self.input {
            config.input_root = input;
        }
        if let Some(output) = self.output {
            config.output_root = output;
        }
        if let Some(ext) = self.source_ext {
            config.source_extension = ext;
        }
        if let Some(name) = self.exclude {
            config.excluded_file_name = name;
        }
        if let Some(ext) = self.target_ext {
            config.target_extension = ext;
        }
        if let Some(program) = self.encoder {
            config.encoder_program = program;
        }
        if let Some(profile) = self.profile {
            config.encoder_profile = profile;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        config
    }
}
