use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_PREFIX: &str = "BATCH_TRANSCODER_";

/// Fields whose environment values are taken verbatim. figment would otherwise read
/// `2024` as a number and `[disc 1]` as an array.
const TEXT_KEYS: &[&str] = &[
    "input_root",
    "output_root",
    "source_extension",
    "excluded_file_name",
    "target_extension",
    "encoder_program",
    "encoder_profile",
];

pub const DEFAULT_SOURCE_EXTENSION: &str = ".VOB";
pub const DEFAULT_EXCLUDED_FILE_NAME: &str = "VIDEO_TS.VOB";
pub const DEFAULT_TARGET_EXTENSION: &str = ".mp4";
pub const DEFAULT_ENCODER_PROGRAM: &str = "HandBrakeCLI";
pub const DEFAULT_ENCODER_PROFILE: &str = "H.265 Apple VideoToolbox 1080p";

/// Everything a batch run needs, built once at startup and passed down by reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    /// Suffix of eligible input files, matched case-sensitively during discovery.
    pub source_extension: String,
    /// Base name skipped even though it carries the source extension.
    pub excluded_file_name: String,
    pub target_extension: String,
    pub encoder_program: String,
    /// Passed to the encoder unchanged after `-Z`.
    pub encoder_profile: String,
    pub dry_run: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            input_root: PathBuf::new(),
            output_root: PathBuf::new(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            excluded_file_name: DEFAULT_EXCLUDED_FILE_NAME.to_string(),
            target_extension: DEFAULT_TARGET_EXTENSION.to_string(),
            encoder_program: DEFAULT_ENCODER_PROGRAM.to_string(),
            encoder_profile: DEFAULT_ENCODER_PROFILE.to_string(),
            dry_run: false,
        }
    }
}

impl BatchConfig {
    /// Checks the configuration and normalises it for use: roots become absolute,
    /// extensions gain a leading dot.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.input_root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("input_root is not set".to_string()));
        }
        if self.output_root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output_root is not set".to_string()));
        }

        self.input_root = absolute(&self.input_root)?;
        self.output_root = absolute(&self.output_root)?;
        if self.input_root == self.output_root {
            return Err(ConfigError::Invalid(format!(
                "input_root and output_root are the same directory: {:?}",
                self.input_root
            )));
        }

        self.source_extension = normalize_extension("source_extension", &self.source_extension)?;
        self.target_extension = normalize_extension("target_extension", &self.target_extension)?;

        if self.encoder_program.trim().is_empty() {
            return Err(ConfigError::Invalid("encoder_program is empty".to_string()));
        }
        if self.encoder_profile.trim().is_empty() {
            return Err(ConfigError::Invalid("encoder_profile is empty".to_string()));
        }

        Ok(self)
    }
}

fn absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(path)
        .map_err(|e| ConfigError::Invalid(format!("Cannot resolve path {:?}: {}", path, e)))
}

fn normalize_extension(field: &str, ext: &str) -> Result<String, ConfigError> {
    let ext = ext.trim();
    let bare = ext.strip_prefix('.').unwrap_or(ext);
    if bare.is_empty() {
        return Err(ConfigError::Invalid(format!("{} is empty", field)));
    }
    Ok(format!(".{}", bare))
}

/// Loads defaults, then the optional TOML file, then `BATCH_TRANSCODER_*` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<BatchConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(BatchConfig::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX).ignore(TEXT_KEYS))
        .merge(Serialized::defaults(text_env_overrides()))
        .extract()
        .map_err(|e| ConfigError::Parse(e.to_string()))
}

fn text_env_overrides() -> BTreeMap<String, String> {
    Env::prefixed(ENV_PREFIX)
        .only(TEXT_KEYS)
        .iter()
        .map(|(key, value)| (key.as_str().to_string(), value))
        .collect()
}
