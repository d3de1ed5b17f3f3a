use std::path::{Path, PathBuf};

use crate::config::BatchConfig;
use crate::error::JobError;

/// One source file paired with the output path it converts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl ConversionJob {
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_path.parent()
    }
}

/// Mirrors `file` from the input tree into the output tree and swaps its extension.
///
/// The source extension is matched case-insensitively here, so `a/b/c.vob` and
/// `a/b/c.VOB` both become `a/b/c.mp4` under the output root.
pub fn plan_job(file: &Path, config: &BatchConfig) -> Result<ConversionJob, JobError> {
    let relative = file
        .strip_prefix(&config.input_root)
        .map_err(|_| JobError::OutsideInputRoot {
            path: file.to_path_buf(),
            root: config.input_root.clone(),
        })?;

    let mut output_path = config.output_root.join(relative);
    let Some(file_name) = relative.file_name() else {
        return Ok(ConversionJob {
            input_path: file.to_path_buf(),
            output_path,
        });
    };

    let source_bare = config.source_extension.trim_start_matches('.');
    let target_bare = config.target_extension.trim_start_matches('.');
    let single_component = !source_bare.contains('.');

    // Work on the raw name when possible so non-UTF-8 names still convert.
    let matches_source = relative.extension().is_some_and(|ext| {
        ext.as_encoded_bytes()
            .eq_ignore_ascii_case(source_bare.as_bytes())
    });
    if single_component && matches_source {
        output_path.set_extension(target_bare);
    } else if let Some(name) = file_name.to_str() {
        output_path.set_file_name(replace_extension(
            name,
            &config.source_extension,
            &config.target_extension,
        ));
    } else if !single_component {
        return Err(JobError::NonUtf8FileName(file.to_path_buf()));
    }

    Ok(ConversionJob {
        input_path: file.to_path_buf(),
        output_path,
    })
}

fn replace_extension(file_name: &str, from: &str, to: &str) -> String {
    if file_name.len() >= from.len() {
        let split = file_name.len() - from.len();
        if file_name.is_char_boundary(split) && file_name[split..].eq_ignore_ascii_case(from) {
            return format!("{}{}", &file_name[..split], to);
        }
    }
    file_name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BatchConfig {
        BatchConfig {
            input_root: PathBuf::from("/media/originals"),
            output_root: PathBuf::from("/media/converted"),
            ..BatchConfig::default()
        }
    }

    #[test]
    fn test_mirrors_nested_directories() {
        let job = plan_job(Path::new("/media/originals/a/b/c.VOB"), &config()).unwrap();
        assert_eq!(job.input_path, PathBuf::from("/media/originals/a/b/c.VOB"));
        assert_eq!(job.output_path, PathBuf::from("/media/converted/a/b/c.mp4"));
        assert_eq!(job.output_dir(), Some(Path::new("/media/converted/a/b")));
    }

    #[test]
    fn test_top_level_file() {
        let job = plan_job(Path::new("/media/originals/VTS_01_1.VOB"), &config()).unwrap();
        assert_eq!(job.output_path, PathBuf::from("/media/converted/VTS_01_1.mp4"));
    }

    #[test]
    fn test_extension_replacement_ignores_case() {
        let job = plan_job(Path::new("/media/originals/x/clip.vob"), &config()).unwrap();
        assert_eq!(job.output_path, PathBuf::from("/media/converted/x/clip.mp4"));

        let job = plan_job(Path::new("/media/originals/x/clip.Vob"), &config()).unwrap();
        assert_eq!(job.output_path, PathBuf::from("/media/converted/x/clip.mp4"));
    }

    #[test]
    fn test_only_the_final_extension_is_replaced() {
        let job = plan_job(Path::new("/media/originals/d.VOB/e.VOB.VOB"), &config()).unwrap();
        assert_eq!(job.output_path, PathBuf::from("/media/converted/d.VOB/e.VOB.mp4"));
    }

    #[test]
    fn test_name_without_source_extension_is_kept() {
        let job = plan_job(Path::new("/media/originals/x/readme.txt"), &config()).unwrap();
        assert_eq!(job.output_path, PathBuf::from("/media/converted/x/readme.txt"));
    }

    #[test]
    fn test_file_outside_input_root_is_rejected() {
        let result = plan_job(Path::new("/elsewhere/c.VOB"), &config());
        assert!(matches!(result, Err(JobError::OutsideInputRoot { .. })));
    }

    #[test]
    fn test_custom_target_extension() {
        let config = BatchConfig {
            source_extension: ".mkv".to_string(),
            target_extension: ".m4v".to_string(),
            ..config()
        };
        let job = plan_job(Path::new("/media/originals/show/s01e01.MKV"), &config).unwrap();
        assert_eq!(job.output_path, PathBuf::from("/media/converted/show/s01e01.m4v"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_is_mapped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new("/media/originals/disc").join(OsStr::from_bytes(b"caf\xE9.VOB"));
        let job = plan_job(&input, &config()).unwrap();
        assert_eq!(
            job.output_path,
            Path::new("/media/converted/disc").join(OsStr::from_bytes(b"caf\xE9.mp4"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_with_dotted_source_extension_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let config = BatchConfig {
            source_extension: ".part.VOB".to_string(),
            ..config()
        };
        let input = Path::new("/media/originals").join(OsStr::from_bytes(b"caf\xE9.part.VOB"));
        let result = plan_job(&input, &config);
        assert!(matches!(result, Err(JobError::NonUtf8FileName(_))));
    }

    #[test]
    fn test_dotted_source_extension_is_replaced_whole() {
        let config = BatchConfig {
            source_extension: ".part.VOB".to_string(),
            ..config()
        };
        let job = plan_job(Path::new("/media/originals/a/clip.PART.vob"), &config).unwrap();
        assert_eq!(job.output_path, PathBuf::from("/media/converted/a/clip.mp4"));
    }

    #[test]
    fn test_hidden_file_named_like_extension() {
        let job = plan_job(Path::new("/media/originals/x/.VOB"), &config()).unwrap();
        assert_eq!(job.output_path, PathBuf::from("/media/converted/x/.mp4"));
    }

    #[test]
    fn test_replace_extension_multibyte_names() {
        assert_eq!(replace_extension("été.VOB", ".VOB", ".mp4"), "été.mp4");
        assert_eq!(replace_extension("é", ".VOB", ".mp4"), "é");
        assert_eq!(replace_extension("ab€", "x€", ".mp4"), "ab€");
    }
}
