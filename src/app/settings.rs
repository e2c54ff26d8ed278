//! Pipeline settings passed into the controller at construction

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::utils::path::parse_resolution;

/// Default range config file name. The content is line text, not JSON; the
/// name is kept so existing setups keep working.
pub const DEFAULT_RANGES_FILE: &str = "config.json";
pub const DEFAULT_ENGINE: &str = "ffmpeg";
pub const DEFAULT_RESOLUTION: &str = "1280x720";
pub const DEFAULT_VIDEO_BITRATE: &str = "1500k";
pub const DEFAULT_SEGMENT_EXTENSION: &str = "mp4";

/// How many segment extractions may run at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawConcurrency", into = "String")]
pub enum Concurrency {
    /// One task per range, all at once
    #[default]
    Unbounded,
    /// One task per logical CPU
    Auto,
    /// At most this many (never zero)
    Limit(usize),
}

impl Concurrency {
    /// Permit count, or `None` when unbounded
    pub fn limit(&self) -> Option<usize> {
        match self {
            Concurrency::Unbounded => None,
            Concurrency::Auto => Some(num_cpus::get().max(1)),
            Concurrency::Limit(n) => Some(*n),
        }
    }
}

impl FromStr for Concurrency {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unbounded" => Ok(Concurrency::Unbounded),
            "auto" => Ok(Concurrency::Auto),
            other => match other.parse::<usize>() {
                Ok(0) => Err(PipelineError::BadArgs(
                    "Extraction concurrency must be at least 1".to_string(),
                )),
                Ok(n) => Ok(Concurrency::Limit(n)),
                Err(_) => Err(PipelineError::BadArgs(format!(
                    "Invalid concurrency '{}'. Valid values: unbounded, auto, or a positive integer",
                    s
                ))),
            },
        }
    }
}

impl fmt::Display for Concurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concurrency::Unbounded => write!(f, "unbounded"),
            Concurrency::Auto => write!(f, "auto"),
            Concurrency::Limit(n) => write!(f, "{}", n),
        }
    }
}

impl From<Concurrency> for String {
    fn from(value: Concurrency) -> Self {
        value.to_string()
    }
}

/// Concurrency as written in a settings file: a number or a keyword
#[derive(Deserialize)]
#[serde(untagged)]
enum RawConcurrency {
    Number(usize),
    Text(String),
}

impl TryFrom<RawConcurrency> for Concurrency {
    type Error = PipelineError;

    fn try_from(raw: RawConcurrency) -> Result<Self, Self::Error> {
        match raw {
            RawConcurrency::Number(n) => n.to_string().parse(),
            RawConcurrency::Text(s) => s.parse(),
        }
    }
}

/// Everything one pipeline run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub ranges_path: PathBuf,
    /// Directory the `<stem>_tmp` working directory is created in
    pub work_root: PathBuf,
    pub engine: PathBuf,
    pub resolution: String,
    pub video_bitrate: String,
    pub segment_extension: String,
    pub concurrency: Concurrency,
    /// Remove the working directory after a successful run
    pub cleanup_work_dir: bool,
    pub dry_run: bool,
}

impl PipelineSettings {
    /// Settings with defaults for everything but the input and output
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ranges_path: PathBuf::from(DEFAULT_RANGES_FILE),
            work_root: PathBuf::from("."),
            engine: PathBuf::from(DEFAULT_ENGINE),
            resolution: DEFAULT_RESOLUTION.to_string(),
            video_bitrate: DEFAULT_VIDEO_BITRATE.to_string(),
            segment_extension: DEFAULT_SEGMENT_EXTENSION.to_string(),
            concurrency: Concurrency::Unbounded,
            cleanup_work_dir: false,
            dry_run: false,
        }
    }

    /// Validate settings before any work starts
    pub fn validate(&self) -> PipelineResult<()> {
        if self.input.as_os_str().is_empty() {
            return Err(PipelineError::BadArgs("no input file".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(PipelineError::BadArgs("no output file".to_string()));
        }
        if self.engine.as_os_str().is_empty() {
            return Err(PipelineError::BadArgs("engine program is empty".to_string()));
        }
        parse_resolution(&self.resolution)?;
        if self.video_bitrate.trim().is_empty() {
            return Err(PipelineError::BadArgs("video bitrate is empty".to_string()));
        }
        if self.segment_extension.is_empty() || self.segment_extension.contains(['/', '\\', '.']) {
            return Err(PipelineError::BadArgs(format!(
                "Invalid segment extension '{}'",
                self.segment_extension
            )));
        }
        if let Concurrency::Limit(0) = self.concurrency {
            return Err(PipelineError::BadArgs(
                "Extraction concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_behavior() {
        let settings = PipelineSettings::new("movie.mkv", "clip.mp4");
        assert_eq!(settings.ranges_path, PathBuf::from("config.json"));
        assert_eq!(settings.concurrency, Concurrency::Unbounded);
        assert!(!settings.cleanup_work_dir);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_input_or_output_is_rejected() {
        let no_input = PipelineSettings::new("", "clip.mp4");
        assert!(matches!(no_input.validate(), Err(PipelineError::BadArgs(m)) if m == "no input file"));

        let no_output = PipelineSettings::new("movie.mkv", "");
        assert!(matches!(no_output.validate(), Err(PipelineError::BadArgs(m)) if m == "no output file"));
    }

    #[test]
    fn test_bad_resolution_and_extension_rejected() {
        let mut settings = PipelineSettings::new("movie.mkv", "clip.mp4");
        settings.resolution = "720p".to_string();
        assert!(settings.validate().is_err());

        let mut settings = PipelineSettings::new("movie.mkv", "clip.mp4");
        settings.segment_extension = ".mp4".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_concurrency_parsing() {
        assert_eq!("unbounded".parse::<Concurrency>().unwrap(), Concurrency::Unbounded);
        assert_eq!("AUTO".parse::<Concurrency>().unwrap(), Concurrency::Auto);
        assert_eq!("4".parse::<Concurrency>().unwrap(), Concurrency::Limit(4));
        assert!("0".parse::<Concurrency>().is_err());
        assert!("many".parse::<Concurrency>().is_err());
    }

    #[test]
    fn test_concurrency_limits() {
        assert_eq!(Concurrency::Unbounded.limit(), None);
        assert_eq!(Concurrency::Limit(3).limit(), Some(3));
        assert!(Concurrency::Auto.limit().unwrap() >= 1);
    }
}
