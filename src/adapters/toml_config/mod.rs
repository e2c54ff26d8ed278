// TOML settings adapter - Optional settings file under a [pipeline] table

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::app::settings::{Concurrency, PipelineSettings};
use crate::error::{PipelineError, PipelineResult};

/// Settings file layout
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub pipeline: PipelineSection,
}

/// `[pipeline]` table; every key is optional and overrides the built-in default
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineSection {
    pub ranges: Option<PathBuf>,
    pub work_root: Option<PathBuf>,
    pub engine: Option<PathBuf>,
    pub resolution: Option<String>,
    pub video_bitrate: Option<String>,
    pub segment_extension: Option<String>,
    pub max_concurrent_extractions: Option<Concurrency>,
    pub cleanup_work_dir: Option<bool>,
}

/// TOML settings adapter
pub struct TomlSettingsAdapter;

impl TomlSettingsAdapter {
    /// Read and parse a settings file
    pub fn load(path: &Path) -> PipelineResult<SettingsFile> {
        let content = std::fs::read_to_string(path).map_err(|e| PipelineError::fs(path, e))?;
        let parsed = Self::parse(&content).map_err(|e| match e {
            PipelineError::BadArgs(msg) => {
                PipelineError::BadArgs(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;
        info!(path = %path.display(), "Loaded settings file");
        Ok(parsed)
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> PipelineResult<SettingsFile> {
        toml::from_str(content)
            .map_err(|e| PipelineError::BadArgs(format!("Failed to parse TOML settings: {}", e)))
    }
}

impl PipelineSection {
    /// Overlay the keys present in this table onto `settings`
    pub fn apply_to(&self, settings: &mut PipelineSettings) {
        if let Some(ranges) = &self.ranges {
            settings.ranges_path = ranges.clone();
        }
        if let Some(work_root) = &self.work_root {
            settings.work_root = work_root.clone();
        }
        if let Some(engine) = &self.engine {
            settings.engine = engine.clone();
        }
        if let Some(resolution) = &self.resolution {
            settings.resolution = resolution.clone();
        }
        if let Some(bitrate) = &self.video_bitrate {
            settings.video_bitrate = bitrate.clone();
        }
        if let Some(extension) = &self.segment_extension {
            settings.segment_extension = extension.clone();
        }
        if let Some(concurrency) = self.max_concurrent_extractions {
            settings.concurrency = concurrency;
        }
        if let Some(cleanup) = self.cleanup_work_dir {
            settings.cleanup_work_dir = cleanup;
        }
        debug!(?settings, "Applied settings file");
    }
}
