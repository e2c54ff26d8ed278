//! Concatenator: manifest + one concat-demuxer merge

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::domain::model::{ConcatManifest, EngineInvocation};
use crate::engine::transcode::TranscodeInvoker;
use crate::error::{PipelineError, PipelineResult};
use crate::ports::FsPort;
use crate::utils::path::manifest_path;

/// Merges ordered segments into the final output
pub struct Concatenator {
    invoker: Arc<TranscodeInvoker>,
    fs: Arc<dyn FsPort>,
}

impl Concatenator {
    pub fn new(invoker: Arc<TranscodeInvoker>, fs: Arc<dyn FsPort>) -> Self {
        Self { invoker, fs }
    }

    /// Write the manifest for `segments` (in the given order) and merge them into `output`.
    ///
    /// Returns the manifest path; the manifest is left on disk.
    pub async fn concat(
        &self,
        segments: &[PathBuf],
        work_dir: &Path,
        output: &Path,
    ) -> PipelineResult<PathBuf> {
        if segments.is_empty() {
            return Err(PipelineError::BadArgs(
                "No segments to concatenate".to_string(),
            ));
        }

        let mut entries = Vec::with_capacity(segments.len());
        for segment in segments {
            entries.push(self.fs.resolve_path(segment).await?);
        }
        let manifest = ConcatManifest::new(entries);
        let manifest_file = manifest_path(work_dir, output)?;
        self.fs.write_file(&manifest_file, &manifest.render()).await?;

        info!(
            segments = segments.len(),
            manifest = %manifest_file.display(),
            output = %output.display(),
            "Concatenating segments"
        );
        let invocation = EngineInvocation::concat(&manifest_file, output);
        self.invoker.run(&invocation).await?;
        Ok(manifest_file)
    }
}
