//! Transcode invoker: one engine run per unit of work

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::model::{EngineInvocation, SegmentJob};
use crate::error::PipelineResult;
use crate::ports::{EnginePort, FsPort};
use crate::utils::path::staging_path;

/// What happened to the master file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterOutcome {
    /// Engine ran and produced a new master
    Encoded,
    /// A master from an earlier run was already in place
    Reused,
}

/// Builds and runs single engine invocations
pub struct TranscodeInvoker {
    engine: Arc<dyn EnginePort>,
    fs: Arc<dyn FsPort>,
}

impl TranscodeInvoker {
    pub fn new(engine: Arc<dyn EnginePort>, fs: Arc<dyn FsPort>) -> Self {
        Self { engine, fs }
    }

    /// Re-encode the whole input into `master`.
    ///
    /// Skipped when `master` already exists. The engine writes to a staging
    /// name that is moved onto `master` only after a successful exit, so an
    /// interrupted encode never satisfies the existence check.
    pub async fn encode_master(
        &self,
        input: &Path,
        master: &Path,
        resolution: &str,
        bitrate: &str,
    ) -> PipelineResult<MasterOutcome> {
        if self.fs.exists(master).await? {
            info!(master = %master.display(), "Master already present, skipping re-encode");
            return Ok(MasterOutcome::Reused);
        }

        let staged = staging_path(master);
        let invocation = EngineInvocation::reencode(input, resolution, bitrate, &staged);
        info!(
            input = %input.display(),
            master = %master.display(),
            resolution,
            bitrate,
            "Re-encoding master"
        );
        self.engine.run(&invocation).await?;

        if self.engine.writes_outputs() {
            self.fs.move_file(&staged, master).await?;
        }
        Ok(MasterOutcome::Encoded)
    }

    /// Extract one segment from `master`; always runs, overwriting any old file
    pub async fn extract(&self, master: &Path, job: &SegmentJob) -> PipelineResult<()> {
        let invocation = EngineInvocation::extract(master, job.range, &job.output_path);
        debug!(
            index = job.index,
            range = %job.range,
            output = %job.output_path.display(),
            "Extracting segment"
        );
        self.engine.run(&invocation).await
    }

    /// Run an already-built invocation
    pub async fn run(&self, invocation: &EngineInvocation) -> PipelineResult<()> {
        self.engine.run(invocation).await
    }
}
