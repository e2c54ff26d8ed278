// Pipeline interactor - Orchestrates the cut-and-concat use case

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{info, warn};

use crate::app::settings::PipelineSettings;
use crate::domain::model::{PipelineReport, PipelineStage, SegmentJob};
use crate::engine::{Concatenator, MasterOutcome, SegmentSplitter, TranscodeInvoker};
use crate::error::{PipelineError, PipelineResult};
use crate::planner::{parse_entries, plan_segments};
use crate::ports::{EnginePort, FsPort};
use crate::utils::path::{master_path, work_dir_for};

/// Interactor driving one pipeline run:
/// `Init -> ConfigLoaded -> MasterEncoded -> SegmentsExtracted -> Concatenated -> Done`.
///
/// The first failure aborts everything after it. Nothing is rolled back.
pub struct PipelineInteractor {
    settings: PipelineSettings,
    fs: Arc<dyn FsPort>,
    invoker: Arc<TranscodeInvoker>,
    splitter: SegmentSplitter,
    concatenator: Concatenator,
    stage: Mutex<PipelineStage>,
}

/// State carried from config loading into the transcoding stages
struct LoadedPlan {
    work_dir: PathBuf,
    jobs: Vec<SegmentJob>,
}

impl PipelineInteractor {
    /// Create new pipeline interactor with injected ports
    pub fn new(
        settings: PipelineSettings,
        engine: Arc<dyn EnginePort>,
        fs: Arc<dyn FsPort>,
    ) -> Self {
        let invoker = Arc::new(TranscodeInvoker::new(engine, Arc::clone(&fs)));
        let splitter = SegmentSplitter::new(Arc::clone(&invoker), settings.concurrency.limit());
        let concatenator = Concatenator::new(Arc::clone(&invoker), Arc::clone(&fs));
        Self {
            settings,
            fs,
            invoker,
            splitter,
            concatenator,
            stage: Mutex::new(PipelineStage::Init),
        }
    }

    /// Stage reached by the latest run: `Done` after success, `Failed` after
    /// any error
    pub fn stage(&self) -> PipelineStage {
        self.stage
            .lock()
            .map(|s| *s)
            .unwrap_or(PipelineStage::Failed)
    }

    fn enter(&self, stage: PipelineStage) -> PipelineStage {
        if let Ok(mut current) = self.stage.lock() {
            *current = stage;
        }
        stage
    }

    /// Execute the whole pipeline
    pub async fn execute(&self) -> PipelineResult<PipelineReport> {
        let started_at = Utc::now();
        let mut stage = self.enter(PipelineStage::Init);

        self.prepare()
            .await
            .map_err(|e| self.fail(stage, e))?;

        stage = self.enter(stage.next());
        let plan = self
            .load_plan()
            .await
            .map_err(|e| self.fail(stage, e))?;
        info!(stage = ?stage, segments = plan.jobs.len(), "Range config loaded");

        stage = self.enter(stage.next());
        let (master, outcome) = self
            .encode_master(&plan)
            .await
            .map_err(|e| self.fail(stage, e))?;
        info!(stage = ?stage, master = %master.display(), ?outcome, "Master ready");

        stage = self.enter(stage.next());
        let segments = self
            .splitter
            .split(plan.jobs, &master)
            .await
            .map_err(|e| self.fail(stage, e))?;
        info!(stage = ?stage, count = segments.len(), "Segments extracted");

        stage = self.enter(stage.next());
        let manifest = self
            .concatenator
            .concat(&segments, &plan.work_dir, &self.settings.output)
            .await
            .map_err(|e| self.fail(stage, e))?;
        info!(stage = ?stage, output = %self.settings.output.display(), "Output written");

        stage = self.enter(stage.next());
        let work_dir_removed = self.cleanup(&plan.work_dir).await;
        info!(stage = ?stage, "Pipeline finished");

        Ok(PipelineReport {
            input: self.settings.input.clone(),
            output: self.settings.output.clone(),
            work_dir: plan.work_dir,
            master,
            master_reused: outcome == MasterOutcome::Reused,
            segments,
            manifest,
            work_dir_removed,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Move to `Failed` and tag the error with the stage that was running
    fn fail(&self, stage: PipelineStage, err: PipelineError) -> PipelineError {
        self.enter(PipelineStage::Failed);
        warn!(stage = ?stage, error = %err, "Pipeline failed");
        err.at_stage(stage)
    }

    /// Settings validation and input presence
    async fn prepare(&self) -> PipelineResult<()> {
        self.settings.validate()?;
        if !self.fs.exists(&self.settings.input).await? {
            return Err(PipelineError::fs(
                &self.settings.input,
                std::io::Error::new(std::io::ErrorKind::NotFound, "input file does not exist"),
            ));
        }
        Ok(())
    }

    /// Read the range config and turn every line into a job.
    /// Runs before any directory is created or engine is started.
    async fn load_plan(&self) -> PipelineResult<LoadedPlan> {
        let content = self.fs.read_to_string(&self.settings.ranges_path).await?;
        let entries = parse_entries(&content)?;
        if entries.is_empty() {
            return Err(PipelineError::BadArgs(format!(
                "Range config {} contains no ranges",
                self.settings.ranges_path.display()
            )));
        }

        let work_dir = work_dir_for(&self.settings.input, &self.settings.work_root)?;
        let jobs = plan_segments(&entries, &work_dir, &self.settings.segment_extension)?;
        Ok(LoadedPlan { work_dir, jobs })
    }

    async fn encode_master(&self, plan: &LoadedPlan) -> PipelineResult<(PathBuf, MasterOutcome)> {
        self.fs.create_directory(&plan.work_dir).await?;
        let master = master_path(&plan.work_dir, &self.settings.input, &self.settings.resolution)?;
        let outcome = self
            .invoker
            .encode_master(
                &self.settings.input,
                &master,
                &self.settings.resolution,
                &self.settings.video_bitrate,
            )
            .await?;
        Ok((master, outcome))
    }

    /// Remove the working directory when asked to. A failure here is only
    /// logged: the output has already been written.
    async fn cleanup(&self, work_dir: &std::path::Path) -> bool {
        if !self.settings.cleanup_work_dir {
            return false;
        }
        match self.fs.delete_directory(work_dir).await {
            Ok(()) => {
                info!(work_dir = %work_dir.display(), "Removed working directory");
                true
            }
            Err(e) => {
                warn!(work_dir = %work_dir.display(), error = %e, "Could not remove working directory");
                false
            }
        }
    }
}
