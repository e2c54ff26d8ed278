use std::sync::Arc;

use tracing::info;

use crate::adapters::{FFmpegAdapter, LocalFsAdapter, RecordingEngineAdapter};
use crate::app::pipeline_interactor::PipelineInteractor;
use crate::app::settings::PipelineSettings;
use crate::ports::{EnginePort, FsPort};

pub trait AppContainer: Send + Sync {
    fn pipeline_interactor(&self) -> Arc<PipelineInteractor>;
}

/// Wires the real adapters (or the recording engine for dry runs) into the interactor
pub struct DefaultAppContainer {
    pipeline_interactor: Arc<PipelineInteractor>,
}

impl DefaultAppContainer {
    pub fn new(settings: PipelineSettings) -> Self {
        let engine: Arc<dyn EnginePort> = if settings.dry_run {
            info!("Dry run: engine invocations are logged, not executed");
            Arc::new(RecordingEngineAdapter::new())
        } else {
            Arc::new(FFmpegAdapter::new(settings.engine.clone()))
        };
        let fs: Arc<dyn FsPort> = Arc::new(LocalFsAdapter::new());

        Self {
            pipeline_interactor: Arc::new(PipelineInteractor::new(settings, engine, fs)),
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn pipeline_interactor(&self) -> Arc<PipelineInteractor> {
        Arc::clone(&self.pipeline_interactor)
    }
}
