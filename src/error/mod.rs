//! Error handling module for segcat

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::model::PipelineStage;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Malformed timestamp
    #[error("Invalid time format: {input}. Expected H:M:S, M:S, or S")]
    Parse { input: String },

    /// Malformed line in the range config
    #[error("Invalid range config at line {line_number}: '{line}'. Expected '<start> <end>'")]
    ConfigFormat { line_number: usize, line: String },

    /// Range that selects nothing; the engine aborts on `-to <= -ss`
    #[error("Range at line {line_number} ends at or before its start: '{line}'")]
    EmptyRange { line_number: usize, line: String },

    /// External engine failed or could not be spawned
    #[error("Engine invocation failed ({operation}): {message}")]
    EngineInvocation { operation: String, message: String },

    /// Working-directory, manifest or other filesystem failure
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid settings or arguments
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// A segment task panicked or was aborted
    #[error("Segment task {index} did not complete: {message}")]
    TaskFailed { index: usize, message: String },

    /// Failure attributed to the pipeline stage that was running
    #[error("Pipeline failed while {stage}: {source}")]
    Stage {
        stage: PipelineStage,
        #[source]
        source: Box<PipelineError>,
    },
}

impl PipelineError {
    /// Build a filesystem error for `path`
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Attribute this error to a pipeline stage
    pub fn at_stage(self, stage: PipelineStage) -> Self {
        match self {
            already @ PipelineError::Stage { .. } => already,
            other => PipelineError::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Stage the error was raised in, if known
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            PipelineError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Innermost error, with stage attribution stripped
    pub fn root(&self) -> &PipelineError {
        match self {
            PipelineError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
