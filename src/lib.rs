//! Segcat video segment pipeline library
//!
//! Re-encodes one input into a master file, extracts a list of time ranges
//! from it concurrently, and concatenates the extracted segments in the order
//! they were configured. All transcoding is delegated to an external engine
//! (ffmpeg).

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{Concurrency, DefaultAppContainer, PipelineInteractor, PipelineSettings};
pub use domain::model::{
    ConcatManifest, ConfigEntry, EngineInvocation, EngineOperation, PipelineReport, PipelineStage,
    SegmentJob, SegmentResult, TimeRange,
};
pub use error::{PipelineError, PipelineResult};
pub use utils::time::parse_time;
