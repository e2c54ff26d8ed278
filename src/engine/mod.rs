//! Engine orchestration: single invocations, segment fan-out, and merge

pub mod concat;
pub mod splitter;
pub mod transcode;

pub use concat::Concatenator;
pub use splitter::SegmentSplitter;
pub use transcode::{MasterOutcome, TranscodeInvoker};
