// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::utils::time::format_hms;


/// One `(start, end)` cut, as absolute offsets in seconds from the start of the stream.
///
/// `end` is an absolute offset, not a length relative to `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: u64,
    pub end: u64,
}

impl TimeRange {
    /// Create a new range
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// True when the range selects nothing: the end marker is at or before
    /// the start marker
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Length in seconds, zero for empty ranges
    pub fn length(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_hms(self.start), format_hms(self.end))
    }
}

/// Raw line of the range config, before timestamps are parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub start_text: String,
    pub end_text: String,
}

impl ConfigEntry {
    pub fn new(start_text: impl Into<String>, end_text: impl Into<String>) -> Self {
        Self {
            start_text: start_text.into(),
            end_text: end_text.into(),
        }
    }
}

/// One extraction unit of work, owned by the task that runs it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentJob {
    pub index: usize,
    pub range: TimeRange,
    pub output_path: PathBuf,
}

impl SegmentJob {
    /// Create a job whose output path is derived from its index
    pub fn new(index: usize, range: TimeRange, work_dir: &Path, extension: &str) -> Self {
        Self {
            index,
            range,
            output_path: segment_path(work_dir, index, extension),
        }
    }
}

/// Path of segment `index` inside the working directory, e.g. `movie_tmp/0.mp4`
pub fn segment_path(work_dir: &Path, index: usize, extension: &str) -> PathBuf {
    work_dir.join(format!("{}.{}", index, extension))
}

/// Completed segment job, reported back to the splitter
#[derive(Debug)]
pub struct SegmentResult {
    pub index: usize,
    pub path: PathBuf,
    pub outcome: crate::error::PipelineResult<()>,
}

/// Ordered list of segment files handed to the concat demuxer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatManifest {
    pub entries: Vec<PathBuf>,
}

impl ConcatManifest {
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    /// Render in concat demuxer syntax, one `file '<path>'` line per entry
    pub fn render(&self) -> String {
        let mut content = String::new();
        for entry in &self.entries {
            let escaped = entry.to_string_lossy().replace('\'', "'\\''");
            content.push_str(&format!("file '{}'\n", escaped));
        }
        content
    }
}

/// Which external operation an invocation performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineOperation {
    /// Whole-file resize + bitrate re-encode producing the master
    Reencode,
    /// Stream-copy extraction of one range from the master
    Extract,
    /// Concat demuxer merge of all segments
    Concat,
}

impl fmt::Display for EngineOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineOperation::Reencode => write!(f, "re-encode"),
            EngineOperation::Extract => write!(f, "extract"),
            EngineOperation::Concat => write!(f, "concat"),
        }
    }
}

/// Argument vector for one engine run, without the program name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInvocation {
    pub operation: EngineOperation,
    pub args: Vec<String>,
    pub output: PathBuf,
}

impl EngineInvocation {
    /// Whole-file re-encode: `-y -i <input> -s <WxH> -b:v <rate> <output>`.
    ///
    /// `-y` lets a leftover staging file from an interrupted run be replaced.
    pub fn reencode(input: &Path, resolution: &str, bitrate: &str, output: &Path) -> Self {
        let args = vec![
            "-y".to_string(),
            "-i".to_string(),
            path_arg(input),
            "-s".to_string(),
            resolution.to_string(),
            "-b:v".to_string(),
            bitrate.to_string(),
            path_arg(output),
        ];
        Self {
            operation: EngineOperation::Reencode,
            args,
            output: output.to_path_buf(),
        }
    }

    /// Segment extraction: `-y -i <master> -ss <start> -to <end> -c copy <output>`
    pub fn extract(master: &Path, range: TimeRange, output: &Path) -> Self {
        let args = vec![
            "-y".to_string(),
            "-i".to_string(),
            path_arg(master),
            "-ss".to_string(),
            range.start.to_string(),
            "-to".to_string(),
            range.end.to_string(),
            "-c".to_string(),
            "copy".to_string(),
            path_arg(output),
        ];
        Self {
            operation: EngineOperation::Extract,
            args,
            output: output.to_path_buf(),
        }
    }

    /// Concat merge: `-y -f concat -safe 0 -i <manifest> -c copy <output>`
    pub fn concat(manifest: &Path, output: &Path) -> Self {
        let args = vec![
            "-y".to_string(),
            "-f".to_string(),
            "concat".to_string(),
            "-safe".to_string(),
            "0".to_string(),
            "-i".to_string(),
            path_arg(manifest),
            "-c".to_string(),
            "copy".to_string(),
            path_arg(output),
        ];
        Self {
            operation: EngineOperation::Concat,
            args,
            output: output.to_path_buf(),
        }
    }

    /// Value following the first occurrence of `flag`
    pub fn arg_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Linear pipeline states; any failure moves to `Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineStage {
    Init,
    ConfigLoaded,
    MasterEncoded,
    SegmentsExtracted,
    Concatenated,
    Done,
    Failed,
}

impl PipelineStage {
    /// Next state on success
    pub fn next(self) -> Self {
        match self {
            PipelineStage::Init => PipelineStage::ConfigLoaded,
            PipelineStage::ConfigLoaded => PipelineStage::MasterEncoded,
            PipelineStage::MasterEncoded => PipelineStage::SegmentsExtracted,
            PipelineStage::SegmentsExtracted => PipelineStage::Concatenated,
            PipelineStage::Concatenated => PipelineStage::Done,
            PipelineStage::Done => PipelineStage::Done,
            PipelineStage::Failed => PipelineStage::Failed,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStage::Init => "initializing",
            PipelineStage::ConfigLoaded => "loading range config",
            PipelineStage::MasterEncoded => "encoding master file",
            PipelineStage::SegmentsExtracted => "extracting segments",
            PipelineStage::Concatenated => "concatenating segments",
            PipelineStage::Done => "finishing",
            PipelineStage::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Summary of a successful pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub work_dir: PathBuf,
    pub master: PathBuf,
    pub master_reused: bool,
    pub segments: Vec<PathBuf>,
    pub manifest: PathBuf,
    pub work_dir_removed: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
