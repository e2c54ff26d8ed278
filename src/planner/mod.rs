//! Segment planning: range config entries into extraction jobs

use std::path::Path;

use crate::domain::model::{ConfigEntry, SegmentJob, TimeRange};
use crate::error::{PipelineError, PipelineResult};
use crate::utils::time::parse_time;

pub mod range_config;

pub use range_config::{load_entries, parse_entries};

/// Parse one entry's markers into a range
pub fn to_time_range(entry: &ConfigEntry) -> PipelineResult<TimeRange> {
    let start = parse_time(&entry.start_text)?;
    let end = parse_time(&entry.end_text)?;
    Ok(TimeRange::new(start, end))
}

/// Build one job per entry, indexed by config position.
///
/// Ranges may overlap or be out of chronological order; both are kept as
/// given. A range whose end is at or before its start is rejected, since the
/// extraction for it could never succeed. Entries map one-to-one onto config
/// lines, so the index gives the line number.
pub fn plan_segments(
    entries: &[ConfigEntry],
    work_dir: &Path,
    extension: &str,
) -> PipelineResult<Vec<SegmentJob>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let range = to_time_range(entry)?;
            if range.is_empty() {
                return Err(PipelineError::EmptyRange {
                    line_number: index + 1,
                    line: format!("{} {}", entry.start_text, entry.end_text),
                });
            }
            Ok(SegmentJob::new(index, range, work_dir, extension))
        })
        .collect()
}
