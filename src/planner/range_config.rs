//! Range config loading
//!
//! The config is plain text, one `<start> <end>` pair per line:
//!
//! ```text
//! 00:00:12 00:08:00
//! 00:09:00 00:23:10
//! ```
//!
//! No header, no comments. Blank lines are only tolerated at the end of the
//! input.

use std::io::BufRead;

use tracing::debug;

use crate::domain::model::ConfigEntry;
use crate::error::{PipelineError, PipelineResult};

/// Read every entry from `reader`, preserving line order.
///
/// Any malformed line aborts the whole load; no partial result is returned.
pub fn load_entries<R: BufRead>(reader: R) -> PipelineResult<Vec<ConfigEntry>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| PipelineError::fs("<range config>", e))?;
        lines.push(line);
    }

    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let mut entries = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        entries.push(parse_line(i + 1, line)?);
    }

    debug!(count = entries.len(), "Loaded range config");
    Ok(entries)
}

/// Convenience wrapper over [`load_entries`] for in-memory text
pub fn parse_entries(content: &str) -> PipelineResult<Vec<ConfigEntry>> {
    load_entries(content.as_bytes())
}

fn parse_line(line_number: usize, line: &str) -> PipelineResult<ConfigEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [start, end] => Ok(ConfigEntry::new(*start, *end)),
        _ => Err(PipelineError::ConfigFormat {
            line_number,
            line: line.to_string(),
        }),
    }
}
