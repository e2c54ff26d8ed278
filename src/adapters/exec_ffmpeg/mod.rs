//! FFmpeg execution adapter
//!
//! Runs each invocation as a child `ffmpeg` process and maps its exit status
//! onto the pipeline error type.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::model::EngineInvocation;
use crate::error::{PipelineError, PipelineResult};
use crate::ports::EnginePort;

/// Flags prepended to every invocation
const GLOBAL_ARGS: [&str; 2] = ["-hide_banner", "-nostdin"];

/// Number of stderr lines kept in error messages
const STDERR_TAIL_LINES: usize = 5;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    program: PathBuf,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter running `program`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Full argument vector passed to the process
    pub fn command_args(&self, invocation: &EngineInvocation) -> Vec<String> {
        GLOBAL_ARGS
            .iter()
            .map(|a| a.to_string())
            .chain(invocation.args.iter().cloned())
            .collect()
    }
}

#[async_trait]
impl EnginePort for FFmpegAdapter {
    async fn run(&self, invocation: &EngineInvocation) -> PipelineResult<()> {
        let args = self.command_args(invocation);
        debug!(
            program = %self.program.display(),
            operation = %invocation.operation,
            ?args,
            "Spawning engine"
        );

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| PipelineError::EngineInvocation {
                operation: invocation.operation.to_string(),
                message: format!("failed to spawn '{}': {}", self.program.display(), e),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail = stderr_tail(&stderr);
        warn!(
            operation = %invocation.operation,
            output = %invocation.output.display(),
            status = %output.status,
            "Engine exited with failure"
        );
        Err(PipelineError::EngineInvocation {
            operation: invocation.operation.to_string(),
            message: format!(
                "'{}' exited with {} while writing {}: {}",
                self.program.display(),
                output.status,
                invocation.output.display(),
                tail
            ),
        })
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    let tail = lines[start..].join(" | ");
    if tail.is_empty() {
        "no diagnostic output".to_string()
    } else {
        tail
    }
}
