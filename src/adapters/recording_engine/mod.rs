//! Recording engine adapter
//!
//! Stands in for ffmpeg in dry runs and tests. Every invocation is logged and
//! recorded; optionally the adapter touches the output file, sleeps, or fails
//! for selected outputs. Like ffmpeg run with `-nostdin`, it refuses to replace
//! an existing output unless the invocation carries `-y`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::domain::model::EngineInvocation;
use crate::error::{PipelineError, PipelineResult};
use crate::ports::EnginePort;

/// Engine adapter that records invocations instead of transcoding
#[derive(Default)]
pub struct RecordingEngineAdapter {
    touch_outputs: bool,
    delays: HashMap<String, Duration>,
    failures: Vec<String>,
    started: Mutex<Vec<EngineInvocation>>,
    finished: Mutex<Vec<PathBuf>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl RecordingEngineAdapter {
    /// Dry-run adapter: records only, writes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an empty file at each invocation's output path
    pub fn touching_outputs(mut self) -> Self {
        self.touch_outputs = true;
        self
    }

    /// Sleep before completing any invocation whose output file name is `file_name`
    pub fn with_delay(mut self, file_name: &str, delay: Duration) -> Self {
        self.delays.insert(file_name.to_string(), delay);
        self
    }

    /// Fail any invocation whose output file name is `file_name`
    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.failures.push(file_name.to_string());
        self
    }

    /// Invocations in the order they were started
    pub fn invocations(&self) -> Vec<EngineInvocation> {
        self.started.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Output paths in the order their invocations finished
    pub fn completion_order(&self) -> Vec<PathBuf> {
        self.finished.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Highest number of invocations observed running at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn output_name(invocation: &EngineInvocation) -> String {
        invocation
            .output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    async fn refuses_overwrite(invocation: &EngineInvocation) -> bool {
        let overwrite = invocation.args.iter().any(|a| a == "-y");
        !overwrite
            && tokio::fs::try_exists(&invocation.output)
                .await
                .unwrap_or(false)
    }
}

#[async_trait]
impl EnginePort for RecordingEngineAdapter {
    async fn run(&self, invocation: &EngineInvocation) -> PipelineResult<()> {
        info!(
            operation = %invocation.operation,
            args = ?invocation.args,
            "Engine invocation (recorded)"
        );
        if let Ok(mut started) = self.started.lock() {
            started.push(invocation.clone());
        }
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let name = Self::output_name(invocation);
        if let Some(delay) = self.delays.get(&name) {
            tokio::time::sleep(*delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        let result = if self.failures.contains(&name) {
            Err(PipelineError::EngineInvocation {
                operation: invocation.operation.to_string(),
                message: format!("recorded failure for {}", invocation.output.display()),
            })
        } else if self.touch_outputs && Self::refuses_overwrite(invocation).await {
            Err(PipelineError::EngineInvocation {
                operation: invocation.operation.to_string(),
                message: format!(
                    "File '{}' already exists. Exiting.",
                    invocation.output.display()
                ),
            })
        } else if self.touch_outputs {
            tokio::fs::write(&invocation.output, b"")
                .await
                .map_err(|e| PipelineError::fs(&invocation.output, e))
        } else {
            Ok(())
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if let Ok(mut finished) = self.finished.lock() {
            finished.push(invocation.output.clone());
        }
        result
    }

    fn writes_outputs(&self) -> bool {
        self.touch_outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::EngineOperation;
    use tempfile::TempDir;

    fn invocation(args: &[&str], output: PathBuf) -> EngineInvocation {
        EngineInvocation {
            operation: EngineOperation::Reencode,
            args: args.iter().map(|a| a.to_string()).collect(),
            output,
        }
    }

    #[tokio::test]
    async fn test_existing_output_needs_overwrite_flag() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("partial_720p_movie.mkv");
        std::fs::write(&output, b"stale").unwrap();
        let engine = RecordingEngineAdapter::new().touching_outputs();

        let refused = engine.run(&invocation(&["-i", "movie.mkv"], output.clone())).await;
        assert!(matches!(
            refused,
            Err(PipelineError::EngineInvocation { ref message, .. }) if message.contains("already exists")
        ));

        engine
            .run(&invocation(&["-y", "-i", "movie.mkv"], output.clone()))
            .await
            .unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), b"");
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("0.mp4");
        let engine = RecordingEngineAdapter::new();

        engine.run(&invocation(&["-i", "m.mkv"], output.clone())).await.unwrap();

        assert!(!output.exists());
        assert!(!engine.writes_outputs());
        assert_eq!(engine.invocations().len(), 1);
    }
}
