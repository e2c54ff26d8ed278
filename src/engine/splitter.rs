//! Segment splitter: concurrent fan-out of extraction jobs
//!
//! Each job runs in its own task and reports a [`SegmentResult`] tagged with
//! the job's index. Paths are placed back into config order by that index
//! after every task has finished, never in completion order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domain::model::{SegmentJob, SegmentResult};
use crate::engine::transcode::TranscodeInvoker;
use crate::error::{PipelineError, PipelineResult};

/// Runs one extraction task per job
pub struct SegmentSplitter {
    invoker: Arc<TranscodeInvoker>,
    max_concurrent: Option<usize>,
}

impl SegmentSplitter {
    /// `max_concurrent` of `None` launches every job at once
    pub fn new(invoker: Arc<TranscodeInvoker>, max_concurrent: Option<usize>) -> Self {
        Self {
            invoker,
            max_concurrent,
        }
    }

    /// Extract every job from `master` and return the segment paths in job-index order.
    ///
    /// Waits for all tasks before returning. If any task fails, the failure
    /// with the lowest index is returned and no paths are.
    pub async fn split(&self, jobs: Vec<SegmentJob>, master: &Path) -> PipelineResult<Vec<PathBuf>> {
        let total = jobs.len();
        let permits = self.max_concurrent.map(|n| Arc::new(Semaphore::new(n.max(1))));
        info!(
            segments = total,
            max_concurrent = ?self.max_concurrent,
            "Splitting master into segments"
        );

        let mut handles: Vec<(usize, JoinHandle<SegmentResult>)> = Vec::with_capacity(total);
        for job in jobs {
            let index = job.index;
            let invoker = Arc::clone(&self.invoker);
            let master = master.to_path_buf();
            let permits = permits.clone();

            let handle = tokio::spawn(async move {
                let _permit = match permits {
                    Some(sem) => match sem.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(e) => {
                            return SegmentResult {
                                index: job.index,
                                path: job.output_path,
                                outcome: Err(PipelineError::TaskFailed {
                                    index: job.index,
                                    message: e.to_string(),
                                }),
                            }
                        }
                    },
                    None => None,
                };
                let outcome = invoker.extract(&master, &job).await;
                SegmentResult {
                    index: job.index,
                    path: job.output_path,
                    outcome,
                }
            });
            handles.push((index, handle));
        }

        let mut slots: Vec<Option<PathBuf>> = vec![None; total];
        let mut failures: Vec<(usize, PipelineError)> = Vec::new();
        for (index, handle) in handles {
            match handle.await {
                Ok(result) => match result.outcome {
                    Ok(()) => match slots.get_mut(result.index) {
                        Some(slot) => *slot = Some(result.path),
                        None => failures.push((
                            result.index,
                            PipelineError::TaskFailed {
                                index: result.index,
                                message: format!("index out of range for {} segments", total),
                            },
                        )),
                    },
                    Err(e) => failures.push((result.index, e)),
                },
                Err(join_err) => failures.push((
                    index,
                    PipelineError::TaskFailed {
                        index,
                        message: join_err.to_string(),
                    },
                )),
            }
        }

        if !failures.is_empty() {
            failures.sort_by_key(|(index, _)| *index);
            for (index, err) in &failures {
                error!(index, error = %err, "Segment extraction failed");
            }
            let (_, first) = failures.remove(0);
            return Err(first);
        }

        let paths = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| PipelineError::TaskFailed {
                    index,
                    message: "no result reported".to_string(),
                })
            })
            .collect::<PipelineResult<Vec<PathBuf>>>()?;

        info!(segments = paths.len(), "All segments extracted");
        Ok(paths)
    }
}
