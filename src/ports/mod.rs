// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::model::EngineInvocation;
use crate::error::PipelineResult;

/// Port for the external transcoding engine
#[async_trait]
pub trait EnginePort: Send + Sync {
    /// Run one invocation to completion.
    ///
    /// Spawn failures and non-zero exits are both reported as
    /// `PipelineError::EngineInvocation`. No retries.
    async fn run(&self, invocation: &EngineInvocation) -> PipelineResult<()>;

    /// Whether a successful run leaves a file at the invocation's output path.
    /// False only for dry-run engines.
    fn writes_outputs(&self) -> bool {
        true
    }
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if a file or directory exists
    async fn exists(&self, path: &Path) -> PipelineResult<bool>;

    /// Create directory (including parent directories); no-op if present
    async fn create_directory(&self, path: &Path) -> PipelineResult<()>;

    /// Read a whole text file
    async fn read_to_string(&self, path: &Path) -> PipelineResult<String>;

    /// Write a whole text file, replacing any previous content
    async fn write_file(&self, path: &Path, content: &str) -> PipelineResult<()>;

    /// Move file, replacing the destination
    async fn move_file(&self, from: &Path, to: &Path) -> PipelineResult<()>;

    /// Delete directory recursively
    async fn delete_directory(&self, path: &Path) -> PipelineResult<()>;

    /// Resolve relative path to absolute path without requiring it to exist
    async fn resolve_path(&self, path: &Path) -> PipelineResult<PathBuf>;
}
