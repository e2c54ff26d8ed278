// Local filesystem adapter - File system operations via tokio::fs

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{PipelineError, PipelineResult};
use crate::ports::FsPort;
use crate::utils::path::absolute_from;

/// Local filesystem adapter
#[derive(Debug, Default, Clone)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn exists(&self, path: &Path) -> PipelineResult<bool> {
        tokio::fs::try_exists(path)
            .await
            .map_err(|e| PipelineError::fs(path, e))
    }

    async fn create_directory(&self, path: &Path) -> PipelineResult<()> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| PipelineError::fs(path, e))
    }

    async fn read_to_string(&self, path: &Path) -> PipelineResult<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PipelineError::fs(path, e))
    }

    async fn write_file(&self, path: &Path, content: &str) -> PipelineResult<()> {
        tokio::fs::write(path, content)
            .await
            .map_err(|e| PipelineError::fs(path, e))
    }

    async fn move_file(&self, from: &Path, to: &Path) -> PipelineResult<()> {
        tokio::fs::rename(from, to)
            .await
            .map_err(|e| PipelineError::fs(from, e))
    }

    async fn delete_directory(&self, path: &Path) -> PipelineResult<()> {
        tokio::fs::remove_dir_all(path)
            .await
            .map_err(|e| PipelineError::fs(path, e))
    }

    async fn resolve_path(&self, path: &Path) -> PipelineResult<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let cwd = std::env::current_dir().map_err(|e| PipelineError::fs(".", e))?;
        Ok(absolute_from(&cwd, path))
    }
}
