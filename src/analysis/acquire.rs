//! Cloning repositories into private temporary directories.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{info, warn};

use crate::config::RepositoryDescriptor;
use crate::error::{GrepStatsError, Result};

/// A repository cloned into a temporary directory.
///
/// The directory is removed when the handle is released or dropped,
/// whichever comes first. Removal failures are logged, never returned.
#[derive(Debug)]
pub struct ClonedRepo {
    name: String,
    dir: Option<TempDir>,
}

impl ClonedRepo {
    fn new(name: &str, dir: TempDir) -> Self {
        Self {
            name: name.to_string(),
            dir: Some(dir),
        }
    }

    /// Root of the local copy
    pub fn path(&self) -> &Path {
        // `dir` is only taken by `release`, which consumes the handle
        self.dir
            .as_ref()
            .map(TempDir::path)
            .unwrap_or_else(|| Path::new(""))
    }

    /// Remove the local copy now.
    pub fn release(mut self) {
        self.remove_dir();
    }

    fn remove_dir(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!(
                    "unable to remove dir {} of repo '{}': {}",
                    path.display(),
                    self.name,
                    e
                );
            }
        }
    }
}

impl Drop for ClonedRepo {
    fn drop(&mut self) {
        self.remove_dir();
    }
}

/// Materializes repositories with `git clone`.
#[derive(Debug, Clone)]
pub struct GitAcquirer {
    git_binary: String,
    /// Parent of the clone directories; the system temp dir when `None`
    temp_root: Option<PathBuf>,
}

impl GitAcquirer {
    pub fn new(git_binary: impl Into<String>) -> Self {
        Self {
            git_binary: git_binary.into(),
            temp_root: None,
        }
    }

    /// Create clone directories under `root` instead of the system temp dir.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Clone `repo` into a fresh, uniquely named temporary directory.
    pub async fn acquire(&self, repo: &RepositoryDescriptor) -> Result<ClonedRepo> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("clone");
        let dir = match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(GrepStatsError::TempDir)?;
        // From here on the directory is cleaned up on every exit path
        let cloned = ClonedRepo::new(&repo.name, dir);

        let mut cmd = Command::new(&self.git_binary);
        cmd.arg("clone")
            .arg(&repo.location)
            .arg(cloned.path())
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .kill_on_drop(true);

        info!(
            "running command: {} clone {} {}",
            self.git_binary,
            repo.location,
            cloned.path().display()
        );

        let output = cmd.output().await.map_err(|e| GrepStatsError::Acquisition {
            repository: repo.name.clone(),
            message: format!("failed to run {}: {}", self.git_binary, e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => output.status.to_string(),
                diagnostic => diagnostic.to_string(),
            };
            return Err(GrepStatsError::Acquisition {
                repository: repo.name.clone(),
                message,
            });
        }

        Ok(cloned)
    }
}

impl Default for GitAcquirer {
    fn default() -> Self {
        Self::new("git")
    }
}
