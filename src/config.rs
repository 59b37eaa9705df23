//! Configuration: the JSON document describing what to search, and the
//! process settings resolved from the environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::search::SearchMode;
use crate::error::{GrepStatsError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "./config.json";
pub const DEFAULT_RESULTS_PATH: &str = "./results.json";

/// The configuration document read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Words (grep patterns) to search for, case-insensitively
    pub search_words: Vec<String>,
    /// Directory names skipped in every repository
    #[serde(default, rename = "exclude_dirs")]
    pub global_excluded_subdirs: Vec<String>,
    /// Repositories to clone and search
    #[serde(default)]
    pub repositories: Vec<RepositoryDescriptor>,
    /// Which grep output shape to request and parse
    #[serde(default)]
    pub search_mode: SearchMode,
    /// Upper bound on repositories analyzed at once (unbounded when absent)
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

/// A repository to analyze. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    /// Anything `git clone` accepts: a URL or a local path
    #[serde(rename = "url")]
    pub location: String,
    /// Directory names skipped in this repository only
    #[serde(default, rename = "exclude_dirs")]
    pub excluded_subdirs: Vec<String>,
}

impl Config {
    /// Read, parse and validate the configuration document at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GrepStatsError::config(path, e))?;
        Self::from_json_str(&raw).map_err(|e| match e {
            GrepStatsError::Config { message, .. } => GrepStatsError::config(path, message),
            other => other,
        })
    }

    /// Parse and validate a configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(raw).map_err(|e| GrepStatsError::config("<inline>", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.search_words.is_empty() {
            return Err(GrepStatsError::config("<inline>", "search_words must not be empty"));
        }
        if self.search_words.iter().any(|w| w.is_empty()) {
            return Err(GrepStatsError::config(
                "<inline>",
                "search_words must not contain an empty word",
            ));
        }
        if self.max_concurrency == Some(0) {
            return Err(GrepStatsError::config(
                "<inline>",
                "max_concurrency must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Global excludes followed by the repository's own excludes.
    pub fn excluded_subdirs_for(&self, repo: &RepositoryDescriptor) -> Vec<String> {
        self.global_excluded_subdirs
            .iter()
            .chain(repo.excluded_subdirs.iter())
            .cloned()
            .collect()
    }
}

/// Process settings: file locations and the external commands to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_path: PathBuf,
    pub results_path: PathBuf,
    pub git_binary: String,
    pub grep_binary: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
            git_binary: "git".to_string(),
            grep_binary: "grep".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(path) = std::env::var("GREPSTATS_CONFIG") {
            settings.config_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("GREPSTATS_RESULTS") {
            settings.results_path = PathBuf::from(path);
        }
        if let Ok(git) = std::env::var("GREPSTATS_GIT") {
            settings.git_binary = git;
        }
        if let Ok(grep) = std::env::var("GREPSTATS_GREP") {
            settings.grep_binary = grep;
        }

        settings
    }
}
