//! Running grep over a local directory.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

use crate::error::{GrepStatsError, Result};

/// grep exits with this status when it ran fine but matched nothing
pub const GREP_EXIT_NO_MATCHES: i32 = 1;

/// The grep output shape to request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// `--only-matching`: one `<path>:<token>` line per match
    #[default]
    Matches,
    /// `--count`: one `<path>:<count>` line per searched file
    Count,
}

impl SearchMode {
    fn flag(self) -> &'static str {
        match self {
            SearchMode::Matches => "--only-matching",
            SearchMode::Count => "--count",
        }
    }
}

/// Builds and runs recursive, case-insensitive grep invocations.
#[derive(Debug, Clone)]
pub struct GrepSearcher {
    grep_binary: String,
    mode: SearchMode,
}

impl GrepSearcher {
    pub fn new(grep_binary: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            grep_binary: grep_binary.into(),
            mode,
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Arguments for searching `path` for any of `search_words`,
    /// skipping directories named in `excluded_subdirs`.
    pub fn build_args(
        &self,
        path: &Path,
        search_words: &[String],
        excluded_subdirs: &[String],
    ) -> Vec<String> {
        let mut args: Vec<String> = excluded_subdirs
            .iter()
            .map(|dir| format!("--exclude-dir={}", dir))
            .collect();
        args.extend(search_words.iter().map(|word| format!("--regexp={}", word)));
        args.extend(
            ["--recursive", "--ignore-case", self.mode.flag()]
                .iter()
                .map(|s| s.to_string()),
        );
        args.push(path.to_string_lossy().into_owned());
        args
    }

    /// Run grep and return its raw standard output.
    ///
    /// "No matches" is an empty output, not an error.
    pub async fn search(
        &self,
        path: &Path,
        search_words: &[String],
        excluded_subdirs: &[String],
    ) -> Result<String> {
        let args = self.build_args(path, search_words, excluded_subdirs);
        info!("running command: {} {}", self.grep_binary, args.join(" "));

        let output = Command::new(&self.grep_binary)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| GrepStatsError::SearchExecution {
                message: format!("failed to run {}: {}", self.grep_binary, e),
            })?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.status.code() == Some(GREP_EXIT_NO_MATCHES) && stderr.trim().is_empty() {
            return Ok(String::new());
        }

        Err(GrepStatsError::SearchExecution {
            message: match stderr.trim() {
                "" => output.status.to_string(),
                diagnostic => diagnostic.to_string(),
            },
        })
    }
}

impl Default for GrepSearcher {
    fn default() -> Self {
        Self::new("grep", SearchMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_args() {
        let searcher = GrepSearcher::default();
        let args = searcher.build_args(
            Path::new("/tmp/clone123"),
            &words(&["fell", "tree"]),
            &words(&[".git", "vendor"]),
        );

        assert_eq!(
            args,
            vec![
                "--exclude-dir=.git",
                "--exclude-dir=vendor",
                "--regexp=fell",
                "--regexp=tree",
                "--recursive",
                "--ignore-case",
                "--only-matching",
                "/tmp/clone123",
            ]
        );
    }

    #[test]
    fn test_build_args_count_mode() {
        let searcher = GrepSearcher::new("grep", SearchMode::Count);
        let args = searcher.build_args(Path::new("repo"), &words(&["x"]), &[]);
        assert_eq!(args, vec!["--regexp=x", "--recursive", "--ignore-case", "--count", "repo"]);
    }

    #[tokio::test]
    async fn test_search_finds_words_case_insensitively() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "The tree FELL\nnothing here\nfell again\n").unwrap();

        let out = GrepSearcher::default()
            .search(dir.path(), &words(&["fell"]), &[])
            .await
            .unwrap();

        assert_eq!(out.lines().count(), 2);
        assert!(out.lines().all(|l| l.ends_with(":FELL") || l.ends_with(":fell")));
    }

    #[tokio::test]
    async fn test_no_matches_is_empty_output() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "nothing to see\n").unwrap();

        let out = GrepSearcher::default()
            .search(dir.path(), &words(&["fell"]), &[])
            .await
            .unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_excluded_dirs_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("vendor")).unwrap();
        fs::write(dir.path().join("vendor/lib.txt"), "fell\n").unwrap();

        let out = GrepSearcher::default()
            .search(dir.path(), &words(&["fell"]), &words(&["vendor"]))
            .await
            .unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = GrepSearcher::default()
            .search(&missing, &words(&["fell"]), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, GrepStatsError::SearchExecution { .. }));
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = GrepSearcher::new("grepstats-no-such-grep", SearchMode::Matches)
            .search(dir.path(), &words(&["fell"]), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, GrepStatsError::SearchExecution { .. }));
    }
}
