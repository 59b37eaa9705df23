//! Analysis of a single repository: clone, grep, parse, clean up.

use std::time::Instant;
use tracing::{info, warn};

use super::acquire::GitAcquirer;
use super::parse::parse_output;
use super::search::GrepSearcher;
use crate::config::RepositoryDescriptor;
use crate::error::Result;
use crate::types::FileMatchResult;

/// Clone, grep, parse and clean up a single repository.
#[derive(Debug, Clone, Default)]
pub struct RepositoryAnalyzer {
    acquirer: GitAcquirer,
    searcher: GrepSearcher,
}

impl RepositoryAnalyzer {
    pub fn new(acquirer: GitAcquirer, searcher: GrepSearcher) -> Self {
        Self { acquirer, searcher }
    }

    /// Analyze `repo`, skipping every directory named in `excluded_subdirs`
    /// (global and per-repository excludes already merged).
    ///
    /// The clone is removed before returning, whatever the outcome.
    /// Matches whose path falls outside the clone are dropped with a warning;
    /// the rest of the repository's results are kept.
    pub async fn analyze(
        &self,
        repo: &RepositoryDescriptor,
        search_words: &[String],
        excluded_subdirs: &[String],
    ) -> Result<Vec<FileMatchResult>> {
        let start_time = Instant::now();
        let cloned = self.acquirer.acquire(repo).await?;

        let base_path = cloned.path().to_string_lossy().into_owned();
        let raw = self
            .searcher
            .search(cloned.path(), search_words, excluded_subdirs)
            .await?;
        let parsed = parse_output(&raw, &base_path, self.searcher.mode())?;
        cloned.release();

        let (results, anomalies): (Vec<_>, Vec<_>) = parsed
            .into_iter()
            .partition(|r| !r.relative_file_name.is_empty());
        if !anomalies.is_empty() {
            let dropped: usize = anomalies.iter().map(|r| r.match_count).sum();
            warn!(
                "repo '{}': dropped {} matches on paths outside {}",
                repo.name, dropped, base_path
            );
        }

        info!(
            "analyzed repo '{}' in {:.2}s: {} files with matches",
            repo.name,
            start_time.elapsed().as_secs_f64(),
            results.len()
        );
        Ok(results)
    }
}
