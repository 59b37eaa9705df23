//! Concurrent fan-out over all repositories and the ranked report.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::info;

use super::acquire::GitAcquirer;
use super::analyzer::RepositoryAnalyzer;
use super::search::GrepSearcher;
use crate::config::{Config, Settings};
use crate::error::{GrepStatsError, Result};
use crate::output::write_report;
use crate::types::{RepositoryAnalysis, Report};

/// Fans the analyzer out over every configured repository and ranks the results.
#[derive(Debug, Clone, Default)]
pub struct Coordinator {
    analyzer: RepositoryAnalyzer,
}

impl Coordinator {
    pub fn new(analyzer: RepositoryAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Build a coordinator using the commands named in `settings` and the
    /// search mode chosen in `config`.
    pub fn from_settings(settings: &Settings, config: &Config) -> Self {
        Self::new(RepositoryAnalyzer::new(
            GitAcquirer::new(settings.git_binary.clone()),
            GrepSearcher::new(settings.grep_binary.clone(), config.search_mode),
        ))
    }

    /// Analyze every repository concurrently and build the ranked report.
    ///
    /// One task per repository; at most `config.max_concurrency` run at once
    /// when that is set. The first failure aborts the remaining tasks and is
    /// returned; there is no partial report.
    pub async fn analyze_all(&self, config: Arc<Config>) -> Result<Report> {
        let start_time = Instant::now();
        let total = config.repositories.len();
        let limiter = config.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));

        // Each task owns exactly one slot, addressed by its configuration index
        let mut slots: Vec<Option<RepositoryAnalysis>> = vec![None; total];
        let mut tasks = JoinSet::new();

        for index in 0..total {
            let analyzer = self.analyzer.clone();
            let config = Arc::clone(&config);
            let limiter = limiter.clone();

            tasks.spawn(async move {
                let _permit = match limiter {
                    Some(limiter) => Some(
                        limiter
                            .acquire_owned()
                            .await
                            .map_err(|_| GrepStatsError::LimiterClosed)?,
                    ),
                    None => None,
                };

                let repo = &config.repositories[index];
                let excluded = config.excluded_subdirs_for(repo);
                let file_matches = analyzer
                    .analyze(repo, &config.search_words, &excluded)
                    .await
                    .map_err(|e| e.in_repository(&repo.name))?;

                Ok::<_, GrepStatsError>((index, RepositoryAnalysis::new(&repo.name, file_matches)))
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => Err(GrepStatsError::from(e)),
            };
            match outcome {
                Ok((index, analysis)) => slots[index] = Some(analysis),
                Err(e) => {
                    tasks.abort_all();
                    // Let aborted tasks drop their clones before we return
                    while tasks.join_next().await.is_some() {}
                    return Err(e);
                }
            }
        }

        let analyses: Vec<RepositoryAnalysis> = slots.into_iter().flatten().collect();
        let report = Report::build(config.search_words.clone(), analyses);

        info!(
            "analyzed {} repositories in {:.2}s, total count sum {}",
            report.total_applications,
            start_time.elapsed().as_secs_f64(),
            report.total_count_sum
        );
        Ok(report)
    }
}

/// Load the configuration, analyze every repository and write the report.
pub async fn run(settings: &Settings) -> Result<Report> {
    let config = Arc::new(Config::load(&settings.config_path).await?);
    info!(
        "loaded {} repositories and {} search words from {}",
        config.repositories.len(),
        config.search_words.len(),
        settings.config_path.display()
    );

    let report = Coordinator::from_settings(settings, &config)
        .analyze_all(config)
        .await?;
    write_report(&settings.results_path, &report).await?;

    info!("wrote report to {}", settings.results_path.display());
    Ok(report)
}
