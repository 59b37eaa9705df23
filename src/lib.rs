//! # Repository Word Statistics
//!
//! `grepstats` clones a list of repositories, greps each of them for a
//! configured set of words and ranks the repositories by how many matches
//! they contain.
//!
//! ## Pipeline
//!
//! - [`analysis::GitAcquirer`] clones a repository into a private temporary directory
//! - [`analysis::GrepSearcher`] runs a recursive, case-insensitive grep over it
//! - [`analysis::parse`] turns grep output into per-file match counts
//! - [`analysis::RepositoryAnalyzer`] chains the three and removes the clone
//! - [`analysis::Coordinator`] runs one analyzer task per repository and ranks the results
//!
//! ## Example
//!
//! ```no_run
//! use grepstats::config::Settings;
//!
//! # async fn example() -> grepstats::Result<()> {
//! let report = grepstats::analysis::run(&Settings::from_env()).await?;
//! println!("{} matches in total", report.total_count_sum);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod output;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use error::{GrepStatsError, Result};
pub use types::{FileMatchResult, Report, RepositoryAnalysis};
