//! # Common Types
//!
//! This module contains the types shared between the analysis pipeline and the
//! report writer. Field names on the serialized types follow the report
//! document layout (`file_name`, `count_sum`, `grep_results`, ...).

use serde::{Deserialize, Serialize};

/// Number of matches grep attributed to a single file of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMatchResult {
    /// Path of the file relative to the root of the cloned repository
    #[serde(rename = "file_name")]
    pub relative_file_name: String,
    /// Matching lines (match mode) or grep's per-file count (count mode)
    #[serde(rename = "count")]
    pub match_count: usize,
}

impl FileMatchResult {
    pub fn new(relative_file_name: impl Into<String>, match_count: usize) -> Self {
        Self {
            relative_file_name: relative_file_name.into(),
            match_count,
        }
    }
}

/// The result of analyzing one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryAnalysis {
    /// Repository name as given in the configuration
    pub name: String,
    /// Sum of `match_count` over `file_matches`
    pub count_sum: usize,
    /// One entry per file with at least one match
    #[serde(rename = "grep_results")]
    pub file_matches: Vec<FileMatchResult>,
}

impl RepositoryAnalysis {
    /// Build an analysis, deriving `count_sum` from the file matches.
    pub fn new(name: impl Into<String>, file_matches: Vec<FileMatchResult>) -> Self {
        Self {
            name: name.into(),
            count_sum: crate::utils::aggregation::count_sum(&file_matches),
            file_matches,
        }
    }
}

/// The ranked report written at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Number of repositories that were analyzed
    pub total_applications: usize,
    /// The search words from the configuration
    pub search_words: Vec<String>,
    /// Sum of `count_sum` over all analyses
    pub total_count_sum: usize,
    /// Analyses ranked by `count_sum`, highest first
    #[serde(rename = "applications")]
    pub analyses: Vec<RepositoryAnalysis>,
}

impl Report {
    /// Aggregate and rank the per-repository analyses into a report.
    pub fn build(search_words: Vec<String>, mut analyses: Vec<RepositoryAnalysis>) -> Self {
        crate::utils::aggregation::rank_by_count_sum(&mut analyses);
        Self {
            total_applications: analyses.len(),
            search_words,
            total_count_sum: crate::utils::aggregation::total_count_sum(&analyses),
            analyses,
        }
    }
}
