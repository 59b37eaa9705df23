use crate::types::{FileMatchResult, RepositoryAnalysis};

/// Total matches across all files of one repository
pub fn count_sum(file_matches: &[FileMatchResult]) -> usize {
    file_matches.iter().map(|m| m.match_count).sum()
}

/// Total matches across all analyzed repositories
pub fn total_count_sum(analyses: &[RepositoryAnalysis]) -> usize {
    analyses.iter().map(|a| a.count_sum).sum()
}

/// Sort analyses by `count_sum`, highest first.
///
/// The sort is stable, so repositories with equal sums keep their
/// configuration order.
pub fn rank_by_count_sum(analyses: &mut [RepositoryAnalysis]) {
    analyses.sort_by(|a, b| b.count_sum.cmp(&a.count_sum));
}
