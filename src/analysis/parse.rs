//! Turning raw grep output into per-file match counts.

use std::collections::BTreeMap;
use tracing::debug;

use super::search::SearchMode;
use crate::error::{GrepStatsError, Result};
use crate::types::FileMatchResult;

/// Parse grep output produced in `mode` for a search rooted at `base_path`.
///
/// Results are unique per file and sorted by relative file name.
pub fn parse_output(raw: &str, base_path: &str, mode: SearchMode) -> Result<Vec<FileMatchResult>> {
    match mode {
        SearchMode::Matches => Ok(parse_match_lines(raw, base_path)),
        SearchMode::Count => parse_count_lines(raw, base_path),
    }
}

/// Parse `--only-matching` output: `<path>:<token>` per match.
///
/// Each line adds one to its file's count. Lines with an empty path or an
/// empty token are ignored.
pub fn parse_match_lines(raw: &str, base_path: &str) -> Vec<FileMatchResult> {
    let mut path_counts: BTreeMap<String, usize> = BTreeMap::new();

    for line in raw.lines() {
        match split_match_line(line) {
            Some((path, _token)) => {
                *path_counts.entry(relative_name(path, base_path)).or_insert(0) += 1;
            }
            None if line.is_empty() => {}
            None => debug!("skipping malformed grep output line {:?}", line),
        }
    }

    into_results(path_counts)
}

/// Parse `--count` output: `<path>:<count>` per searched file.
///
/// Files with a count of zero are skipped; a count that is not a number is
/// a parse anomaly.
pub fn parse_count_lines(raw: &str, base_path: &str) -> Result<Vec<FileMatchResult>> {
    let mut path_counts: BTreeMap<String, usize> = BTreeMap::new();

    for line in raw.lines() {
        // The count is always the last field; paths may contain colons
        let (path, count) = match line.rsplit_once(':') {
            Some((path, count)) if !path.is_empty() && !count.is_empty() => (path, count),
            _ => {
                if !line.is_empty() {
                    debug!("skipping malformed grep output line {:?}", line);
                }
                continue;
            }
        };

        let count: usize = count
            .trim()
            .parse()
            .map_err(|e| GrepStatsError::ParseAnomaly {
                line: line.to_string(),
                reason: format!("count is not a number: {}", e),
            })?;
        if count == 0 {
            continue;
        }

        *path_counts.entry(relative_name(path, base_path)).or_insert(0) += count;
    }

    Ok(into_results(path_counts))
}

/// Split `<path>:<token>` on the first colon; `None` unless both parts are non-empty.
fn split_match_line(line: &str) -> Option<(&str, &str)> {
    match line.split_once(':') {
        Some((path, token)) if !path.is_empty() && !token.is_empty() => Some((path, token)),
        _ => None,
    }
}

/// `path` with the `<base_path>/` prefix removed, or an empty string when
/// `path` does not start with that prefix.
pub fn relative_name(path: &str, base_path: &str) -> String {
    let prefix = format!("{}/", base_path.trim_end_matches('/'));
    path.strip_prefix(prefix.as_str())
        .map(str::to_string)
        .unwrap_or_default()
}

fn into_results(path_counts: BTreeMap<String, usize>) -> Vec<FileMatchResult> {
    path_counts
        .into_iter()
        .map(|(name, count)| FileMatchResult::new(name, count))
        .collect()
}
