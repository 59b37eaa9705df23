//! Error types for the analysis pipeline.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GrepStatsError>;

#[derive(Debug, Error)]
pub enum GrepStatsError {
    /// The configuration document could not be read, parsed or validated
    #[error("configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// A temporary clone directory could not be created
    #[error("unable to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),

    /// `git clone` failed or could not be started
    #[error("unable to git clone {repository}: {message}")]
    Acquisition { repository: String, message: String },

    /// grep failed for a reason other than "no matches"
    #[error("unable to execute grep command: {message}")]
    SearchExecution { message: String },

    /// A line of grep output did not have the expected shape
    #[error("unexpected grep output line {line:?}: {reason}")]
    ParseAnomaly { line: String, reason: String },

    /// The report could not be serialized or written
    #[error("unable to save result to {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },

    #[error("concurrency limiter closed")]
    LimiterClosed,

    #[error("task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    /// Any failure of a single repository's analysis, tagged with the repository
    #[error("failed on repo '{name}': {source}")]
    Repository {
        name: String,
        #[source]
        source: Box<GrepStatsError>,
    },
}

impl GrepStatsError {
    pub fn config(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Persistence {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Attribute this error to a repository, unless it already is.
    pub fn in_repository(self, name: &str) -> Self {
        match self {
            err @ Self::Repository { .. } => err,
            err => Self::Repository {
                name: name.to_string(),
                source: Box::new(err),
            },
        }
    }

    /// Name of the repository the error belongs to, if any
    pub fn repository(&self) -> Option<&str> {
        match self {
            Self::Repository { name, .. } => Some(name),
            Self::Acquisition { repository, .. } => Some(repository),
            _ => None,
        }
    }
}
