pub mod acquire;
pub mod analyzer;
pub mod coordinator;
pub mod parse;
pub mod search;


pub use acquire::{ClonedRepo, GitAcquirer};
pub use analyzer::RepositoryAnalyzer;
pub use coordinator::{run, Coordinator};
pub use parse::parse_output;
pub use search::{GrepSearcher, SearchMode};
