pub mod aggregation;

pub use aggregation::{count_sum, rank_by_count_sum, total_count_sum};
