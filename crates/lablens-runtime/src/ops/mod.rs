pub mod cohort;
pub mod cooccurrence;
pub mod history;
pub mod summary;

pub use cohort::{cohort_stats, query_page, subset, QueryOptions};
pub use cooccurrence::{matrix, pairs};
pub use history::{panels, repeats};
pub use summary::{summary, test_stats, TestStats};

/// Datasets at least this large are scanned on the rayon pool
pub const PARALLEL_THRESHOLD: usize = 20_000;
