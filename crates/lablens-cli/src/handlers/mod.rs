pub mod cohort_stats;
pub mod export;
pub mod init;
pub mod matrix;
pub mod pairs;
pub mod panels;
pub mod query;
pub mod repeats;
pub mod stats;
pub mod subset;
