//! FILENAME: core/stats-engine/src/lib.rs
//! Salary analytics subsystem.
//!
//! This crate provides the browse and statistics pipeline as a standalone
//! module. It depends on `salary-engine` only for shared types
//! (SalaryEntry, ExperienceLevel, EngineConfig, EngineError).
//!
//! Layers:
//! - `definition`: Serializable query and report types (what was asked, what comes back)
//! - `filter` / `sort`: Browse-list narrowing and ordering
//! - `statistics`: Averages, medians, percentiles, dominant currency
//! - `grouping`: Per-dimension breakdowns
//! - `engine`: The pipeline tying them together

pub mod definition;
pub mod filter;
pub mod sort;
pub mod statistics;
pub mod grouping;
pub mod engine;

pub use definition::*;
pub use engine::SalaryAnalytics;
pub use filter::{entry_matches, filter_entries};
pub use grouping::{group_by_country, group_by_experience_level, group_by_remote_policy, group_by_role};
pub use sort::sort_entries;
pub use statistics::{average, compute_statistics, dominant_currency, median, percentile};
