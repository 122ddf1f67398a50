//! FILENAME: core/stats-engine/src/sort.rs
//! PURPOSE: Display ordering for salary entries.
//! CONTEXT: Every key sorts descending with a stable sort, so entries with
//! equal keys keep their input order.

use std::cmp::Ordering;

use salary_engine::{log_debug, SalaryEntry};

use crate::definition::SortKey;

/// Descending comparison for `key`.
fn compare(a: &SalaryEntry, b: &SalaryEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::Newest => b.submitted_at.cmp(&a.submitted_at),
        SortKey::Highest => b.total_compensation().total_cmp(&a.total_compensation()),
        SortKey::MostVoted => b.net_score().cmp(&a.net_score()),
    }
}

/// Sorts borrowed entries in place.
pub fn sort_refs(records: &mut [&SalaryEntry], key: SortKey) {
    records.sort_by(|a, b| compare(a, b, key));
    log_debug!("SORT", "sorted {} entries by {}", records.len(), key);
}

/// Returns a sorted copy of `records`; the input is left as it was.
pub fn sort_entries(records: &[SalaryEntry], key: SortKey) -> Vec<SalaryEntry> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key));
    log_debug!("SORT", "sorted {} entries by {}", sorted.len(), key);
    sorted
}
