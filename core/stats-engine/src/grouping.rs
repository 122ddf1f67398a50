//! FILENAME: core/stats-engine/src/grouping.rs
//! Grouping Engine - Partitions entries by a dimension and aggregates each
//! partition.
//!
//! Partitions are collected in first-seen order (a hash index points into an
//! ordered list), so every ordering below is deterministic for a given
//! input order before any sort is applied.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use salary_engine::{log_debug, ExperienceLevel, RemotePolicy, SalaryEntry};

use crate::definition::{CountryGroup, ExperienceGroup, RemotePolicyGroup, RoleGroup};
use crate::statistics::average;

// ============================================================================
// PARTITIONING
// ============================================================================

/// One partition: its key and the total compensation of each member.
struct Partition<K> {
    key: K,
    totals: Vec<f64>,
}

impl<K> Partition<K> {
    fn count(&self) -> usize {
        self.totals.len()
    }

    fn avg_total(&self) -> f64 {
        average(&self.totals)
    }
}

/// Splits `records` by `key_of`, keeping partitions in first-seen order.
fn partition_by<'a, K, F>(records: &[&'a SalaryEntry], key_of: F) -> Vec<Partition<K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&'a SalaryEntry) -> K,
{
    let mut index: FxHashMap<K, usize> = FxHashMap::default();
    let mut partitions: Vec<Partition<K>> = Vec::new();

    for &entry in records {
        let key = key_of(entry);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            partitions.push(Partition { key, totals: Vec::new() });
            partitions.len() - 1
        });
        partitions[slot].totals.push(entry.total_compensation());
    }

    partitions
}

// ============================================================================
// GROUPINGS
// ============================================================================

/// One row per experience level that has entries, in canonical level order.
pub fn group_by_experience_level_refs(records: &[&SalaryEntry]) -> Vec<ExperienceGroup> {
    let partitions = partition_by(records, |e| e.experience_level);

    let groups: Vec<ExperienceGroup> = ExperienceLevel::ALL
        .iter()
        .filter_map(|level| partitions.iter().find(|p| p.key == *level))
        .map(|p| ExperienceGroup {
            level: p.key,
            count: p.count(),
            avg_total_comp: p.avg_total(),
        })
        .collect();

    log_debug!("GROUP", "by_experience: {} levels from {} entries", groups.len(), records.len());
    groups
}

/// One row per country, most entries first. Equal counts keep first-seen
/// order.
pub fn group_by_country_refs(records: &[&SalaryEntry]) -> Vec<CountryGroup> {
    let mut partitions = partition_by(records, |e| e.country.as_str());
    partitions.sort_by(|a, b| b.count().cmp(&a.count()));

    let top = partitions.first().map_or(0, Partition::count);
    let groups: Vec<CountryGroup> = partitions
        .iter()
        .map(|p| CountryGroup {
            country: p.key.to_string(),
            count: p.count(),
            avg_total_comp: p.avg_total(),
            relative_share: if top > 0 { p.count() as f64 / top as f64 } else { 0.0 },
        })
        .collect();

    log_debug!("GROUP", "by_country: {} countries from {} entries", groups.len(), records.len());
    groups
}

/// Highest-paying roles first, at most `limit` rows.
pub fn group_by_role_refs(records: &[&SalaryEntry], limit: usize) -> Vec<RoleGroup> {
    let partitions = partition_by(records, |e| e.role.as_str());

    let mut groups: Vec<RoleGroup> = partitions
        .iter()
        .map(|p| RoleGroup {
            role: p.key.to_string(),
            count: p.count(),
            avg_total_comp: p.avg_total(),
        })
        .collect();
    groups.sort_by(|a, b| b.avg_total_comp.total_cmp(&a.avg_total_comp));
    groups.truncate(limit);

    log_debug!("GROUP", "by_role: {} roles kept (limit {})", groups.len(), limit);
    groups
}

/// Entry count per remote policy with each policy's share of the set.
/// Policies appear in first-seen order.
pub fn group_by_remote_policy_refs(records: &[&SalaryEntry]) -> Vec<RemotePolicyGroup> {
    let partitions: Vec<Partition<RemotePolicy>> = partition_by(records, |e| e.remote_policy);
    let total = records.len();

    partitions
        .iter()
        .map(|p| RemotePolicyGroup {
            policy: p.key,
            count: p.count(),
            share: if total > 0 { p.count() as f64 / total as f64 } else { 0.0 },
        })
        .collect()
}

// ============================================================================
// OWNED-SLICE ENTRY POINTS
// ============================================================================

fn as_refs(records: &[SalaryEntry]) -> Vec<&SalaryEntry> {
    records.iter().collect()
}

pub fn group_by_experience_level(records: &[SalaryEntry]) -> Vec<ExperienceGroup> {
    group_by_experience_level_refs(&as_refs(records))
}

pub fn group_by_country(records: &[SalaryEntry]) -> Vec<CountryGroup> {
    group_by_country_refs(&as_refs(records))
}

pub fn group_by_role(records: &[SalaryEntry], limit: usize) -> Vec<RoleGroup> {
    group_by_role_refs(&as_refs(records), limit)
}

pub fn group_by_remote_policy(records: &[SalaryEntry]) -> Vec<RemotePolicyGroup> {
    group_by_remote_policy_refs(&as_refs(records))
}
