//! FILENAME: core/stats-engine/src/engine.rs
//! Analytics Engine - Runs the filter/sort/statistics/grouping pipeline.
//!
//! This module takes the engine configuration and a read-only entry
//! sequence and produces either a browse listing or an analytics report.
//!
//! Algorithm:
//! 1. Filter once, borrowing the input
//! 2. Browse: sort the survivors for display and clone them out
//! 3. Analyze: compute statistics and every grouping over the same survivors
//!
//! Every call recomputes from scratch; nothing is cached between calls.

use salary_engine::{log_debug, ApprovalPolicy, EngineConfig, SalaryEntry};

use crate::definition::{AnalyticsReport, FilterCriteria, SalaryListing, SortKey};
use crate::filter::filter_refs;
use crate::grouping::{
    group_by_country_refs, group_by_experience_level_refs, group_by_remote_policy_refs,
    group_by_role_refs,
};
use crate::sort::sort_refs;
use crate::statistics::compute_statistics_refs;

// ============================================================================
// SALARY ANALYTICS
// ============================================================================

/// Pipeline entry point, configured once and reused across calls.
#[derive(Debug, Clone)]
pub struct SalaryAnalytics {
    default_currency: String,
    top_roles_limit: usize,
    approval: ApprovalPolicy,
}

impl SalaryAnalytics {
    pub fn new(config: &EngineConfig) -> Self {
        SalaryAnalytics {
            default_currency: config.default_currency.clone(),
            top_roles_limit: config.top_roles_limit,
            approval: config.approval_policy(),
        }
    }

    /// Filtered and sorted entries for the browse list.
    pub fn browse(&self, records: &[SalaryEntry], criteria: &FilterCriteria, sort_key: SortKey) -> SalaryListing {
        let mut survivors = filter_refs(records, criteria);
        sort_refs(&mut survivors, sort_key);

        let items: Vec<SalaryEntry> = survivors.into_iter().cloned().collect();
        log_debug!("ANALYTICS", "browse: {} of {} entries by {}", items.len(), records.len(), sort_key);
        SalaryListing {
            total: items.len(),
            items,
        }
    }

    /// Statistics and every grouping over the filtered entries.
    pub fn analyze(&self, records: &[SalaryEntry], criteria: &FilterCriteria) -> AnalyticsReport {
        let survivors = filter_refs(records, criteria);

        let report = AnalyticsReport {
            stats: compute_statistics_refs(&survivors, &self.default_currency),
            by_experience: group_by_experience_level_refs(&survivors),
            by_country: group_by_country_refs(&survivors),
            by_role: group_by_role_refs(&survivors, self.top_roles_limit),
            by_remote_policy: group_by_remote_policy_refs(&survivors),
        };

        log_debug!(
            "ANALYTICS",
            "analyze: {} of {} entries, {} countries, {} roles",
            report.stats.count,
            records.len(),
            report.by_country.len(),
            report.by_role.len()
        );
        report
    }

    /// Whether the entry has reached the configured approval threshold.
    pub fn is_approved(&self, entry: &SalaryEntry) -> bool {
        self.approval.is_approved(&entry.votes())
    }

    /// Number of approved entries among those matching `criteria`.
    pub fn approved_count(&self, records: &[SalaryEntry], criteria: &FilterCriteria) -> usize {
        filter_refs(records, criteria)
            .into_iter()
            .filter(|entry| self.is_approved(entry))
            .count()
    }
}

impl Default for SalaryAnalytics {
    fn default() -> Self {
        SalaryAnalytics::new(&EngineConfig::default())
    }
}
