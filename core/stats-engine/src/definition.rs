//! FILENAME: core/stats-engine/src/definition.rs
//! Analytics Definition - What the user asked for and what we hand back.
//!
//! This module contains the types that DESCRIBE a query over salary entries
//! (filter criteria, sort key) and the report shapes the engines produce.
//! These structures are designed to be:
//! - Serializable (they cross the boundary to whatever renders them)
//! - Plain data: no engine state lives here

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use salary_engine::{EngineError, ExperienceLevel, RemotePolicy, SalaryEntry};

// ============================================================================
// FILTER CRITERIA
// ============================================================================

/// Narrowing applied before display and before analytics.
/// `None` on a dimension means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Free-text query, matched case-insensitively. Empty matches everything.
    pub search_text: String,
    pub country: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_experience_level(mut self, level: ExperienceLevel) -> Self {
        self.experience_level = Some(level);
        self
    }

    /// Number of dimension filters in effect (the search box is not counted).
    pub fn active_filter_count(&self) -> usize {
        [
            self.country.is_some(),
            self.role.is_some(),
            self.company.is_some(),
            self.experience_level.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.search_text.is_empty() && self.active_filter_count() == 0
    }

    /// Resets search text and every dimension.
    pub fn clear(&mut self) {
        *self = FilterCriteria::default();
    }
}

// ============================================================================
// SORT KEY
// ============================================================================

/// Display orderings for the browse list. All are descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Latest submission first.
    #[default]
    Newest,
    /// Largest total compensation first.
    Highest,
    /// Largest net score first.
    MostVoted,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Newest, SortKey::Highest, SortKey::MostVoted];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Highest => "highest",
            SortKey::MostVoted => "most-voted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Newest => "Newest First",
            SortKey::Highest => "Highest Salary",
            SortKey::MostVoted => "Most Voted",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                EngineError::InvalidArgument(format!(
                    "unknown sort key '{}' (expected newest, highest or most-voted)",
                    s
                ))
            })
    }
}

// ============================================================================
// STATISTICS REPORT
// ============================================================================

/// Descriptive statistics over a filtered set, at full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub count: usize,
    pub avg_base: f64,
    pub median_base: f64,
    pub avg_total: f64,
    pub median_total: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    pub dominant_currency: String,
}

impl StatsReport {
    /// The report for an empty set: every figure zero.
    pub fn empty(default_currency: &str) -> Self {
        StatsReport {
            count: 0,
            avg_base: 0.0,
            median_base: 0.0,
            avg_total: 0.0,
            median_total: 0.0,
            p25: 0.0,
            p75: 0.0,
            p90: 0.0,
            dominant_currency: default_currency.to_string(),
        }
    }

    /// Whole-number figures for display.
    pub fn rounded(&self) -> RoundedStats {
        RoundedStats {
            count: self.count,
            avg_base: round_for_display(self.avg_base),
            median_base: round_for_display(self.median_base),
            avg_total: round_for_display(self.avg_total),
            median_total: round_for_display(self.median_total),
            p25: round_for_display(self.p25),
            p75: round_for_display(self.p75),
            p90: round_for_display(self.p90),
            dominant_currency: self.dominant_currency.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundedStats {
    pub count: usize,
    pub avg_base: i64,
    pub median_base: i64,
    pub avg_total: i64,
    pub median_total: i64,
    pub p25: i64,
    pub p75: i64,
    pub p90: i64,
    pub dominant_currency: String,
}

/// Nearest integer, halves rounded up (amounts are never negative).
pub fn round_for_display(value: f64) -> i64 {
    value.round() as i64
}

// ============================================================================
// GROUPED REPORTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceGroup {
    pub level: ExperienceLevel,
    pub count: usize,
    pub avg_total_comp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryGroup {
    pub country: String,
    pub count: usize,
    pub avg_total_comp: f64,
    /// Count relative to the largest country in the report (0..=1).
    pub relative_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleGroup {
    pub role: String,
    pub count: usize,
    pub avg_total_comp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePolicyGroup {
    pub policy: RemotePolicy,
    pub count: usize,
    /// Fraction of the whole set (0..=1).
    pub share: f64,
}

impl RemotePolicyGroup {
    /// Whole percentage as shown on the distribution chart.
    pub fn percent(&self) -> i64 {
        round_for_display(self.share * 100.0)
    }
}

macro_rules! impl_rounded_avg {
    ($($group:ty),*) => {
        $(impl $group {
            pub fn avg_total_comp_rounded(&self) -> i64 {
                round_for_display(self.avg_total_comp)
            }
        })*
    };
}

impl_rounded_avg!(ExperienceGroup, CountryGroup, RoleGroup);

/// Everything the statistics page shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub stats: StatsReport,
    pub by_experience: Vec<ExperienceGroup>,
    pub by_country: Vec<CountryGroup>,
    pub by_role: Vec<RoleGroup>,
    pub by_remote_policy: Vec<RemotePolicyGroup>,
}

/// One page of browse results, in the `{items, total}` shape a remote
/// listing endpoint would return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryListing {
    pub items: Vec<SalaryEntry>,
    pub total: usize,
}
