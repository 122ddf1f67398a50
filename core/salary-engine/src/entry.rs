//! FILENAME: core/salary-engine/src/entry.rs
//! PURPOSE: The salary entry record and its fixed-vocabulary dimensions.
//! CONTEXT: Entries are created once (by the submission flow) and never
//! mutated afterwards, except for their vote counters which only the
//! vote module can change.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::EngineError;
use crate::vote::VoteCounts;

/// Unique identifier for a salary entry.
pub type EntryId = u32;

/// Tech-stack tags. Most submissions carry a handful of tags.
pub type TechStack = SmallVec<[String; 4]>;

// ============================================================================
// EXPERIENCE LEVEL
// ============================================================================

/// Seniority bands, declared in their canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Lead,
    Principal,
    Staff,
}

impl ExperienceLevel {
    /// Every level in canonical order. Grouping by level walks this list.
    pub const ALL: [ExperienceLevel; 6] = [
        ExperienceLevel::Junior,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Lead,
        ExperienceLevel::Principal,
        ExperienceLevel::Staff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::Mid => "Mid",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Lead => "Lead",
            ExperienceLevel::Principal => "Principal",
            ExperienceLevel::Staff => "Staff",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExperienceLevel::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| EngineError::InvalidArgument(format!("unknown experience level '{}'", s)))
    }
}

// ============================================================================
// REMOTE POLICY / EMPLOYMENT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RemotePolicy {
    Remote,
    Hybrid,
    #[default]
    #[serde(rename = "On-site")]
    OnSite,
}

impl RemotePolicy {
    pub const ALL: [RemotePolicy; 3] = [RemotePolicy::Remote, RemotePolicy::Hybrid, RemotePolicy::OnSite];

    pub fn as_str(&self) -> &'static str {
        match self {
            RemotePolicy::Remote => "Remote",
            RemotePolicy::Hybrid => "Hybrid",
            RemotePolicy::OnSite => "On-site",
        }
    }
}

impl fmt::Display for RemotePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemotePolicy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RemotePolicy::ALL
            .iter()
            .copied()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| EngineError::InvalidArgument(format!("unknown remote policy '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Freelance,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Freelance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Freelance => "Freelance",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmploymentType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EngineError::InvalidArgument(format!("unknown employment type '{}'", s)))
    }
}

// ============================================================================
// SALARY ENTRY
// ============================================================================

/// One community-submitted compensation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSalaryEntry")]
pub struct SalaryEntry {
    pub id: EntryId,
    pub role: String,
    pub company: Option<String>,
    pub country: String,
    pub city: Option<String>,
    pub experience_level: ExperienceLevel,
    pub years_of_experience: u32,
    pub base_salary: f64,
    pub bonuses: f64,
    pub stock_options: f64,
    /// Always base + bonuses + stock as of creation.
    total_compensation: f64,
    pub currency: String,
    pub remote_policy: RemotePolicy,
    pub employment_type: EmploymentType,
    pub tech_stack: TechStack,
    /// Written only by `with_votes` and `VoteBook::apply_to`.
    #[serde(flatten)]
    pub(crate) votes: VoteCounts,
    pub submitted_at: DateTime<Utc>,
}

/// Wire form of an entry. The total is optional on input and is checked
/// against the components when present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSalaryEntry {
    id: EntryId,
    role: String,
    #[serde(default)]
    company: Option<String>,
    country: String,
    #[serde(default)]
    city: Option<String>,
    experience_level: ExperienceLevel,
    #[serde(default)]
    years_of_experience: u32,
    base_salary: f64,
    #[serde(default)]
    bonuses: f64,
    #[serde(default)]
    stock_options: f64,
    #[serde(default)]
    total_compensation: Option<f64>,
    currency: String,
    #[serde(default)]
    remote_policy: RemotePolicy,
    #[serde(default)]
    employment_type: EmploymentType,
    #[serde(default)]
    tech_stack: TechStack,
    #[serde(flatten)]
    votes: VoteCounts,
    submitted_at: DateTime<Utc>,
}

impl TryFrom<RawSalaryEntry> for SalaryEntry {
    type Error = EngineError;

    fn try_from(raw: RawSalaryEntry) -> Result<Self, Self::Error> {
        let mut entry = SalaryEntry::new(
            raw.id,
            raw.role,
            raw.country,
            raw.experience_level,
            raw.base_salary,
            raw.bonuses,
            raw.stock_options,
            raw.currency,
            raw.submitted_at,
        );

        if let Some(given) = raw.total_compensation {
            if (given - entry.total_compensation).abs() > 1e-6 {
                return Err(EngineError::InvalidArgument(format!(
                    "entry {}: totalCompensation {} does not equal base + bonuses + stock ({})",
                    raw.id, given, entry.total_compensation
                )));
            }
        }

        entry.company = raw.company;
        entry.city = raw.city;
        entry.years_of_experience = raw.years_of_experience;
        entry.remote_policy = raw.remote_policy;
        entry.employment_type = raw.employment_type;
        entry.tech_stack = raw.tech_stack;
        entry.votes = raw.votes;
        Ok(entry)
    }
}

impl SalaryEntry {
    /// Creates an entry with zero votes. Total compensation is derived here
    /// and nowhere else.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EntryId,
        role: impl Into<String>,
        country: impl Into<String>,
        experience_level: ExperienceLevel,
        base_salary: f64,
        bonuses: f64,
        stock_options: f64,
        currency: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        SalaryEntry {
            id,
            role: role.into(),
            company: None,
            country: country.into(),
            city: None,
            experience_level,
            years_of_experience: 0,
            base_salary,
            bonuses,
            stock_options,
            total_compensation: base_salary + bonuses + stock_options,
            currency: currency.into(),
            remote_policy: RemotePolicy::default(),
            employment_type: EmploymentType::default(),
            tech_stack: TechStack::new(),
            votes: VoteCounts::default(),
            submitted_at,
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_years(mut self, years: u32) -> Self {
        self.years_of_experience = years;
        self
    }

    pub fn with_remote_policy(mut self, policy: RemotePolicy) -> Self {
        self.remote_policy = policy;
        self
    }

    pub fn with_employment_type(mut self, kind: EmploymentType) -> Self {
        self.employment_type = kind;
        self
    }

    pub fn with_tech<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tech_stack = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Seeds the vote counters, e.g. when loading already-voted entries from
    /// the data source.
    pub fn with_votes(mut self, votes: VoteCounts) -> Self {
        self.votes = votes;
        self
    }

    pub fn total_compensation(&self) -> f64 {
        self.total_compensation
    }

    /// Current counters. They change only through `VoteBook`:
    ///
    /// ```compile_fail
    /// use chrono::Utc;
    /// use salary_engine::{ExperienceLevel, SalaryEntry, VoteCounts};
    ///
    /// let mut entry = SalaryEntry::new(1, "QA Engineer", "India", ExperienceLevel::Junior,
    ///     1.0, 0.0, 0.0, "INR", Utc::now());
    /// entry.votes = VoteCounts::new(0, 0);
    /// ```
    pub fn votes(&self) -> VoteCounts {
        self.votes
    }

    pub fn net_score(&self) -> i64 {
        self.votes.net_score()
    }
}
