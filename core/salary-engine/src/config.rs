//! FILENAME: core/salary-engine/src/config.rs
//! PURPOSE: Engine configuration and the reference tables behind the
//! filter dropdowns and the submission form.
//! CONTEXT: Every field has a default, so a config document only needs to
//! name what it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::currency::{CurrencyTable, DEFAULT_CURRENCY};
use crate::error::Result;
use crate::log_info;

/// Net score an entry needs before it is shown as community verified.
/// Placeholder only: deployments set `approvalThreshold` in their config.
pub const DEFAULT_APPROVAL_THRESHOLD: i64 = 5;

/// How many roles the "top paying roles" breakdown keeps.
pub const DEFAULT_TOP_ROLES_LIMIT: usize = 8;

// ============================================================================
// REFERENCE TABLES
// ============================================================================

/// Fixed vocabularies offered to users. Passed explicitly to whatever needs
/// them instead of living in globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceTables {
    pub countries: Vec<String>,
    pub roles: Vec<String>,
    pub companies: Vec<String>,
    pub currencies: CurrencyTable,
    pub tech_options: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ReferenceTables {
    fn default() -> Self {
        ReferenceTables {
            countries: owned(&[
                "Sri Lanka", "India", "United States", "United Kingdom", "Germany",
                "Netherlands", "Canada", "Australia", "Singapore", "Japan",
                "France", "Sweden", "Switzerland", "Ireland", "Spain",
            ]),
            roles: owned(&[
                "Software Engineer", "Frontend Engineer", "Backend Engineer",
                "Full Stack Engineer", "DevOps Engineer", "Data Engineer",
                "Data Scientist", "Machine Learning Engineer", "QA Engineer",
                "Mobile Engineer", "Engineering Manager", "Product Manager",
                "Site Reliability Engineer", "Security Engineer",
            ]),
            companies: owned(&[
                "Google", "Microsoft", "Amazon", "Meta", "Apple", "Netflix",
                "Spotify", "Shopify", "Stripe", "Atlassian", "WSO2", "Sysco LABS",
                "IFS", "Virtusa", "99x", "Booking.com", "Adyen", "SAP", "Zalando",
                "Canva", "Grab", "Rakuten", "Infosys", "Thoughtworks", "Other",
            ]),
            currencies: CurrencyTable::default(),
            tech_options: owned(&[
                "JavaScript", "TypeScript", "Python", "Java", "Go", "Rust", "C++", "C#",
                "Ruby", "PHP", "Swift", "Kotlin", "Scala", "React", "Vue", "Angular",
                "Node.js", "Django", "Spring Boot", "AWS", "Azure", "GCP", "Docker",
                "Kubernetes", "PostgreSQL", "MongoDB", "Redis", "GraphQL",
            ]),
        }
    }
}

// ============================================================================
// ENGINE CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Minimum net score for an entry to count as approved.
    pub approval_threshold: i64,
    /// Currency reported when a statistics set is empty.
    pub default_currency: String,
    pub top_roles_limit: usize,
    pub reference: ReferenceTables,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
            default_currency: DEFAULT_CURRENCY.to_string(),
            top_roles_limit: DEFAULT_TOP_ROLES_LIMIT,
            reference: ReferenceTables::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log_info!(
            "CONFIG",
            "loaded {:?} threshold={} default_currency={}",
            path, config.approval_threshold, config.default_currency
        );
        Ok(config)
    }

    pub fn approval_policy(&self) -> crate::vote::ApprovalPolicy {
        crate::vote::ApprovalPolicy::new(self.approval_threshold)
    }
}
