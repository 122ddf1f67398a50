//! FILENAME: core/salary-engine/src/submission.rs
//! PURPOSE: Turns raw submission form input into a `SalaryEntry`.
//! CONTEXT: The form collects strings; this is the one place they are
//! checked and converted. Total compensation is derived by the entry
//! constructor, never taken from the form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ReferenceTables;
use crate::entry::{EmploymentType, EntryId, ExperienceLevel, RemotePolicy, SalaryEntry};
use crate::error::{EngineError, Result};

/// Raw values as collected by the three-step submission form.
/// Optional fields are left empty when the user skips them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SalarySubmission {
    pub role: String,
    pub company: String,
    pub country: String,
    pub city: String,
    pub experience_level: String,
    pub years_of_experience: String,
    pub base_salary: String,
    pub currency: String,
    pub bonuses: String,
    pub stock_options: String,
    pub employment_type: String,
    pub remote_policy: String,
    pub tech_stack: Vec<String>,
}

fn invalid(reason: impl Into<String>) -> EngineError {
    EngineError::InvalidSubmission(reason.into())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parses an optional non-negative amount; empty means zero.
fn parse_amount(value: &str, field: &str) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| invalid(format!("{} is not a number: '{}'", field, trimmed)))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(invalid(format!("{} must be a non-negative amount", field)));
    }
    Ok(amount)
}

impl SalarySubmission {
    /// Step 1 gate: role, country and experience level are filled in.
    pub fn role_step_complete(&self) -> bool {
        non_empty(&self.role).is_some()
            && non_empty(&self.country).is_some()
            && non_empty(&self.experience_level).is_some()
    }

    /// Step 2 gate: base salary and currency are filled in.
    pub fn compensation_step_complete(&self) -> bool {
        non_empty(&self.base_salary).is_some() && non_empty(&self.currency).is_some()
    }

    /// Toggles a tech tag on or off, keeping selection order.
    pub fn toggle_tech(&mut self, tech: &str) {
        if let Some(pos) = self.tech_stack.iter().position(|t| t == tech) {
            self.tech_stack.remove(pos);
        } else {
            self.tech_stack.push(tech.to_string());
        }
    }

    /// Validates the form and builds the entry.
    pub fn into_entry(
        self,
        id: EntryId,
        submitted_at: DateTime<Utc>,
        reference: &ReferenceTables,
    ) -> Result<SalaryEntry> {
        let role = non_empty(&self.role).ok_or_else(|| invalid("role is required"))?;
        let country = non_empty(&self.country).ok_or_else(|| invalid("country is required"))?;
        let level: ExperienceLevel = non_empty(&self.experience_level)
            .ok_or_else(|| invalid("experience level is required"))?
            .parse()
            .map_err(|_| invalid(format!("unknown experience level '{}'", self.experience_level.trim())))?;

        if non_empty(&self.base_salary).is_none() {
            return Err(invalid("base salary is required"));
        }
        let base_salary = parse_amount(&self.base_salary, "base salary")?;
        if base_salary <= 0.0 {
            return Err(invalid("base salary must be greater than zero"));
        }
        let bonuses = parse_amount(&self.bonuses, "bonuses")?;
        let stock_options = parse_amount(&self.stock_options, "stock options")?;

        let currency = non_empty(&self.currency).ok_or_else(|| invalid("currency is required"))?;
        if !reference.currencies.contains(&currency) {
            return Err(invalid(format!("unsupported currency '{}'", currency)));
        }

        let years = match non_empty(&self.years_of_experience) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| invalid(format!("years of experience must be a whole number: '{}'", raw)))?,
            None => 0,
        };
        let employment_type = match non_empty(&self.employment_type) {
            Some(raw) => raw.parse::<EmploymentType>().map_err(|e| invalid(e.to_string()))?,
            None => EmploymentType::default(),
        };
        let remote_policy = match non_empty(&self.remote_policy) {
            Some(raw) => raw.parse::<RemotePolicy>().map_err(|e| invalid(e.to_string()))?,
            None => RemotePolicy::default(),
        };

        let mut entry = SalaryEntry::new(
            id, role, country, level, base_salary, bonuses, stock_options, currency, submitted_at,
        )
        .with_years(years)
        .with_employment_type(employment_type)
        .with_remote_policy(remote_policy)
        .with_tech(self.tech_stack.iter().filter_map(|t| non_empty(t)));

        entry.company = non_empty(&self.company);
        entry.city = non_empty(&self.city);
        Ok(entry)
    }
}
