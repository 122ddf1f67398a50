//! FILENAME: core/stats-engine/src/filter.rs
//! PURPOSE: Narrows a salary entry sequence by search text and exact-match
//! dimension filters.
//! CONTEXT: Stable: surviving entries keep their input order. The input is
//! never modified.

use salary_engine::{log_debug, SalaryEntry};

use crate::definition::FilterCriteria;

/// Case-insensitive substring match against role, company, country, city
/// and every tech tag. `query` must already be lower-cased.
fn matches_search(entry: &SalaryEntry, query: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(query);

    contains(entry.role.as_str())
        || entry.company.as_deref().is_some_and(contains)
        || contains(entry.country.as_str())
        || entry.city.as_deref().is_some_and(contains)
        || entry.tech_stack.iter().any(|tag| contains(tag.as_str()))
}

/// Exact, case-sensitive equality on every dimension that is set.
fn matches_dimensions(entry: &SalaryEntry, criteria: &FilterCriteria) -> bool {
    if let Some(country) = &criteria.country {
        if &entry.country != country {
            return false;
        }
    }
    if let Some(role) = &criteria.role {
        if &entry.role != role {
            return false;
        }
    }
    if let Some(company) = &criteria.company {
        if entry.company.as_ref() != Some(company) {
            return false;
        }
    }
    if let Some(level) = criteria.experience_level {
        if entry.experience_level != level {
            return false;
        }
    }
    true
}

/// Returns true if the entry passes every constraint in `criteria`.
pub fn entry_matches(entry: &SalaryEntry, criteria: &FilterCriteria) -> bool {
    if !criteria.search_text.is_empty() && !matches_search(entry, &criteria.search_text.to_lowercase()) {
        return false;
    }
    matches_dimensions(entry, criteria)
}

/// Borrowing filter used by the pipeline.
pub fn filter_refs<'a>(records: &'a [SalaryEntry], criteria: &FilterCriteria) -> Vec<&'a SalaryEntry> {
    if criteria.is_unrestricted() {
        return records.iter().collect();
    }

    let query = criteria.search_text.to_lowercase();
    let result: Vec<&SalaryEntry> = records
        .iter()
        .filter(|entry| query.is_empty() || matches_search(entry, &query))
        .filter(|entry| matches_dimensions(entry, criteria))
        .collect();

    log_debug!(
        "FILTER",
        "kept {} of {} (search={:?} active_filters={})",
        result.len(),
        records.len(),
        criteria.search_text,
        criteria.active_filter_count()
    );
    result
}

/// Returns the subsequence of `records` matching `criteria`.
pub fn filter_entries(records: &[SalaryEntry], criteria: &FilterCriteria) -> Vec<SalaryEntry> {
    filter_refs(records, criteria).into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use salary_engine::ExperienceLevel;

    fn entry(id: u32, role: &str, country: &str, company: Option<&str>, level: ExperienceLevel) -> SalaryEntry {
        let mut e = SalaryEntry::new(id, role, country, level, 1000.0, 0.0, 0.0, "USD", Utc::now());
        e.company = company.map(str::to_string);
        e
    }

    fn dataset() -> Vec<SalaryEntry> {
        vec![
            entry(1, "Backend Engineer", "Sri Lanka", Some("WSO2"), ExperienceLevel::Senior)
                .with_city("Colombo")
                .with_tech(["Java", "Kubernetes"]),
            entry(2, "Frontend Engineer", "India", None, ExperienceLevel::Mid).with_tech(["React", "TypeScript"]),
            entry(3, "Data Engineer", "Sri Lanka", Some("IFS"), ExperienceLevel::Senior).with_tech(["Python"]),
            entry(4, "Backend Engineer", "Germany", Some("SAP"), ExperienceLevel::Lead)
                .with_city("Berlin")
                .with_tech(["Go"]),
        ]
    }

    fn ids(entries: &[SalaryEntry]) -> Vec<u32> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_unrestricted_returns_everything_in_order() {
        let data = dataset();
        assert_eq!(ids(&filter_entries(&data, &FilterCriteria::new())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let data = dataset();
        // role
        assert_eq!(ids(&filter_entries(&data, &FilterCriteria::new().with_search("BACKEND"))), vec![1, 4]);
        // company
        assert_eq!(ids(&filter_entries(&data, &FilterCriteria::new().with_search("wso"))), vec![1]);
        // city
        assert_eq!(ids(&filter_entries(&data, &FilterCriteria::new().with_search("berlin"))), vec![4]);
        // tech tag
        assert_eq!(ids(&filter_entries(&data, &FilterCriteria::new().with_search("typescript"))), vec![2]);
        // country
        assert_eq!(ids(&filter_entries(&data, &FilterCriteria::new().with_search("lanka"))), vec![1, 3]);
        assert!(filter_entries(&data, &FilterCriteria::new().with_search("cobol")).is_empty());
    }

    #[test]
    fn test_dimensions_are_exact_and_and_combined() {
        let data = dataset();
        let criteria = FilterCriteria::new()
            .with_country("Sri Lanka")
            .with_experience_level(ExperienceLevel::Senior);
        assert_eq!(ids(&filter_entries(&data, &criteria)), vec![1, 3]);

        let criteria = criteria.with_company("IFS");
        assert_eq!(ids(&filter_entries(&data, &criteria)), vec![3]);

        // Case-sensitive.
        assert!(filter_entries(&data, &FilterCriteria::new().with_country("sri lanka")).is_empty());
    }

    #[test]
    fn test_company_filter_skips_entries_without_company() {
        let data = dataset();
        let result = filter_entries(&data, &FilterCriteria::new().with_company("WSO2"));
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_search_and_dimensions_combine_with_and() {
        let data = dataset();
        let criteria = FilterCriteria::new().with_search("engineer").with_country("Germany");
        assert_eq!(ids(&filter_entries(&data, &criteria)), vec![4]);
    }

    #[test]
    fn test_input_is_untouched() {
        let data = dataset();
        let before = data.clone();
        let _ = filter_entries(&data, &FilterCriteria::new().with_role("Data Engineer"));
        assert_eq!(data, before);
    }
}
