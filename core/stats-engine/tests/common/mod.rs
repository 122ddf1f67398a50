//! FILENAME: tests/common/mod.rs
//! Fixtures for the analytics integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use salary_engine::{EmploymentType, ExperienceLevel, RemotePolicy, SalaryEntry, VoteCounts};

struct Row<'a> {
    role: &'a str,
    company: Option<&'a str>,
    country: &'a str,
    city: Option<&'a str>,
    level: ExperienceLevel,
    pay: (f64, f64, f64),
    currency: &'a str,
    policy: RemotePolicy,
    tech: &'a [&'a str],
    votes: (u32, u32),
    day: u32,
}

impl Row<'_> {
    fn into_entry(self, id: u32) -> SalaryEntry {
        let (base, bonus, stock) = self.pay;
        let mut entry = SalaryEntry::new(
            id,
            self.role,
            self.country,
            self.level,
            base,
            bonus,
            stock,
            self.currency,
            Utc.with_ymd_and_hms(2025, 5, self.day, 10, 30, 0).unwrap(),
        )
        .with_years(self.level as u32 * 2 + 1)
        .with_remote_policy(self.policy)
        .with_employment_type(EmploymentType::FullTime)
        .with_tech(self.tech.iter().copied())
        .with_votes(VoteCounts::new(self.votes.0, self.votes.1));
        entry.company = self.company.map(str::to_string);
        entry.city = self.city.map(str::to_string);
        entry
    }
}

/// A fixed, hand-written dataset shaped like the community listing.
/// Ids run 1..=10 in this order.
pub fn sample_entries() -> Vec<SalaryEntry> {
    use ExperienceLevel::*;
    use RemotePolicy::*;

    let rows = vec![
        Row { role: "Software Engineer", company: Some("WSO2"), country: "Sri Lanka", city: Some("Colombo"), level: Senior, pay: (4_800_000.0, 400_000.0, 0.0), currency: "LKR", policy: Hybrid, tech: &["Java", "Kubernetes"], votes: (12, 1), day: 3 },
        Row { role: "Frontend Engineer", company: Some("Canva"), country: "Australia", city: Some("Sydney"), level: Mid, pay: (120_000.0, 8_000.0, 15_000.0), currency: "AUD", policy: Hybrid, tech: &["React", "TypeScript"], votes: (4, 0), day: 10 },
        Row { role: "Data Engineer", company: Some("IFS"), country: "Sri Lanka", city: Some("Colombo"), level: Lead, pay: (6_000_000.0, 600_000.0, 0.0), currency: "LKR", policy: OnSite, tech: &["Python", "AWS"], votes: (7, 2), day: 5 },
        Row { role: "Backend Engineer", company: Some("Stripe"), country: "United States", city: Some("San Francisco"), level: Staff, pay: (260_000.0, 30_000.0, 120_000.0), currency: "USD", policy: Remote, tech: &["Go", "PostgreSQL"], votes: (20, 3), day: 1 },
        Row { role: "QA Engineer", company: None, country: "India", city: Some("Bengaluru"), level: Junior, pay: (900_000.0, 0.0, 0.0), currency: "INR", policy: OnSite, tech: &["Java"], votes: (0, 2), day: 22 },
        Row { role: "DevOps Engineer", company: Some("Sysco LABS"), country: "Sri Lanka", city: None, level: Mid, pay: (3_000_000.0, 150_000.0, 0.0), currency: "LKR", policy: Remote, tech: &["Docker", "Kubernetes", "AWS"], votes: (3, 3), day: 18 },
        Row { role: "Machine Learning Engineer", company: Some("Google"), country: "Germany", city: Some("Munich"), level: Senior, pay: (95_000.0, 10_000.0, 25_000.0), currency: "EUR", policy: Hybrid, tech: &["Python"], votes: (9, 0), day: 7 },
        Row { role: "Software Engineer", company: Some("Spotify"), country: "Sweden", city: Some("Stockholm"), level: Principal, pay: (900_000.0, 0.0, 200_000.0), currency: "SEK", policy: Hybrid, tech: &["Java", "GCP"], votes: (5, 1), day: 14 },
        Row { role: "Frontend Engineer", company: None, country: "Sri Lanka", city: Some("Kandy"), level: Junior, pay: (1_200_000.0, 0.0, 0.0), currency: "LKR", policy: Remote, tech: &["Vue", "JavaScript"], votes: (1, 0), day: 25 },
        Row { role: "Backend Engineer", company: Some("Booking.com"), country: "Netherlands", city: Some("Amsterdam"), level: Senior, pay: (85_000.0, 6_000.0, 0.0), currency: "EUR", policy: Hybrid, tech: &["Java", "Redis"], votes: (6, 1), day: 9 },
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| row.into_entry(i as u32 + 1))
        .collect()
}

/// A larger synthetic dataset for ordering and property checks.
pub fn generated_entries(count: u32) -> Vec<SalaryEntry> {
    let countries = ["Sri Lanka", "India", "Germany", "United States", "Japan"];
    let roles = ["Software Engineer", "Data Engineer", "QA Engineer", "Engineering Manager"];
    let currencies = ["LKR", "INR", "EUR", "USD", "JPY"];

    (0..count)
        .map(|i| {
            let idx = i as usize;
            let level = ExperienceLevel::ALL[idx % ExperienceLevel::ALL.len()];
            let base = 40_000.0 + ((i * 7_919) % 150_000) as f64;
            SalaryEntry::new(
                i + 1,
                roles[idx % roles.len()],
                countries[idx % countries.len()],
                level,
                base,
                (i % 5) as f64 * 1_000.0,
                0.0,
                currencies[idx % currencies.len()],
                Utc.timestamp_opt(1_700_000_000 + (i as i64 * 3_600) % 500_000, 0).unwrap(),
            )
            .with_remote_policy(RemotePolicy::ALL[idx % RemotePolicy::ALL.len()])
            .with_votes(VoteCounts::new(i % 11, i % 4))
        })
        .collect()
}

pub fn ids(entries: &[SalaryEntry]) -> Vec<u32> {
    entries.iter().map(|e| e.id).collect()
}
