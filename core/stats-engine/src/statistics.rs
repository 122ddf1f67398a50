//! FILENAME: core/stats-engine/src/statistics.rs
//! Statistics Engine - Descriptive statistics over salary entries.
//!
//! Percentiles use linear interpolation between order statistics:
//! 1. Sort ascending
//! 2. rank = p/100 * (n - 1)
//! 3. If rank is whole, take that element; otherwise interpolate between
//!    the elements at floor(rank) and ceil(rank)
//!
//! Nothing here divides by zero: empty input yields 0 everywhere.

use salary_engine::{log_debug, SalaryEntry};

use crate::definition::StatsReport;

// ============================================================================
// NUMERIC PRIMITIVES
// ============================================================================

/// Arithmetic mean. 0 for an empty slice.
pub fn average(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Percentile `p` (0..=100) with linear interpolation. `p` outside that
/// range is clamped. 0 for an empty slice.
pub fn percentile(xs: &[f64], p: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, p)
}

/// Same as `percentile` for input that is already sorted ascending.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) };
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        return sorted[lower];
    }
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}

/// The 50th percentile.
pub fn median(xs: &[f64]) -> f64 {
    percentile(xs, 50.0)
}

// ============================================================================
// DOMINANT CURRENCY
// ============================================================================

/// Most frequent currency code. Ties go to the code seen first in input
/// order. `None` for an empty set.
pub fn dominant_currency<'a, I>(records: I) -> Option<String>
where
    I: IntoIterator<Item = &'a SalaryEntry>,
{
    // (code, count) in first-seen order; a handful of codes at most.
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for entry in records {
        match counts.iter_mut().find(|(code, _)| *code == entry.currency) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.currency.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (code, count) in counts {
        // Strictly greater: an equal count never displaces an earlier code.
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((code, count));
        }
    }
    best.map(|(code, _)| code.to_string())
}

// ============================================================================
// REPORT
// ============================================================================

/// Count, averages, medians and percentiles over borrowed entries.
pub fn compute_statistics_refs(records: &[&SalaryEntry], default_currency: &str) -> StatsReport {
    if records.is_empty() {
        log_debug!("STATS", "empty set, zero report ({})", default_currency);
        return StatsReport::empty(default_currency);
    }

    let mut bases: Vec<f64> = records.iter().map(|e| e.base_salary).collect();
    let mut totals: Vec<f64> = records.iter().map(|e| e.total_compensation()).collect();
    let avg_base = average(&bases);
    let avg_total = average(&totals);

    bases.sort_by(f64::total_cmp);
    totals.sort_by(f64::total_cmp);

    let report = StatsReport {
        count: records.len(),
        avg_base,
        median_base: percentile_sorted(&bases, 50.0),
        avg_total,
        median_total: percentile_sorted(&totals, 50.0),
        p25: percentile_sorted(&totals, 25.0),
        p75: percentile_sorted(&totals, 75.0),
        p90: percentile_sorted(&totals, 90.0),
        dominant_currency: dominant_currency(records.iter().copied())
            .unwrap_or_else(|| default_currency.to_string()),
    };

    log_debug!(
        "STATS",
        "count={} avg_total={:.2} median_total={:.2} currency={}",
        report.count, report.avg_total, report.median_total, report.dominant_currency
    );
    report
}

/// Statistics report over `records`. `default_currency` labels an empty set.
pub fn compute_statistics(records: &[SalaryEntry], default_currency: &str) -> StatsReport {
    let refs: Vec<&SalaryEntry> = records.iter().collect();
    compute_statistics_refs(&refs, default_currency)
}
