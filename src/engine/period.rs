//! Period classification: which raw period numbers belong to a selector.

use std::collections::BTreeSet;

use crate::domain::{PeriodSelector, PeriodType, ShotAttempt, StatEvent};

/// Ledger entries that carry a raw period number.
pub trait Periodic {
    fn period(&self) -> i32;
}

impl Periodic for ShotAttempt {
    fn period(&self) -> i32 {
        self.period
    }
}

impl Periodic for StatEvent {
    fn period(&self) -> i32 {
        self.period
    }
}

/// Raw period numbers that belong to `selector` under `period_type`.
///
/// A quarter selector under a halves game resolves to the empty set, so every
/// aggregate over it is zero.
pub fn resolve_period_membership(
    period_type: PeriodType,
    selector: PeriodSelector,
) -> BTreeSet<i32> {
    match (period_type, selector) {
        (_, PeriodSelector::All) => (1..=period_type.period_count()).collect(),
        (PeriodType::Halves, PeriodSelector::H1) => BTreeSet::from([1]),
        (PeriodType::Halves, PeriodSelector::H2) => BTreeSet::from([2]),
        (PeriodType::Quarters, PeriodSelector::H1) => BTreeSet::from([1, 2]),
        (PeriodType::Quarters, PeriodSelector::H2) => BTreeSet::from([3, 4]),
        (PeriodType::Quarters, PeriodSelector::Q1) => BTreeSet::from([1]),
        (PeriodType::Quarters, PeriodSelector::Q2) => BTreeSet::from([2]),
        (PeriodType::Quarters, PeriodSelector::Q3) => BTreeSet::from([3]),
        (PeriodType::Quarters, PeriodSelector::Q4) => BTreeSet::from([4]),
        (PeriodType::Halves, _) => BTreeSet::new(),
    }
}

/// Every selector a raw period number falls into, `all` first.
///
/// Returns an empty list for a period outside the format's range.
pub fn classify_period(period_type: PeriodType, period: i32) -> Vec<PeriodSelector> {
    if !period_type.is_valid_period(period) {
        return Vec::new();
    }
    period_type
        .selectors()
        .iter()
        .copied()
        .filter(|selector| resolve_period_membership(period_type, *selector).contains(&period))
        .collect()
}

/// Keep the entries whose period belongs to `selector`.
///
/// Entries with a period outside the format's range are skipped for every
/// selector, including `all`.
pub fn filter_by_selector<'a, T: Periodic>(
    entries: &'a [T],
    period_type: PeriodType,
    selector: PeriodSelector,
) -> Vec<&'a T> {
    let members = resolve_period_membership(period_type, selector);
    entries
        .iter()
        .filter(|entry| {
            let period = entry.period();
            if !period_type.is_valid_period(period) {
                tracing::warn!(
                    period,
                    period_type = %period_type,
                    "Skipping ledger entry with out-of-range period"
                );
                return false;
            }
            members.contains(&period)
        })
        .collect()
}
