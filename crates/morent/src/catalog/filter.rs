//! Catalog filter engine.
//!
//! A record matches a [`FilterSelection`] when every active criterion accepts
//! it: an empty type set or capacity set places no restriction, and the price
//! bound is always inclusive.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::record::CarRecord;

/// The active set of user-chosen filter criteria.
///
/// Owned by the caller and only ever borrowed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    /// Selected car types. Empty means any type.
    pub types: BTreeSet<String>,
    /// Selected capacity labels. Empty means any capacity.
    pub capacities: BTreeSet<String>,
    /// Inclusive upper bound on the daily price.
    pub max_price: f64,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            types: BTreeSet::new(),
            capacities: BTreeSet::new(),
            max_price: f64::INFINITY,
        }
    }
}

impl FilterSelection {
    /// Create a selection with no type or capacity restriction.
    #[must_use]
    pub fn new(max_price: f64) -> Self {
        Self {
            max_price,
            ..Self::default()
        }
    }

    /// Restrict to the given types.
    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.extend(types.into_iter().map(Into::into));
        self
    }

    /// Restrict to the given capacity labels.
    #[must_use]
    pub fn with_capacities<I, S>(mut self, capacities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capacities
            .extend(capacities.into_iter().map(Into::into));
        self
    }

    /// Replace the price bound.
    #[must_use]
    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = max_price;
        self
    }

    /// Checkbox semantics: add the type if absent, remove it if present.
    pub fn toggle_type(&mut self, car_type: &str) {
        toggle(&mut self.types, car_type);
    }

    /// Checkbox semantics: add the capacity if absent, remove it if present.
    pub fn toggle_capacity(&mut self, capacity: &str) {
        toggle(&mut self.capacities, capacity);
    }

    /// True when no type or capacity is selected and the price is unbounded.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.types.is_empty()
            && self.capacities.is_empty()
            && self.max_price.is_infinite()
            && self.max_price.is_sign_positive()
    }

    /// Check whether a single record satisfies every active criterion.
    #[must_use]
    pub fn matches(&self, record: &CarRecord) -> bool {
        let type_match = self.types.is_empty() || self.types.contains(&record.car_type);
        let capacity_match =
            self.capacities.is_empty() || self.capacities.contains(&record.capacity);
        type_match && capacity_match && record.price <= self.max_price
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// Select the records matching `selection`, preserving input order.
///
/// Returned elements borrow from `records`. Empty input or an empty result is
/// an ordinary outcome.
#[must_use]
pub fn filter<'a>(records: &'a [CarRecord], selection: &FilterSelection) -> Vec<&'a CarRecord> {
    let matched: Vec<&CarRecord> = records
        .iter()
        .filter(|record| {
            let keep = selection.matches(record);
            trace!(id = record.id, keep, "Evaluated record");
            keep
        })
        .collect();

    debug!(
        total = records.len(),
        matched = matched.len(),
        "Filtered catalog"
    );
    matched
}

/// Tally records per type, in first-seen order.
#[must_use]
pub fn type_counts(records: &[CarRecord]) -> Vec<(String, usize)> {
    tally(records.iter().map(|r| r.car_type.as_str()))
}

/// Tally records per capacity label, in first-seen order.
#[must_use]
pub fn capacity_counts(records: &[CarRecord]) -> Vec<(String, usize)> {
    tally(records.iter().map(|r| r.capacity.as_str()))
}

fn tally<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|(seen, _)| seen.as_str() == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }
    counts
}
