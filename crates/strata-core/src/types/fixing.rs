//! Historical fixing time series.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Date;

/// An ordered series of observed index values keyed by date.
///
/// Used for Ibor rate fixings (as decimals, e.g. 0.0312) and for
/// published price index levels (e.g. 118.4). Backed by a `BTreeMap` so
/// that "latest observation before" queries are range lookups.
///
/// # Example
///
/// ```rust
/// use strata_core::types::{Date, FixingSeries};
///
/// let d = Date::from_ymd(2024, 1, 2).unwrap();
/// let series = FixingSeries::new("EURIBOR3M").with_fixing(d, 0.0391);
/// assert_eq!(series.value_at(d), Some(0.0391));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixingSeries {
    name: String,
    values: BTreeMap<Date, f64>,
}

impl FixingSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Creates a series from (date, value) pairs. Later duplicates win.
    #[must_use]
    pub fn from_pairs(name: impl Into<String>, pairs: impl IntoIterator<Item = (Date, f64)>) -> Self {
        Self {
            name: name.into(),
            values: pairs.into_iter().collect(),
        }
    }

    /// Returns a copy of the series with one more observation.
    #[must_use]
    pub fn with_fixing(mut self, date: Date, value: f64) -> Self {
        self.values.insert(date, value);
        self
    }

    /// Adds or replaces an observation.
    pub fn insert(&mut self, date: Date, value: f64) {
        self.values.insert(date, value);
    }

    /// Returns the series name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value observed on `date`, if any.
    #[must_use]
    pub fn value_at(&self, date: Date) -> Option<f64> {
        self.values.get(&date).copied()
    }

    /// Returns the latest observation strictly before `date`.
    #[must_use]
    pub fn latest_before(&self, date: Date) -> Option<(Date, f64)> {
        self.values.range(..date).next_back().map(|(d, v)| (*d, *v))
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series holds no observation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates observations in date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.values.iter().map(|(d, v)| (*d, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_lookup() {
        let series = FixingSeries::from_pairs(
            "USD-LIBOR-3M",
            [(date(2024, 1, 2), 0.055), (date(2024, 1, 3), 0.0552)],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series.value_at(date(2024, 1, 3)), Some(0.0552));
        assert_eq!(series.value_at(date(2024, 1, 4)), None);
    }

    #[test]
    fn test_latest_before_excludes_date_itself() {
        let series = FixingSeries::new("CPI")
            .with_fixing(date(2024, 1, 1), 100.0)
            .with_fixing(date(2024, 2, 1), 101.0);
        assert_eq!(
            series.latest_before(date(2024, 2, 1)),
            Some((date(2024, 1, 1), 100.0))
        );
        assert_eq!(series.latest_before(date(2024, 1, 1)), None);
    }

    #[test]
    fn test_empty() {
        let series = FixingSeries::new("EMPTY");
        assert!(series.is_empty());
        assert_eq!(series.iter().count(), 0);
    }
}
