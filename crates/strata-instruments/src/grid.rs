//! Ragged per-period storage for averaging coupons.

use std::hash::{Hash, Hasher};

use strata_core::types::Date;
use strata_core::{StrataError, StrataResult};

/// Values laid out per compounding period.
///
/// The first period may hold a different number of entries than the
/// others (it mixes observed and projected fixings once a coupon has
/// started); every later period holds the same number of entries.
///
/// # Example
///
/// ```rust
/// use strata_instruments::PeriodGrid;
///
/// let grid = PeriodGrid::new(vec![0.1, 0.2], vec![vec![0.3, 0.4, 0.5]]).unwrap();
/// assert_eq!(grid.period_count(), 2);
/// assert_eq!(grid.period(1), &[0.3, 0.4, 0.5]);
/// assert!(PeriodGrid::new(vec![0.1], vec![vec![0.2], vec![0.3, 0.4]]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodGrid<T> {
    first: Vec<T>,
    later: Vec<Vec<T>>,
}

impl<T> PeriodGrid<T> {
    /// Creates a grid, checking that all later periods have the same length.
    pub fn new(first: Vec<T>, later: Vec<Vec<T>>) -> StrataResult<Self> {
        if let Some(expected) = later.first().map(Vec::len) {
            for (k, period) in later.iter().enumerate() {
                if period.len() != expected {
                    return Err(StrataError::inconsistent_length(
                        format!("period[{}]", k + 1),
                        expected,
                        period.len(),
                    ));
                }
            }
        }
        Ok(Self { first, later })
    }

    /// Creates a grid from a list of periods; the first entry becomes the first period.
    pub fn from_periods(periods: Vec<Vec<T>>) -> StrataResult<Self> {
        let mut iter = periods.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| StrataError::invalid_argument("a period grid needs at least one period"))?;
        Self::new(first, iter.collect())
    }

    /// The first period.
    pub fn first(&self) -> &[T] {
        &self.first
    }

    /// The periods after the first.
    pub fn later(&self) -> &[Vec<T>] {
        &self.later
    }

    /// Number of periods, including the first.
    pub fn period_count(&self) -> usize {
        1 + self.later.len()
    }

    /// Entries of period `k` (0 is the first period).
    ///
    /// # Panics
    ///
    /// Panics if `k >= period_count()`.
    pub fn period(&self, k: usize) -> &[T] {
        if k == 0 {
            &self.first
        } else {
            &self.later[k - 1]
        }
    }

    /// Iterates over the periods in order.
    pub fn periods(&self) -> impl Iterator<Item = &[T]> + '_ {
        std::iter::once(self.first.as_slice()).chain(self.later.iter().map(Vec::as_slice))
    }

    /// Iterates over all entries, period by period.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.periods().flatten()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.first.len() + self.later.iter().map(Vec::len).sum::<usize>()
    }

    /// True when no period holds an entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that `other` has exactly the same shape as `self`.
    ///
    /// `field` names `other` in the error, suffixed with the offending period.
    pub fn check_same_shape<U>(&self, other: &PeriodGrid<U>, field: &str) -> StrataResult<()> {
        if other.period_count() != self.period_count() {
            return Err(StrataError::inconsistent_length(
                format!("{field} periods"),
                self.period_count(),
                other.period_count(),
            ));
        }
        for (k, (mine, theirs)) in self.periods().zip(other.periods()).enumerate() {
            if mine.len() != theirs.len() {
                return Err(StrataError::inconsistent_length(
                    format!("{field}[{k}]"),
                    mine.len(),
                    theirs.len(),
                ));
            }
        }
        Ok(())
    }

    /// Applies `f` to every entry, keeping the shape.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PeriodGrid<U> {
        PeriodGrid {
            first: self.first.iter().map(&mut f).collect(),
            later: self
                .later
                .iter()
                .map(|period| period.iter().map(&mut f).collect())
                .collect(),
        }
    }

    /// Applies a fallible `f` to every entry, stopping at the first error.
    pub fn try_map<U, E>(&self, mut f: impl FnMut(&T) -> Result<U, E>) -> Result<PeriodGrid<U>, E> {
        let first = self.first.iter().map(&mut f).collect::<Result<Vec<_>, E>>()?;
        let later = self
            .later
            .iter()
            .map(|period| period.iter().map(&mut f).collect::<Result<Vec<_>, E>>())
            .collect::<Result<Vec<_>, E>>()?;
        Ok(PeriodGrid { first, later })
    }
}

impl<T: Clone> PeriodGrid<T> {
    /// Drops the first `periods` periods and the first `entries` entries of
    /// the next one, which becomes the new first period.
    pub(crate) fn suffix(&self, periods: usize, entries: usize) -> Self {
        let first = self.period(periods)[entries..].to_vec();
        let later = self.later[periods..].to_vec();
        Self { first, later }
    }
}

/// Values that can be hashed structurally, including floats by bit pattern.
pub trait HashValue {
    fn hash_value<H: Hasher>(&self, state: &mut H);
}

impl HashValue for f64 {
    fn hash_value<H: Hasher>(&self, state: &mut H) {
        // +0.0 and -0.0 compare equal, so they must hash equal
        let normalized = if *self == 0.0 { 0.0_f64 } else { *self };
        normalized.to_bits().hash(state);
    }
}

impl HashValue for Date {
    fn hash_value<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }
}

impl<T: HashValue> HashValue for [T] {
    fn hash_value<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self {
            value.hash_value(state);
        }
    }
}

impl<T: HashValue> Hash for PeriodGrid<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.period_count().hash(state);
        for period in self.periods() {
            period.hash_value(state);
        }
    }
}

impl Eq for PeriodGrid<Date> {}
impl Eq for PeriodGrid<f64> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_period_may_differ() {
        let grid = PeriodGrid::new(vec![1.0], vec![vec![2.0, 3.0], vec![4.0, 5.0]]).unwrap();
        assert_eq!(grid.period_count(), 3);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid.iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_later_periods_must_be_uniform() {
        let err = PeriodGrid::new(vec![1.0], vec![vec![2.0, 3.0], vec![4.0]]).unwrap_err();
        assert_eq!(err, StrataError::inconsistent_length("period[2]", 2, 1));
    }

    #[test]
    fn test_from_periods_needs_one_period() {
        assert!(PeriodGrid::<f64>::from_periods(vec![]).is_err());
        let grid = PeriodGrid::from_periods(vec![vec![1.0, 2.0]]).unwrap();
        assert!(grid.later().is_empty());
    }

    #[test]
    fn test_shape_mismatch_names_period() {
        let times = PeriodGrid::new(vec![0.1, 0.2, 0.3], vec![vec![0.4, 0.5]]).unwrap();
        let weights = PeriodGrid::new(vec![0.3, 0.3, 0.4], vec![vec![0.3, 0.3, 0.4]]).unwrap();
        let err = times.check_same_shape(&weights, "weight").unwrap_err();
        assert_eq!(err, StrataError::inconsistent_length("weight[1]", 2, 3));
    }

    #[test]
    fn test_suffix() {
        let grid = PeriodGrid::new(vec![1.0, 2.0], vec![vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        let rest = grid.suffix(1, 1);
        assert_eq!(rest.first(), &[4.0]);
        assert_eq!(rest.later(), &[vec![5.0, 6.0]]);
    }

    #[test]
    fn test_map_keeps_shape() {
        let grid = PeriodGrid::new(vec![1.0], vec![vec![2.0, 3.0]]).unwrap();
        let doubled = grid.map(|x| x * 2.0);
        assert!(grid.check_same_shape(&doubled, "doubled").is_ok());
        assert_eq!(doubled.period(1), &[4.0, 6.0]);
    }
}
