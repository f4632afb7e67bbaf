//! Named curves available to pricing.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::curves::{InterpolatedCurve, PriceIndexCurve};
use crate::error::{CurveError, CurveResult};

/// A set of curves looked up by the names derivatives carry.
///
/// Adding a curve returns a new bundle; the curves themselves are shared.
///
/// # Example
///
/// ```rust
/// use strata_curves::curves::{CurveBundle, InterpolatedCurve};
///
/// let base = CurveBundle::new();
/// let bundle = base.with_curve(InterpolatedCurve::flat("USD-DSC", vec![1.0], 0.03).unwrap());
/// assert!(bundle.curve("USD-DSC").is_ok());
/// assert!(base.curve("USD-DSC").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurveBundle {
    curves: BTreeMap<String, Arc<InterpolatedCurve>>,
    price_index_curves: BTreeMap<String, Arc<PriceIndexCurve>>,
}

impl CurveBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundle with `curve` added under its name, replacing any curve of that name.
    #[must_use]
    pub fn with_curve(&self, curve: InterpolatedCurve) -> Self {
        self.with_shared_curve(Arc::new(curve))
    }

    /// Like [`with_curve`](Self::with_curve) for a curve that is already shared.
    #[must_use]
    pub fn with_shared_curve(&self, curve: Arc<InterpolatedCurve>) -> Self {
        let mut next = self.clone();
        next.curves.insert(curve.name().to_string(), curve);
        next
    }

    /// The bundle with a price index curve added under its name.
    #[must_use]
    pub fn with_price_index_curve(&self, curve: PriceIndexCurve) -> Self {
        let mut next = self.clone();
        next.price_index_curves
            .insert(curve.name().to_string(), Arc::new(curve));
        next
    }

    /// The curve called `name`.
    pub fn curve(&self, name: &str) -> CurveResult<&InterpolatedCurve> {
        self.curves
            .get(name)
            .map(AsRef::as_ref)
            .ok_or_else(|| CurveError::curve_not_found(name))
    }

    /// The price index curve called `name`.
    pub fn price_index_curve(&self, name: &str) -> CurveResult<&PriceIndexCurve> {
        self.price_index_curves
            .get(name)
            .map(AsRef::as_ref)
            .ok_or_else(|| CurveError::curve_not_found(name))
    }

    /// True when a curve called `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    /// Names of the interest rate and hazard curves.
    pub fn curve_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.curves.keys().map(String::as_str)
    }

    /// Number of curves of either kind.
    pub fn len(&self) -> usize {
        self.curves.len() + self.price_index_curves.len()
    }

    /// True without any curve.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
