//! Year-on-year inflation coupon with monthly interpolation.

use std::hash::{Hash, Hasher};

use strata_core::types::Currency;
use strata_core::{StrataError, StrataResult};

use crate::checks;
use crate::grid::HashValue;
use crate::index::PriceIndex;

/// A coupon paying the year-on-year change of a price index, each index
/// level interpolated between two monthly publications.
///
/// The amount paid is
/// `N · δ · (I_end / I_start - 1)` (without the `- 1` when the notional is
/// paid), where `I_start = w_s · I(t_s0) + (1 - w_s) · I(t_s1)` and
/// `I_end = w_e · I(t_e0) + (1 - w_e) · I(t_e1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponInflationYearOnYearInterpolation {
    currency: Currency,
    payment_time: f64,
    payment_year_fraction: f64,
    notional: f64,
    price_index: PriceIndex,
    reference_start_time: [f64; 2],
    reference_end_time: [f64; 2],
    weight_start: f64,
    weight_end: f64,
    pay_notional: bool,
    index_start_value: Option<f64>,
    discounting_curve: String,
    price_index_curve: String,
}

impl CouponInflationYearOnYearInterpolation {
    /// Creates the coupon with both index levels still to be projected.
    ///
    /// Reference times may be negative: the reference months are lagged
    /// and often already published.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a negative payment time or accrual factor, a
    /// weight outside `[0, 1]`, a currency mismatch with the index or an
    /// empty curve name.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_year_fraction: f64,
        notional: f64,
        price_index: PriceIndex,
        reference_start_time: [f64; 2],
        reference_end_time: [f64; 2],
        weight_start: f64,
        weight_end: f64,
        pay_notional: bool,
        discounting_curve: &str,
        price_index_curve: &str,
    ) -> StrataResult<Self> {
        checks::same_currency("price index", currency, price_index.currency)?;
        checks::all_finite("reference start time", &reference_start_time)?;
        checks::all_finite("reference end time", &reference_end_time)?;

        Ok(Self {
            currency,
            payment_time: checks::non_negative("payment time", payment_time)?,
            payment_year_fraction: checks::non_negative("payment year fraction", payment_year_fraction)?,
            notional: checks::finite("notional", notional)?,
            price_index,
            reference_start_time,
            reference_end_time,
            weight_start: unit_weight("weight start", weight_start)?,
            weight_end: unit_weight("weight end", weight_end)?,
            pay_notional,
            index_start_value: None,
            discounting_curve: checks::curve_name(discounting_curve)?,
            price_index_curve: checks::curve_name(price_index_curve)?,
        })
    }

    /// Same coupon with the start index level already known.
    pub fn with_index_start_value(&self, value: f64) -> StrataResult<Self> {
        if checks::finite("index start value", value)? <= 0.0 {
            return Err(StrataError::invalid_argument(format!(
                "index start value must be positive, got {value}"
            )));
        }
        Ok(Self {
            index_start_value: Some(value),
            ..self.clone()
        })
    }

    /// Payment currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Time of the payment.
    pub fn payment_time(&self) -> f64 {
        self.payment_time
    }

    /// Accrual factor of the coupon.
    pub fn payment_year_fraction(&self) -> f64 {
        self.payment_year_fraction
    }

    /// Coupon notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// The price index.
    pub fn price_index(&self) -> &PriceIndex {
        &self.price_index
    }

    /// Times of the two reference months of the start index.
    pub fn reference_start_time(&self) -> [f64; 2] {
        self.reference_start_time
    }

    /// Times of the two reference months of the end index.
    pub fn reference_end_time(&self) -> [f64; 2] {
        self.reference_end_time
    }

    /// Weight of the first start reference month.
    pub fn weight_start(&self) -> f64 {
        self.weight_start
    }

    /// Weight of the first end reference month.
    pub fn weight_end(&self) -> f64 {
        self.weight_end
    }

    /// Whether the notional is paid with the coupon.
    pub fn pay_notional(&self) -> bool {
        self.pay_notional
    }

    /// Start index level, when already published.
    pub fn index_start_value(&self) -> Option<f64> {
        self.index_start_value
    }

    /// Discounting curve name.
    pub fn discounting_curve(&self) -> &str {
        &self.discounting_curve
    }

    /// Price index curve name.
    pub fn price_index_curve(&self) -> &str {
        &self.price_index_curve
    }

    /// Interpolated start index from the two reference month levels.
    pub fn interpolated_start(&self, first: f64, second: f64) -> f64 {
        self.weight_start * first + (1.0 - self.weight_start) * second
    }

    /// Interpolated end index from the two reference month levels.
    pub fn interpolated_end(&self, first: f64, second: f64) -> f64 {
        self.weight_end * first + (1.0 - self.weight_end) * second
    }

    /// Amount paid for given start and end index levels.
    pub fn amount(&self, index_start: f64, index_end: f64) -> f64 {
        let ratio = index_end / index_start;
        let rate = if self.pay_notional { ratio } else { ratio - 1.0 };
        self.notional * self.payment_year_fraction * rate
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: f64) -> StrataResult<Self> {
        Ok(Self {
            notional: checks::finite("notional", notional)?,
            ..self.clone()
        })
    }
}

fn unit_weight(name: &str, weight: f64) -> StrataResult<f64> {
    if !(0.0..=1.0).contains(&checks::finite(name, weight)?) {
        return Err(StrataError::invalid_argument(format!(
            "{name} must lie in [0, 1], got {weight}"
        )));
    }
    Ok(weight)
}

impl Eq for CouponInflationYearOnYearInterpolation {}

impl Hash for CouponInflationYearOnYearInterpolation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.currency.hash(state);
        [
            self.payment_time,
            self.payment_year_fraction,
            self.notional,
            self.weight_start,
            self.weight_end,
        ]
        .as_slice()
        .hash_value(state);
        self.price_index.hash(state);
        self.reference_start_time.as_slice().hash_value(state);
        self.reference_end_time.as_slice().hash_value(state);
        self.pay_notional.hash(state);
        self.index_start_value.is_some().hash(state);
        if let Some(value) = self.index_start_value {
            value.hash_value(state);
        }
        self.discounting_curve.hash(state);
        self.price_index_curve.hash(state);
    }
}
