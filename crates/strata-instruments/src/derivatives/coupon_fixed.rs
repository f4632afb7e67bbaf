//! Fixed-rate coupon.

use std::hash::{Hash, Hasher};

use strata_core::types::Currency;
use strata_core::StrataResult;

use crate::checks;
use crate::grid::HashValue;

/// A coupon paying `notional · fixed_rate · payment_year_fraction` at
/// `payment_time`.
///
/// Floating coupons whose rate is entirely known at the valuation date
/// collapse into this type.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponFixed {
    currency: Currency,
    payment_time: f64,
    payment_year_fraction: f64,
    notional: f64,
    fixed_rate: f64,
    curve_name: String,
}

impl CouponFixed {
    /// Creates a fixed coupon.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a negative payment time or year fraction, a
    /// non-finite value or an empty curve name.
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_year_fraction: f64,
        notional: f64,
        fixed_rate: f64,
        curve_name: &str,
    ) -> StrataResult<Self> {
        Ok(Self {
            currency,
            payment_time: checks::non_negative("payment time", payment_time)?,
            payment_year_fraction: checks::non_negative("payment year fraction", payment_year_fraction)?,
            notional: checks::finite("notional", notional)?,
            fixed_rate: checks::finite("fixed rate", fixed_rate)?,
            curve_name: checks::curve_name(curve_name)?,
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

    /// Coupon rate.
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    /// Discounting curve name.
    pub fn curve_name(&self) -> &str {
        &self.curve_name
    }

    /// Amount paid at `payment_time`.
    pub fn amount(&self) -> f64 {
        self.notional * self.fixed_rate * self.payment_year_fraction
    }

    /// Same coupon at another rate.
    pub fn with_rate(&self, fixed_rate: f64) -> StrataResult<Self> {
        Ok(Self {
            fixed_rate: checks::finite("fixed rate", fixed_rate)?,
            ..self.clone()
        })
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: f64) -> StrataResult<Self> {
        Ok(Self {
            notional: checks::finite("notional", notional)?,
            ..self.clone()
        })
    }
}

impl Eq for CouponFixed {}

impl Hash for CouponFixed {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.currency.hash(state);
        [self.payment_time, self.payment_year_fraction, self.notional, self.fixed_rate]
            .as_slice()
            .hash_value(state);
        self.curve_name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_amount() {
        let cpn = CouponFixed::new(Currency::EUR, 0.5, 0.25, 1_000_000.0, 0.04, "EUR-DSC").unwrap();
        assert_relative_eq!(cpn.amount(), 10_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_with_rate_is_persistent() {
        let cpn = CouponFixed::new(Currency::EUR, 0.5, 0.25, 100.0, 0.04, "EUR-DSC").unwrap();
        let other = cpn.with_rate(0.05).unwrap();
        assert_eq!(cpn.fixed_rate(), 0.04);
        assert_eq!(other.fixed_rate(), 0.05);
        assert_eq!(other.payment_time(), cpn.payment_time());
        assert_ne!(cpn, other);
    }

    #[test]
    fn test_rejects_past_payment() {
        assert!(CouponFixed::new(Currency::EUR, -0.1, 0.25, 100.0, 0.04, "EUR-DSC").is_err());
    }
}
