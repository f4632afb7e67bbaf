//! Time-based derivatives.
//!
//! A derivative is the numerical payload of an instrument at one
//! valuation date: times, accrual factors, weights and curve names. The
//! set of derivative kinds is closed ([`InstrumentDerivative`]); the set
//! of operations over them is open, through
//! [`InstrumentDerivativeVisitor`].

mod cash;
mod coupon_fixed;
mod coupon_ibor_average_compounding;
mod coupon_inflation_yoy;

pub use cash::Cash;
pub use coupon_fixed::CouponFixed;
pub use coupon_ibor_average_compounding::{CompoundingSchedule, CouponIborAverageCompounding};
pub use coupon_inflation_yoy::CouponInflationYearOnYearInterpolation;

use strata_core::types::Currency;
use strata_core::StrataResult;

/// An operation over every derivative kind.
///
/// `D` is the auxiliary data handed to each visit (typically curves).
pub trait InstrumentDerivativeVisitor<D: ?Sized> {
    /// Result of a visit.
    type Output;

    /// Visits a cash loan.
    fn visit_cash(&self, cash: &Cash, data: &D) -> Self::Output;

    /// Visits a fixed coupon.
    fn visit_coupon_fixed(&self, coupon: &CouponFixed, data: &D) -> Self::Output;

    /// Visits an averaging compounded Ibor coupon.
    fn visit_coupon_ibor_average_compounding(
        &self,
        coupon: &CouponIborAverageCompounding,
        data: &D,
    ) -> Self::Output;

    /// Visits a year-on-year inflation coupon.
    fn visit_coupon_inflation_year_on_year_interpolation(
        &self,
        coupon: &CouponInflationYearOnYearInterpolation,
        data: &D,
    ) -> Self::Output;
}

/// Any time-based derivative.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InstrumentDerivative {
    /// Cash loan.
    Cash(Cash),
    /// Fixed coupon.
    CouponFixed(CouponFixed),
    /// Averaging compounded Ibor coupon.
    CouponIborAverageCompounding(CouponIborAverageCompounding),
    /// Year-on-year inflation coupon.
    CouponInflationYearOnYearInterpolation(CouponInflationYearOnYearInterpolation),
}

impl InstrumentDerivative {
    /// Dispatches to the visitor method of this kind.
    pub fn accept<D, V>(&self, visitor: &V, data: &D) -> V::Output
    where
        D: ?Sized,
        V: InstrumentDerivativeVisitor<D> + ?Sized,
    {
        match self {
            Self::Cash(d) => visitor.visit_cash(d, data),
            Self::CouponFixed(d) => visitor.visit_coupon_fixed(d, data),
            Self::CouponIborAverageCompounding(d) => visitor.visit_coupon_ibor_average_compounding(d, data),
            Self::CouponInflationYearOnYearInterpolation(d) => {
                visitor.visit_coupon_inflation_year_on_year_interpolation(d, data)
            }
        }
    }

    /// Payment currency.
    pub fn currency(&self) -> Currency {
        match self {
            Self::Cash(d) => d.currency(),
            Self::CouponFixed(d) => d.currency(),
            Self::CouponIborAverageCompounding(d) => d.currency(),
            Self::CouponInflationYearOnYearInterpolation(d) => d.currency(),
        }
    }

    /// Time of the last cash flow; the curve node a calibration solves for.
    pub fn pillar_time(&self) -> f64 {
        match self {
            Self::Cash(d) => d.maturity(),
            Self::CouponFixed(d) => d.payment_time(),
            Self::CouponIborAverageCompounding(d) => d.payment_time(),
            Self::CouponInflationYearOnYearInterpolation(d) => d.payment_time(),
        }
    }

    /// Same derivative with another notional.
    pub fn with_notional(&self, notional: f64) -> StrataResult<Self> {
        Ok(match self {
            Self::Cash(d) => Self::Cash(d.with_notional(notional)?),
            Self::CouponFixed(d) => Self::CouponFixed(d.with_notional(notional)?),
            Self::CouponIborAverageCompounding(d) => Self::CouponIborAverageCompounding(d.with_notional(notional)?),
            Self::CouponInflationYearOnYearInterpolation(d) => {
                Self::CouponInflationYearOnYearInterpolation(d.with_notional(notional)?)
            }
        })
    }
}

impl From<Cash> for InstrumentDerivative {
    fn from(d: Cash) -> Self {
        Self::Cash(d)
    }
}

impl From<CouponFixed> for InstrumentDerivative {
    fn from(d: CouponFixed) -> Self {
        Self::CouponFixed(d)
    }
}

impl From<CouponIborAverageCompounding> for InstrumentDerivative {
    fn from(d: CouponIborAverageCompounding) -> Self {
        Self::CouponIborAverageCompounding(d)
    }
}

impl From<CouponInflationYearOnYearInterpolation> for InstrumentDerivative {
    fn from(d: CouponInflationYearOnYearInterpolation) -> Self {
        Self::CouponInflationYearOnYearInterpolation(d)
    }
}
