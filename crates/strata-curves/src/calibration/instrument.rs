//! Quoted instruments a curve is calibrated to.

use strata_instruments::derivatives::{Cash, InstrumentDerivative};

use crate::credit::{CdsAnalytic, IsdaCdsPricer};
use crate::curves::{CurveBundle, InterpolatedCurve};
use crate::error::{CurveError, CurveResult};
use crate::pricing::present_value;

/// One `(instrument, quote)` pair of a calibration set.
///
/// The residual is the amount by which the instrument misses its quote
/// when the curve being calibrated is `candidate`; calibration drives it
/// to zero.
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationInstrument {
    /// A cash deposit quoted by its rate. Residual: its present value at the quoted rate.
    Deposit {
        /// The deposit, carrying the quoted rate.
        cash: Cash,
    },
    /// Any derivative quoted by its present value. Residual: model minus quoted value.
    PresentValue {
        /// The derivative.
        derivative: InstrumentDerivative,
        /// Quoted present value.
        quote: f64,
    },
    /// A CDS quoted by its par spread; the candidate is the hazard curve.
    /// Residual: the clean value at the quoted spread.
    CreditDefaultSwap {
        /// The CDS.
        cds: CdsAnalytic,
        /// Quoted spread.
        spread: f64,
        /// Name of the discount curve in the base bundle.
        discount_curve: String,
    },
}

impl CalibrationInstrument {
    /// A deposit quoted at `rate`.
    pub fn deposit(cash: &Cash, rate: f64) -> CurveResult<Self> {
        Ok(Self::Deposit {
            cash: cash.with_rate(rate)?,
        })
    }

    /// A derivative quoted by present value.
    pub fn present_value(derivative: impl Into<InstrumentDerivative>, quote: f64) -> Self {
        Self::PresentValue {
            derivative: derivative.into(),
            quote,
        }
    }

    /// A CDS quoted by par spread, discounted on `discount_curve`.
    pub fn credit_default_swap(cds: CdsAnalytic, spread: f64, discount_curve: &str) -> Self {
        Self::CreditDefaultSwap {
            cds,
            spread,
            discount_curve: discount_curve.to_string(),
        }
    }

    /// Time of the curve node this instrument determines.
    pub fn pillar_time(&self) -> f64 {
        match self {
            Self::Deposit { cash } => cash.maturity(),
            Self::PresentValue { derivative, .. } => derivative.pillar_time(),
            Self::CreditDefaultSwap { cds, .. } => cds.protection_end(),
        }
    }

    /// The market quote.
    pub fn quote(&self) -> f64 {
        match self {
            Self::Deposit { cash } => cash.rate(),
            Self::PresentValue { quote, .. } => *quote,
            Self::CreditDefaultSwap { spread, .. } => *spread,
        }
    }

    /// Checks that the instrument depends on a curve called `curve_name`.
    pub(crate) fn check_curve(&self, curve_name: &str) -> CurveResult<()> {
        match self {
            Self::Deposit { cash } if cash.curve_name() != curve_name => Err(CurveError::invalid_argument(format!(
                "deposit discounts on {} but {curve_name} is being calibrated",
                cash.curve_name()
            ))),
            _ => Ok(()),
        }
    }

    /// Residual against `candidate`, with every other curve taken from `base`.
    pub fn residual(&self, candidate: &InterpolatedCurve, base: &CurveBundle) -> CurveResult<f64> {
        match self {
            Self::Deposit { cash } => {
                let curves = base.with_curve(candidate.clone());
                present_value(&cash.clone().into(), &curves)
            }
            Self::PresentValue { derivative, quote } => {
                let curves = base.with_curve(candidate.clone());
                Ok(present_value(derivative, &curves)? - quote)
            }
            Self::CreditDefaultSwap {
                cds,
                spread,
                discount_curve,
            } => IsdaCdsPricer.pv(cds, *spread, base.curve(discount_curve)?, candidate),
        }
    }

    /// Short label for reports.
    pub fn description(&self) -> String {
        match self {
            Self::Deposit { cash } => format!("Deposit {:.4}% {:.4}y", cash.rate() * 100.0, cash.maturity()),
            Self::PresentValue { derivative, quote } => {
                format!("PV {quote} {:.4}y {}", derivative.pillar_time(), derivative.currency())
            }
            Self::CreditDefaultSwap { cds, spread, .. } => {
                format!("CDS {:.1}bp {:.4}y", spread * 10_000.0, cds.protection_end())
            }
        }
    }
}
