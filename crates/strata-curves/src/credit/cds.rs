//! Time-based description of a credit default swap.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Whether a premium leg value includes the premium accrued at step-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    /// Accrued premium removed.
    #[default]
    Clean,
    /// Accrued premium included.
    Dirty,
}

/// One premium period of a CDS, in times from the trade date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsCoupon {
    /// Start of default protection for this period.
    pub effective_start: f64,
    /// End of default protection for this period.
    pub effective_end: f64,
    /// Premium payment time.
    pub payment_time: f64,
    /// Premium day count fraction.
    pub year_fraction: f64,
}

impl CdsCoupon {
    /// Creates a coupon.
    pub fn new(effective_start: f64, effective_end: f64, payment_time: f64, year_fraction: f64) -> CurveResult<Self> {
        if !effective_start.is_finite() || !effective_end.is_finite() || effective_start >= effective_end {
            return Err(CurveError::invalid_argument(format!(
                "coupon start {effective_start} must be before its end {effective_end}"
            )));
        }
        if !year_fraction.is_finite() || year_fraction < 0.0 || !payment_time.is_finite() {
            return Err(CurveError::invalid_argument(format!(
                "coupon year fraction {year_fraction} and payment time {payment_time} must be finite and non-negative"
            )));
        }
        Ok(Self {
            effective_start,
            effective_end,
            payment_time,
            year_fraction,
        })
    }
}

/// A CDS reduced to the times and fractions its ISDA valuation needs.
///
/// Times are measured from the trade date. Protection runs over
/// `[protection_start, protection_end]`; leg values are quoted for
/// settlement at `valuation_time` (the cash settlement date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdsAnalytic {
    protection_start: f64,
    protection_end: f64,
    valuation_time: f64,
    coupons: Vec<CdsCoupon>,
    recovery_rate: f64,
    accrued_year_fraction: f64,
    pay_accrued_on_default: bool,
}

impl CdsAnalytic {
    /// Creates a CDS.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the protection window is empty, the recovery
    /// rate lies outside `[0, 1)`, there is no coupon or coupons overlap.
    pub fn new(
        protection_start: f64,
        protection_end: f64,
        valuation_time: f64,
        coupons: Vec<CdsCoupon>,
        recovery_rate: f64,
        accrued_year_fraction: f64,
        pay_accrued_on_default: bool,
    ) -> CurveResult<Self> {
        let window_ok = protection_start.is_finite() && protection_end.is_finite();
        if !window_ok || protection_start < 0.0 || protection_start >= protection_end {
            return Err(CurveError::invalid_argument(format!(
                "protection window [{protection_start}, {protection_end}] is empty or starts in the past"
            )));
        }
        if coupons.is_empty() {
            return Err(CurveError::invalid_argument("a CDS needs at least one premium period"));
        }
        if coupons.windows(2).any(|w| w[1].effective_start < w[0].effective_end) {
            return Err(CurveError::invalid_argument("premium periods overlap"));
        }
        if !accrued_year_fraction.is_finite() || accrued_year_fraction < 0.0 || !valuation_time.is_finite() {
            return Err(CurveError::invalid_argument(format!(
                "accrued fraction {accrued_year_fraction} and valuation time {valuation_time} must be finite and non-negative"
            )));
        }
        Ok(Self {
            protection_start,
            protection_end,
            valuation_time,
            coupons,
            recovery_rate: check_recovery(recovery_rate)?,
            accrued_year_fraction,
            pay_accrued_on_default,
        })
    }

    /// Same CDS with another recovery rate.
    pub fn with_recovery_rate(&self, recovery_rate: f64) -> CurveResult<Self> {
        Ok(Self {
            recovery_rate: check_recovery(recovery_rate)?,
            ..self.clone()
        })
    }

    /// Start of protection.
    pub fn protection_start(&self) -> f64 {
        self.protection_start
    }

    /// End of protection; the calibration pillar of the CDS.
    pub fn protection_end(&self) -> f64 {
        self.protection_end
    }

    /// Cash settlement time the leg values are discounted to.
    pub fn valuation_time(&self) -> f64 {
        self.valuation_time
    }

    /// Premium periods.
    pub fn coupons(&self) -> &[CdsCoupon] {
        &self.coupons
    }

    /// Recovery rate.
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Loss given default, `1 - recovery`.
    pub fn lgd(&self) -> f64 {
        1.0 - self.recovery_rate
    }

    /// Premium fraction accrued at step-in.
    pub fn accrued_year_fraction(&self) -> f64 {
        self.accrued_year_fraction
    }

    /// Whether the premium accrued up to a default is paid.
    pub fn pays_accrued_on_default(&self) -> bool {
        self.pay_accrued_on_default
    }
}

fn check_recovery(recovery_rate: f64) -> CurveResult<f64> {
    if (0.0..1.0).contains(&recovery_rate) {
        Ok(recovery_rate)
    } else {
        Err(CurveError::invalid_argument(format!(
            "recovery rate must lie in [0, 1), got {recovery_rate}"
        )))
    }
}
