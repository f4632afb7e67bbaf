//! Cash loan / deposit.

use std::hash::{Hash, Hasher};

use strata_core::types::Currency;
use strata_core::{StrataError, StrataResult};

use crate::checks;
use crate::grid::HashValue;

/// A cash loan: the notional is lent at `trade_time` and repaid with
/// simple interest `notional · rate · year_fraction` at `maturity`.
///
/// # Example
///
/// ```rust
/// use strata_core::types::Currency;
/// use strata_instruments::derivatives::Cash;
///
/// let cash = Cash::unit(Currency::USD, 1.0, 0.05, "USD-DSC").unwrap();
/// assert_eq!(cash.trade_time(), 0.0);
/// assert_eq!(cash.year_fraction(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Cash {
    currency: Currency,
    trade_time: f64,
    maturity: f64,
    notional: f64,
    rate: f64,
    year_fraction: f64,
    curve_name: String,
}

impl Cash {
    /// Creates a cash loan.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a negative trade time or year fraction, a
    ///   non-finite value or an empty curve name
    /// - `InvalidDateOrder` unless `trade_time < maturity`
    pub fn new(
        currency: Currency,
        trade_time: f64,
        maturity: f64,
        notional: f64,
        rate: f64,
        year_fraction: f64,
        curve_name: &str,
    ) -> StrataResult<Self> {
        checks::non_negative("trade time", trade_time)?;
        checks::finite("maturity", maturity)?;
        checks::finite("notional", notional)?;
        checks::finite("rate", rate)?;
        checks::non_negative("year fraction", year_fraction)?;
        if trade_time >= maturity {
            return Err(StrataError::invalid_date_order(format!(
                "trade time {trade_time} must be before maturity {maturity}"
            )));
        }

        Ok(Self {
            currency,
            trade_time,
            maturity,
            notional,
            rate,
            year_fraction,
            curve_name: checks::curve_name(curve_name)?,
        })
    }

    /// Unit-notional loan traded now, accruing over its whole life.
    pub fn unit(currency: Currency, maturity: f64, rate: f64, curve_name: &str) -> StrataResult<Self> {
        Self::new(currency, 0.0, maturity, 1.0, rate, maturity, curve_name)
    }

    /// Currency of the loan.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Time at which the notional is lent.
    pub fn trade_time(&self) -> f64 {
        self.trade_time
    }

    /// Time at which notional and interest are repaid.
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Loan notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Simple interest rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Accrual factor of the interest.
    pub fn year_fraction(&self) -> f64 {
        self.year_fraction
    }

    /// Discounting curve name.
    pub fn curve_name(&self) -> &str {
        &self.curve_name
    }

    /// Amount repaid at maturity.
    pub fn repayment(&self) -> f64 {
        self.notional * (1.0 + self.rate * self.year_fraction)
    }

    /// Same loan at another rate.
    pub fn with_rate(&self, rate: f64) -> StrataResult<Self> {
        Ok(Self {
            rate: checks::finite("rate", rate)?,
            ..self.clone()
        })
    }

    /// Same loan with another notional.
    pub fn with_notional(&self, notional: f64) -> StrataResult<Self> {
        Ok(Self {
            notional: checks::finite("notional", notional)?,
            ..self.clone()
        })
    }
}

impl Eq for Cash {}

impl Hash for Cash {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.currency.hash(state);
        [self.trade_time, self.maturity, self.notional, self.rate, self.year_fraction]
            .as_slice()
            .hash_value(state);
        self.curve_name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_loan() {
        let cash = Cash::unit(Currency::EUR, 1.0, 0.05, "EUR-DSC").unwrap();
        assert_eq!(cash.maturity(), 1.0);
        assert_eq!(cash.year_fraction(), 1.0);
        assert_eq!(cash.rate(), 0.05);
        assert_eq!(cash.notional(), 1.0);
        assert_eq!(cash.repayment(), 1.05);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            Cash::new(Currency::USD, -0.1, 1.0, 1.0, 0.01, 1.0, "C"),
            Err(StrataError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Cash::new(Currency::USD, 0.0, 1.0, 1.0, 0.01, -1.0, "C"),
            Err(StrataError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Cash::new(Currency::USD, 1.0, 1.0, 1.0, 0.01, 0.0, "C"),
            Err(StrataError::InvalidDateOrder { .. })
        ));
        assert!(Cash::unit(Currency::USD, 1.0, 0.01, "").is_err());
    }

    #[test]
    fn test_negative_rates_are_allowed() {
        let cash = Cash::unit(Currency::CHF, 0.5, -0.0075, "CHF-DSC").unwrap();
        assert_eq!(cash.rate(), -0.0075);
    }

    #[test]
    fn test_with_notional_leaves_receiver() {
        let cash = Cash::unit(Currency::USD, 2.0, 0.03, "USD-DSC").unwrap();
        let big = cash.with_notional(1e6).unwrap();
        assert_eq!(cash.notional(), 1.0);
        assert_eq!(big.notional(), 1e6);
        assert_eq!(big.maturity(), cash.maturity());
    }
}
