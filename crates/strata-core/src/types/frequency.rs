//! Payment frequency and rate compounding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment frequency of a periodic leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// One payment per year.
    Annual,
    /// Two payments per year.
    SemiAnnual,
    /// Four payments per year (CDS premium legs).
    #[default]
    Quarterly,
    /// Twelve payments per year.
    Monthly,
}

impl Frequency {
    /// Length of one period in months.
    #[must_use]
    pub fn months_per_period(self) -> i32 {
        match self {
            Frequency::Annual => 12,
            Frequency::SemiAnnual => 6,
            Frequency::Quarterly => 3,
            Frequency::Monthly => 1,
        }
    }

    /// Periods in a year.
    #[must_use]
    pub fn periods_per_year(self) -> u32 {
        12 / self.months_per_period().unsigned_abs()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}M", self.months_per_period())
    }
}

/// Interest compounding convention of a quoted rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Compounding {
    /// Simple interest: `1 + r·t`.
    Simple,
    /// Compounded `n` times per year: `(1 + r/n)^(n·t)`.
    Periodic(Frequency),
    /// Continuous compounding: `exp(r·t)`.
    #[default]
    Continuous,
}

impl Compounding {
    /// Converts a rate quoted under this convention into the equivalent
    /// continuously compounded rate over horizon `t`.
    ///
    /// For `Simple` the horizon matters; for the other conventions it is
    /// ignored. A non-positive horizon returns the rate unchanged.
    #[must_use]
    pub fn to_continuous(&self, rate: f64, t: f64) -> f64 {
        match self {
            Compounding::Continuous => rate,
            Compounding::Periodic(freq) => {
                let n = f64::from(freq.periods_per_year());
                n * (rate / n).ln_1p()
            }
            Compounding::Simple => {
                if t <= 0.0 {
                    rate
                } else {
                    (rate * t).ln_1p() / t
                }
            }
        }
    }

    /// Converts a continuously compounded rate into this convention over horizon `t`.
    #[must_use]
    pub fn from_continuous(&self, rate: f64, t: f64) -> f64 {
        match self {
            Compounding::Continuous => rate,
            Compounding::Periodic(freq) => {
                let n = f64::from(freq.periods_per_year());
                n * (rate / n).exp_m1()
            }
            Compounding::Simple => {
                if t <= 0.0 {
                    rate
                } else {
                    (rate * t).exp_m1() / t
                }
            }
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compounding::Simple => f.write_str("simple"),
            Compounding::Periodic(freq) => write!(f, "compounded every {freq}"),
            Compounding::Continuous => f.write_str("continuous"),
        }
    }
}
