//! Day count conventions.
//!
//! A day count maps a pair of dates to a year fraction. All conventions
//! here are **signed**: swapping the arguments negates the result, and
//! nothing is clamped at zero. Callers decide what a negative fraction
//! means (a past cash flow, a node before the valuation date, ...).
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360, money market and CDS premium legs
//! - [`Act365Fixed`]: Actual/365 Fixed, ISDA time between dates
//! - [`ActActIsda`]: Actual/Actual ISDA, leap/non-leap split
//! - [`Thirty360US`]: 30/360 US bond basis
//! - [`Thirty360E`]: 30E/360 Eurobond basis
//!
//! # Usage
//!
//! ```rust
//! use strata_core::daycounts::DayCountConvention;
//! use strata_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 4, 1).unwrap();
//! assert_eq!(DayCountConvention::Act360.year_fraction(start, end), 0.25);
//! assert_eq!(DayCountConvention::Act360.year_fraction(end, start), -0.25);
//! ```

mod actact;
mod actual;
mod thirty360;

pub use actual::{Act360, Act365Fixed};
pub use actact::ActActIsda;
pub use thirty360::{Thirty360E, Thirty360US};

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StrataError;
use crate::types::Date;

/// Turns a pair of dates into a year fraction.
///
/// Implementations carry no state and are shared between threads.
pub trait DayCount: Send + Sync {
    /// Market name such as "ACT/360".
    fn name(&self) -> &'static str;

    /// Exact year fraction, negative when `end` precedes `start`.
    fn year_fraction_decimal(&self, start: Date, end: Date) -> Decimal;

    /// Days from `start` to `end` as the convention counts them.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// [`DayCount::year_fraction_decimal`] rounded to a double.
    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.year_fraction_decimal(start, end)
            .to_f64()
            .unwrap_or(f64::NAN)
    }
}

/// A day count chosen at runtime, for instance from a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// [`Act360`]
    Act360,
    /// [`Act365Fixed`]
    Act365Fixed,
    /// [`ActActIsda`]
    ActActIsda,
    /// [`Thirty360US`]
    Thirty360US,
    /// [`Thirty360E`]
    Thirty360E,
}

impl DayCountConvention {
    /// Every convention, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Act360,
        Self::Act365Fixed,
        Self::ActActIsda,
        Self::Thirty360US,
        Self::Thirty360E,
    ];

    /// The implementation behind the variant.
    #[must_use]
    pub fn rule(self) -> &'static dyn DayCount {
        match self {
            Self::Act360 => &Act360,
            Self::Act365Fixed => &Act365Fixed,
            Self::ActActIsda => &ActActIsda,
            Self::Thirty360US => &Thirty360US,
            Self::Thirty360E => &Thirty360E,
        }
    }

    /// Market name; `FromStr` accepts it back.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.rule().name()
    }

    /// Signed year fraction from `start` to `end`.
    #[must_use]
    pub fn year_fraction(self, start: Date, end: Date) -> f64 {
        self.rule().year_fraction(start, end)
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = StrataError;

    /// Accepts the market names plus the usual spellings ("Actual/365", "Bond").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_uppercase().replace("ACTUAL", "ACT");
        let convention = match key.as_str() {
            "ACT/360" | "ACT360" => Self::Act360,
            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACT365" => Self::Act365Fixed,
            "ACT/ACT" | "ACT/ACT ISDA" => Self::ActActIsda,
            "30/360" | "30/360 US" | "30U/360" | "BOND" => Self::Thirty360US,
            "30E/360" | "30/360 ICMA" | "EUROBOND" => Self::Thirty360E,
            _ => {
                return Err(StrataError::DayCountError {
                    reason: format!("no day count called '{s}'"),
                })
            }
        };
        Ok(convention)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_spellings() {
        let parse = |s: &str| s.parse::<DayCountConvention>().unwrap();
        assert_eq!(parse("ACT/360"), DayCountConvention::Act360);
        assert_eq!(parse("actual/365"), DayCountConvention::Act365Fixed);
        assert_eq!(parse("Actual/Actual ISDA"), DayCountConvention::ActActIsda);
        assert_eq!(parse("Bond"), DayCountConvention::Thirty360US);
        assert!("ACT/999".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_names_parse_back() {
        for conv in DayCountConvention::ALL {
            assert_eq!(conv.to_string().parse::<DayCountConvention>().unwrap(), conv);
        }
    }

    #[test]
    fn test_reversing_dates_negates_the_fraction() {
        let (a, b) = (date(2023, 11, 30), date(2025, 2, 28));
        // 30/360 US treats end-of-February asymmetrically
        for conv in DayCountConvention::ALL.into_iter().filter(|c| *c != DayCountConvention::Thirty360US) {
            let forward = conv.year_fraction(a, b);
            assert!(forward > 0.0);
            assert_eq!(forward, -conv.year_fraction(b, a), "{conv}");
        }
    }
}
