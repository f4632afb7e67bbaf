//! Business day adjustment conventions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::error::StrataError;
use crate::types::Date;

/// Rule for moving a payment or fixing date off a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessDayConvention {
    /// No adjustment.
    Unadjusted,
    /// First business day on or after the date.
    #[default]
    Following,
    /// Following, unless the month changes.
    ModifiedFollowing,
    /// Last business day on or before the date.
    Preceding,
    /// Preceding, unless the month changes.
    ModifiedPreceding,
}

impl BusinessDayConvention {
    /// Rolls `date` on `calendar`. Business days are returned unchanged.
    pub fn apply<C: Calendar + ?Sized>(self, date: Date, calendar: &C) -> Date {
        if calendar.is_business_day(date) {
            return date;
        }
        let (step, fallback) = match self {
            Self::Unadjusted => return date,
            Self::Following => return roll(date, 1, calendar),
            Self::Preceding => return roll(date, -1, calendar),
            Self::ModifiedFollowing => (1, -1),
            Self::ModifiedPreceding => (-1, 1),
        };
        let rolled = roll(date, step, calendar);
        if rolled.month() == date.month() {
            rolled
        } else {
            roll(date, fallback, calendar)
        }
    }

    /// Short market code ("F", "MF", ...).
    pub fn code(self) -> &'static str {
        match self {
            Self::Unadjusted => "NONE",
            Self::Following => "F",
            Self::ModifiedFollowing => "MF",
            Self::Preceding => "P",
            Self::ModifiedPreceding => "MP",
        }
    }
}

/// Steps one calendar day at a time until a business day is reached.
fn roll<C: Calendar + ?Sized>(mut date: Date, step: i64, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(step);
    }
    date
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BusinessDayConvention {
    type Err = StrataError;

    /// Parses market codes ("MF") and long names ("Modified Following").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.chars().filter(|c| !c.is_whitespace() && *c != '_').collect();
        match normalized.to_uppercase().as_str() {
            "NONE" | "UNADJUSTED" => Ok(Self::Unadjusted),
            "F" | "FOLLOWING" => Ok(Self::Following),
            "MF" | "MODIFIEDFOLLOWING" => Ok(Self::ModifiedFollowing),
            "P" | "PRECEDING" => Ok(Self::Preceding),
            "MP" | "MODIFIEDPRECEDING" => Ok(Self::ModifiedPreceding),
            _ => Err(StrataError::invalid_argument(format!(
                "unknown business day convention: '{s}'"
            ))),
        }
    }
}
