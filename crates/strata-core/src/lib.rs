//! # Strata Core
//!
//! Dates, day counts, calendars and fixing series for the Strata
//! rates, inflation and credit analytics library.
//!
//! - **Types**: [`Date`], [`Currency`], [`FixingSeries`], compounding
//! - **Day Count Conventions**: signed year fractions between dates
//! - **Time**: valuation-date-relative times used by the derivative layer
//! - **Business Day Calendars**: weekend and holiday calendars with roll conventions
//!
//! ## Example
//!
//! ```rust
//! use strata_core::prelude::*;
//!
//! let val = Date::from_ymd(2025, 1, 2).unwrap();
//! let pay = Date::from_ymd(2025, 7, 2).unwrap();
//! let t = TimeCalculator::default().time_between(val, pay);
//! assert!(t > 0.49 && t < 0.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::similar_names)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod time;
pub mod types;

/// Everything most callers need, in one import.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, HolidayCalendar, WeekendCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{StrataError, StrataResult};
    pub use crate::time::{year_fraction, TimeCalculator};
    pub use crate::types::{Compounding, Currency, Date, FixingSeries, Frequency};
}

pub use error::{StrataError, StrataResult};
pub use types::{Currency, Date, FixingSeries};
