//! # Strata Instruments
//!
//! Instrument definitions and their time-based derivatives.
//!
//! - **Definitions**: trade terms in dates ([`definitions`])
//! - **Derivatives**: the same trades seen from a valuation date, in times
//!   ([`derivatives`]), with an open visitor over a closed set of kinds
//! - **Indices**: Ibor and price index conventions
//!
//! ## Example
//!
//! ```rust
//! use strata_core::types::{Currency, Date};
//! use strata_instruments::prelude::*;
//!
//! let def = CashDefinition::new(
//!     Currency::USD,
//!     Date::from_ymd(2025, 1, 2).unwrap(),
//!     Date::from_ymd(2026, 1, 2).unwrap(),
//!     1.0,
//!     0.05,
//!     1.0,
//! )
//! .unwrap();
//! let derivative = def.to_derivative(Date::from_ymd(2025, 1, 2).unwrap(), &["USD-DSC"]).unwrap();
//! assert_eq!(derivative.pillar_time(), 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::return_self_not_must_use)]

mod checks;
pub mod definitions;
pub mod derivatives;
mod grid;
pub mod index;

/// Everything most callers need, in one import.
pub mod prelude {
    pub use crate::definitions::{
        CashDefinition, CouponIborAverageCompoundingDefinition, CouponInflationYearOnYearInterpolationDefinition,
        CouponTerms, FixingDateSchedule, InstrumentDefinition, InstrumentDefinitionWithData,
    };
    pub use crate::derivatives::{
        Cash, CompoundingSchedule, CouponFixed, CouponIborAverageCompounding, CouponInflationYearOnYearInterpolation,
        InstrumentDerivative, InstrumentDerivativeVisitor,
    };
    pub use crate::grid::PeriodGrid;
    pub use crate::index::{IborIndex, PriceIndex};
}

pub use grid::PeriodGrid;
pub use index::{IborIndex, PriceIndex};
