//! Domain types shared across the workspace.
//!
//! - [`Date`]: calendar date
//! - [`Currency`]: ISO currency codes
//! - [`Frequency`]: payment frequency
//! - [`Compounding`]: rate compounding convention
//! - [`FixingSeries`]: historical index observations

mod currency;
mod date;
mod fixing;
mod frequency;

pub use currency::Currency;
pub use date::Date;
pub use fixing::FixingSeries;
pub use frequency::{Compounding, Frequency};
