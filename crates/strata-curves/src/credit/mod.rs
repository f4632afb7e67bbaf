//! Credit default swaps under the ISDA standard model.
//!
//! A [`CdsFactory`] turns trade dates into a [`CdsAnalytic`], a purely
//! time-based description; [`IsdaCdsPricer`] values it against a discount
//! curve and a hazard rate curve.

mod cds;
mod factory;
mod pricer;

pub use cds::{CdsAnalytic, CdsCoupon, PriceType};
pub use factory::{next_imm_date, previous_imm_date, CdsFactory, DEFAULT_RECOVERY_RATE};
pub use pricer::IsdaCdsPricer;
