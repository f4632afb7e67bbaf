//! Curve types.
//!
//! - [`InterpolatedCurve`]: zero rates (or hazard rates) at node times
//! - [`PriceIndexCurve`]: projected price index levels
//! - [`CurveBundle`]: curves by name, as derivatives reference them

mod bundle;
mod interpolated;
mod price_index;

pub use bundle::CurveBundle;
pub use interpolated::{BucketShift, CurveInterpolation, Extrapolation, InterpolatedCurve, ShiftType};
pub use price_index::PriceIndexCurve;
