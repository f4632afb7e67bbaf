//! Bootstrap calibration of curves to market quotes.
//!
//! - [`CalibrationInstrument`]: an instrument with its quote
//! - [`CurveCalibrator`]: sequential per-pillar root solving, incremental
//!   re-solves and parallel independent calibrations
//! - [`RepricingReport`]: the reprice check every result carries
//! - [`node_sensitivities`]: bumped present value sensitivities

mod calibrator;
mod instrument;
mod report;
mod sensitivities;

pub use calibrator::{CalibrationJob, CalibrationResult, CurveCalibrator, PillarDiagnostics};
pub use instrument::CalibrationInstrument;
pub use report::{RepricingCheck, RepricingReport};
pub use sensitivities::{node_sensitivities, parallel_sensitivity};
