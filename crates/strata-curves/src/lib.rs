//! # Strata Curves
//!
//! Curves, their calibration and the analytics built on them.
//!
//! This crate provides:
//!
//! - **Curves**: interpolated zero rate and hazard rate curves, price index
//!   curves and named curve bundles ([`curves`])
//! - **Pricing**: present values of instrument derivatives ([`pricing`])
//! - **Credit**: CDS construction and the ISDA standard model ([`credit`])
//! - **Calibration**: sequential per-pillar bootstrap with a reprice check
//!   ([`calibration`])
//! - **Configuration**: TOML/JSON settings with validation ([`config`])
//!
//! ## Quick Start
//!
//! ```rust
//! use strata_core::types::Currency;
//! use strata_curves::prelude::*;
//! use strata_instruments::derivatives::Cash;
//!
//! let instruments = [(0.5, 0.030), (1.0, 0.032), (2.0, 0.035)]
//!     .iter()
//!     .map(|&(t, rate)| {
//!         let cash = Cash::unit(Currency::EUR, t, 0.0, "EUR-DSC").unwrap();
//!         CalibrationInstrument::deposit(&cash, rate).unwrap()
//!     })
//!     .collect::<Vec<_>>();
//!
//! let result = CurveCalibrator::default()
//!     .calibrate("EUR-DSC", &instruments, &CurveBundle::new())
//!     .unwrap();
//!
//! // Every deposit reprices to zero
//! assert!(result.repricing_report.max_error() < 1e-8);
//!
//! // Discount factors between nodes come from the interpolated zero rate
//! let df = result.curve.discount_factor(1.5).unwrap();
//! assert!(df < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::similar_names)]

pub mod calibration;
pub mod config;
pub mod credit;
pub mod curves;
pub mod error;
pub mod pricing;

/// Everything most callers need, in one import.
pub mod prelude {
    pub use crate::calibration::{
        CalibrationInstrument, CalibrationJob, CalibrationResult, CurveCalibrator, PillarDiagnostics,
        RepricingCheck, RepricingReport,
    };
    pub use crate::config::{CalibrationConfig, CurveSettings, Validate, ValidationError};
    pub use crate::credit::{CdsAnalytic, CdsFactory, IsdaCdsPricer, PriceType};
    pub use crate::curves::{
        BucketShift, CurveBundle, CurveInterpolation, Extrapolation, InterpolatedCurve, PriceIndexCurve, ShiftType,
    };
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::pricing::{present_value, PresentValueCalculator};
}

pub use calibration::{CalibrationInstrument, CurveCalibrator};
pub use curves::{CurveBundle, InterpolatedCurve};
pub use error::{CurveError, CurveResult};
