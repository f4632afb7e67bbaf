//! Calibration and curve configuration.
//!
//! Both structs load from TOML or JSON; missing fields take their
//! defaults and the result is validated before it is returned.
//!
//! ```rust
//! use strata_curves::config::CalibrationConfig;
//! use strata_math::solvers::BracketingSolver;
//!
//! let config = CalibrationConfig::from_toml_str("tolerance = 1e-12\nsolver = \"bisection\"").unwrap();
//! assert_eq!(config.tolerance, 1e-12);
//! assert_eq!(config.solver, BracketingSolver::Bisection);
//! assert_eq!(config.max_iterations, 100);
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strata_math::solvers::{BracketingSolver, SolverConfig};

use crate::curves::{CurveInterpolation, Extrapolation};
use crate::error::{CurveError, CurveResult};

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field name as it appears in the document.
    pub field: String,
    /// Why it was rejected.
    pub message: String,
}

impl ValidationError {
    /// Rejects `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Configuration that can check its own fields.
pub trait Validate {
    /// Every rejected field; empty when the configuration is usable.
    fn validate(&self) -> Vec<ValidationError>;

    /// No field is rejected.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Folds [`Validate::validate`] into one `InvalidConfig` naming every rejected field.
    fn validate_or_error(&self) -> CurveResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let fields = errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>().join(", ");
        let messages = errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join("; ");
        Err(CurveError::invalid_config(fields, messages))
    }
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_max_iterations() -> u32 {
    100
}

fn default_bracket_low() -> f64 {
    -0.5
}

fn default_bracket_high() -> f64 {
    1.0
}

fn default_verify_tolerance() -> f64 {
    1e-8
}

fn default_bump_size() -> f64 {
    1e-4
}

/// Settings of the bootstrap calibrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Absolute tolerance on each instrument's residual.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Root finder iteration budget per pillar.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Lower end of the node rate search interval.
    #[serde(default = "default_bracket_low")]
    pub bracket_low: f64,

    /// Upper end of the node rate search interval.
    #[serde(default = "default_bracket_high")]
    pub bracket_high: f64,

    /// Root finder.
    #[serde(default)]
    pub solver: BracketingSolver,

    /// Largest residual the final reprice check accepts.
    #[serde(default = "default_verify_tolerance")]
    pub verify_tolerance: f64,

    /// Node bump for sensitivities.
    #[serde(default = "default_bump_size")]
    pub bump_size: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            bracket_low: default_bracket_low(),
            bracket_high: default_bracket_high(),
            solver: BracketingSolver::default(),
            verify_tolerance: default_verify_tolerance(),
            bump_size: default_bump_size(),
        }
    }
}

impl CalibrationConfig {
    /// Replaces the residual tolerance.
    #[must_use]
    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self { tolerance, ..self }
    }

    /// Replaces the per-pillar step budget.
    #[must_use]
    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self { max_iterations, ..self }
    }

    /// Replaces the node rate search interval.
    #[must_use]
    pub fn with_bracket(self, bracket_low: f64, bracket_high: f64) -> Self {
        Self { bracket_low, bracket_high, ..self }
    }

    /// Replaces the root finder.
    #[must_use]
    pub fn with_solver(self, solver: BracketingSolver) -> Self {
        Self { solver, ..self }
    }

    /// The root finder settings.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> CurveResult<Self> {
        parse_toml(source)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(source: &str) -> CurveResult<Self> {
        parse_json(source)
    }
}

impl Validate for CalibrationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(f64::MIN_POSITIVE..=1e-4).contains(&self.tolerance) {
            errors.push(ValidationError::new("tolerance", "must be positive and at most 1e-4"));
        }
        if !(1..=10_000).contains(&self.max_iterations) {
            errors.push(ValidationError::new("max_iterations", "must lie in 1..=10000"));
        }
        if !(self.bracket_low.is_finite() && self.bracket_high.is_finite() && self.bracket_low < self.bracket_high) {
            errors.push(ValidationError::new("bracket", "bracket_low must be below bracket_high"));
        }
        if self.verify_tolerance.is_nan() || self.verify_tolerance < self.tolerance {
            errors.push(ValidationError::new(
                "verify_tolerance",
                "cannot be tighter than the solver tolerance",
            ));
        }
        if !(self.bump_size > 0.0 && self.bump_size < 0.01) {
            errors.push(ValidationError::new("bump_size", "must lie strictly between 0 and 0.01"));
        }

        errors
    }
}

/// How calibrated curves interpolate and extrapolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CurveSettings {
    /// Interpolation between nodes.
    #[serde(default)]
    pub interpolation: CurveInterpolation,

    /// Behaviour outside the nodes.
    #[serde(default)]
    pub extrapolation: Extrapolation,
}

impl CurveSettings {
    /// The ISDA standard model layout: linear in `r·t`, flat beyond the nodes.
    pub fn isda() -> Self {
        Self {
            interpolation: CurveInterpolation::LinearRateTime,
            extrapolation: Extrapolation::Flat,
        }
    }

    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> CurveResult<Self> {
        parse_toml(source)
    }

    /// Parses a JSON document.
    pub fn from_json_str(source: &str) -> CurveResult<Self> {
        parse_json(source)
    }
}

impl Validate for CurveSettings {
    fn validate(&self) -> Vec<ValidationError> {
        Vec::new()
    }
}

fn parse_toml<T: DeserializeOwned + Validate>(source: &str) -> CurveResult<T> {
    let value: T = toml::from_str(source).map_err(|e| CurveError::invalid_config("toml", e.to_string()))?;
    value.validate_or_error()?;
    Ok(value)
}

fn parse_json<T: DeserializeOwned + Validate>(source: &str) -> CurveResult<T> {
    let value: T = serde_json::from_str(source).map_err(|e| CurveError::invalid_config("json", e.to_string()))?;
    value.validate_or_error()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CalibrationConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.solver, BracketingSolver::Brent);
        assert_eq!(config.solver_config().tolerance, 1e-10);
    }

    #[test]
    fn test_empty_documents_take_defaults() {
        assert_eq!(CalibrationConfig::from_toml_str("").unwrap(), CalibrationConfig::default());
        assert_eq!(CalibrationConfig::from_json_str("{}").unwrap(), CalibrationConfig::default());
        assert_eq!(CurveSettings::from_toml_str("").unwrap(), CurveSettings::default());
    }

    #[test]
    fn test_curve_settings_from_json() {
        let settings =
            CurveSettings::from_json_str(r#"{"interpolation": "linear_rate_time", "extrapolation": "disallowed"}"#).unwrap();
        assert_eq!(settings.interpolation, CurveInterpolation::LinearRateTime);
        assert_eq!(settings.extrapolation, Extrapolation::Disallowed);
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let config = CalibrationConfig::default().with_bracket(0.5, 0.1).with_max_iterations(0);
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "max_iterations");
        assert_eq!(errors[1].field, "bracket");

        let err = config.validate_or_error().unwrap_err();
        assert!(matches!(err, CurveError::InvalidConfig { ref field, .. } if field == "max_iterations, bracket"));
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(
            CalibrationConfig::from_toml_str("tolerance = \"tight\""),
            Err(CurveError::InvalidConfig { .. })
        ));
        assert!(CalibrationConfig::from_toml_str("tolerance = 0.5").is_err());
    }
}
