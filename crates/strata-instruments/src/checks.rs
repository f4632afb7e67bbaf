//! Argument checks shared by the constructors.

use strata_core::types::Currency;
use strata_core::{StrataError, StrataResult};

pub(crate) fn finite(name: &str, value: f64) -> StrataResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StrataError::invalid_argument(format!("{name} must be finite, got {value}")))
    }
}

pub(crate) fn non_negative(name: &str, value: f64) -> StrataResult<f64> {
    if finite(name, value)? < 0.0 {
        return Err(StrataError::invalid_argument(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    Ok(value)
}

pub(crate) fn all_finite<'a>(name: &str, values: impl IntoIterator<Item = &'a f64>) -> StrataResult<()> {
    values.into_iter().try_for_each(|v| finite(name, *v).map(|_| ()))
}

pub(crate) fn curve_name(name: &str) -> StrataResult<String> {
    if name.trim().is_empty() {
        return Err(StrataError::invalid_argument("curve name must not be empty"));
    }
    Ok(name.to_string())
}

/// First curve name: the discounting curve.
pub(crate) fn discounting_curve(curve_names: &[&str]) -> StrataResult<String> {
    let first = curve_names
        .first()
        .ok_or_else(|| StrataError::invalid_argument("curve names must not be empty"))?;
    curve_name(first)
}

/// Second curve name when given, else the discounting curve.
pub(crate) fn forward_curve(curve_names: &[&str]) -> StrataResult<String> {
    match curve_names.get(1) {
        Some(name) => curve_name(name),
        None => discounting_curve(curve_names),
    }
}

pub(crate) fn same_currency(what: &str, expected: Currency, actual: Currency) -> StrataResult<()> {
    if expected != actual {
        return Err(StrataError::invalid_argument(format!(
            "{what} currency {actual} differs from payment currency {expected}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_name_fallback() {
        assert_eq!(forward_curve(&["DSC"]).unwrap(), "DSC");
        assert_eq!(forward_curve(&["DSC", "FWD3M"]).unwrap(), "FWD3M");
        assert!(discounting_curve(&[]).is_err());
        assert!(discounting_curve(&["  "]).is_err());
    }

    #[test]
    fn test_numeric_checks() {
        assert!(non_negative("notional", -1.0).is_err());
        assert!(non_negative("notional", 0.0).is_ok());
        assert!(finite("rate", f64::NAN).is_err());
        assert!(all_finite("w", &[1.0, f64::INFINITY]).is_err());
    }
}
