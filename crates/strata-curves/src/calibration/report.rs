//! Reprice check of calibrated curves.
//!
//! Once every node is solved, each input instrument is priced again on the
//! finished curve. [`RepricingReport`] keeps one [`RepricingCheck`] per
//! instrument and travels with every calibration result.

use std::fmt;

/// One instrument priced on the finished curve.
#[derive(Debug, Clone, PartialEq)]
pub struct RepricingCheck {
    /// Instrument label, such as "Deposit 5.0000% 1.0000y".
    pub instrument_id: String,
    /// Index in the calibration set.
    pub pillar: usize,
    /// Market quote the instrument was calibrated to.
    pub quote: f64,
    /// Residual on the finished curve.
    pub residual: f64,
    /// `|residual|`.
    pub error: f64,
    /// Largest accepted `error`.
    pub tolerance: f64,
    /// `error <= tolerance`.
    pub passed: bool,
}

impl RepricingCheck {
    /// Grades `residual` against `tolerance`.
    #[must_use]
    pub fn new(instrument_id: String, pillar: usize, quote: f64, residual: f64, tolerance: f64) -> Self {
        let error = residual.abs();
        Self {
            passed: error <= tolerance,
            instrument_id,
            pillar,
            quote,
            residual,
            error,
            tolerance,
        }
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<3} {:<4} {:>10.3e} / {:.0e}  {}",
            self.pillar,
            if self.passed { "ok" } else { "MISS" },
            self.residual,
            self.tolerance,
            self.instrument_id
        )
    }
}

/// All reprice checks of one calibration, in pillar order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
}

impl RepricingReport {
    /// Wraps the checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        Self { checks }
    }

    /// True when no instrument misses its tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.misses().next().is_none()
    }

    /// Every check.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Largest `|residual|`, zero for an empty report.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.checks.iter().fold(0.0_f64, |worst, c| worst.max(c.error))
    }

    /// Root mean square of the residuals, zero for an empty report.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        if self.checks.is_empty() {
            return 0.0;
        }
        let squares: f64 = self.checks.iter().map(|c| c.residual.powi(2)).sum();
        (squares / self.checks.len() as f64).sqrt()
    }

    /// How many instruments reprice within tolerance.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checks.len() - self.misses().count()
    }

    /// Checks outside tolerance.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&RepricingCheck> {
        self.misses().collect()
    }

    /// The miss with the largest error.
    #[must_use]
    pub fn worst_failure(&self) -> Option<&RepricingCheck> {
        self.misses().max_by(|a, b| a.error.total_cmp(&b.error))
    }

    fn misses(&self) -> impl Iterator<Item = &RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "reprice {}: {} of {} within tolerance, max {:.2e}, rms {:.2e}",
            if self.is_valid() { "ok" } else { "FAILED" },
            self.passed_count(),
            self.checks.len(),
            self.max_error(),
            self.rms_error()
        )?;
        self.checks.iter().try_for_each(|check| writeln!(f, "  {check}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_statistics() {
        let report = RepricingReport::new(vec![
            RepricingCheck::new("A".into(), 0, 0.01, 3e-9, 1e-8),
            RepricingCheck::new("B".into(), 1, 0.02, -4e-8, 1e-8),
            RepricingCheck::new("C".into(), 2, 0.03, 2e-8, 1e-8),
        ]);
        assert!(!report.is_valid());
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.max_error(), 4e-8);
        assert_eq!(report.worst_failure().map(|c| c.pillar), Some(1));
        assert_eq!(report.failed_checks().len(), 2);
        assert!(report.to_string().starts_with("reprice FAILED: 1 of 3"));
        assert_eq!(report.to_string().lines().count(), 4);
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = RepricingReport::default();
        assert!(report.is_valid());
        assert_eq!(report.rms_error(), 0.0);
        assert!(report.worst_failure().is_none());
    }
}
