//! Sequential bootstrap of a curve, one node per quoted instrument.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use strata_instruments::derivatives::InstrumentDerivative;
use tracing::{debug, info, warn};

use crate::calibration::instrument::CalibrationInstrument;
use crate::calibration::report::{RepricingCheck, RepricingReport};
use crate::calibration::sensitivities;
use crate::config::{CalibrationConfig, CurveSettings, Validate};
use crate::curves::{CurveBundle, Extrapolation, InterpolatedCurve};
use crate::error::{CurveError, CurveResult};

/// Node times of the same pillar agree when closer than this.
const TIME_MATCH: f64 = 1e-12;

/// Outcome of solving a single pillar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarDiagnostics {
    /// Position of the instrument in the calibration set.
    pub pillar: usize,
    /// Node time.
    pub time: f64,
    /// Market quote.
    pub quote: f64,
    /// Solved node rate.
    pub rate: f64,
    /// Root finder iterations.
    pub iterations: u32,
    /// Residual at the solved rate.
    pub residual: f64,
}

/// A calibrated curve with its per-pillar diagnostics and repricing report.
#[derive(Debug, Clone)]
pub struct CalibrationResult {
    /// The calibrated curve.
    pub curve: InterpolatedCurve,
    /// One entry per solved pillar, in pillar order.
    pub pillars: Vec<PillarDiagnostics>,
    /// Repricing of every input instrument against the final curve.
    pub repricing_report: RepricingReport,
    /// Time taken by the calibration.
    pub build_duration: Duration,
}

impl CalibrationResult {
    /// Returns whether every instrument repriced within tolerance.
    pub fn is_valid(&self) -> bool {
        self.repricing_report.is_valid()
    }

    /// The solved node rates, in pillar order.
    pub fn solved_rates(&self) -> Vec<f64> {
        self.pillars.iter().map(|p| p.rate).collect()
    }
}

/// An independent calibration for [`CurveCalibrator::calibrate_all`].
#[derive(Debug, Clone)]
pub struct CalibrationJob {
    /// Name of the curve to build.
    pub name: String,
    /// Its quoted instruments, ordered by pillar time.
    pub instruments: Vec<CalibrationInstrument>,
}

impl CalibrationJob {
    /// Creates a job.
    pub fn new(name: impl Into<String>, instruments: Vec<CalibrationInstrument>) -> Self {
        Self {
            name: name.into(),
            instruments,
        }
    }
}

/// Bootstraps a curve node by node from quoted instruments.
///
/// For pillar `i` the nodes before it are frozen and node `i` is solved so
/// that instrument `i` meets its quote. Beyond node `i` the curve is held
/// flat while solving, so later nodes never influence earlier pillars.
/// Either every pillar solves and a curve is returned, or the first
/// failing pillar is reported and no curve escapes.
///
/// # Example
///
/// ```rust
/// use strata_core::types::Currency;
/// use strata_curves::calibration::{CalibrationInstrument, CurveCalibrator};
/// use strata_curves::curves::CurveBundle;
/// use strata_instruments::derivatives::Cash;
///
/// let instruments = [0.5, 1.0, 2.0]
///     .iter()
///     .map(|t| {
///         let cash = Cash::unit(Currency::USD, *t, 0.0, "USD-DSC").unwrap();
///         CalibrationInstrument::deposit(&cash, 0.04).unwrap()
///     })
///     .collect::<Vec<_>>();
///
/// let result = CurveCalibrator::default()
///     .calibrate("USD-DSC", &instruments, &CurveBundle::new())
///     .unwrap();
/// assert!(result.is_valid());
/// assert_eq!(result.curve.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveCalibrator {
    config: CalibrationConfig,
    settings: CurveSettings,
}

impl CurveCalibrator {
    /// Creates a calibrator.
    pub fn new(config: CalibrationConfig, settings: CurveSettings) -> Self {
        Self { config, settings }
    }

    /// The calibration settings.
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// The layout of calibrated curves.
    pub fn settings(&self) -> &CurveSettings {
        &self.settings
    }

    /// Calibrates curve `name` to `instruments`, taking every other curve from `base`.
    ///
    /// # Errors
    ///
    /// - `InsufficientPoints` without instruments
    /// - `NonMonotonicTimes` unless pillar times strictly increase
    /// - `CalibrationFailure` naming the first pillar that cannot be solved
    /// - `InvalidConfig` for an invalid configuration
    pub fn calibrate(
        &self,
        name: &str,
        instruments: &[CalibrationInstrument],
        base: &CurveBundle,
    ) -> CurveResult<CalibrationResult> {
        let started = Instant::now();
        self.config.validate_or_error()?;
        let times = pillar_times(instruments)?;
        for instrument in instruments {
            instrument.check_curve(name)?;
        }

        let mut curve = InterpolatedCurve::flat(name, times, 0.0)?
            .with_interpolation(self.settings.interpolation)
            .with_extrapolation(self.settings.extrapolation);
        let mut pillars = Vec::with_capacity(instruments.len());
        for (pillar, instrument) in instruments.iter().enumerate() {
            let (next, diagnostics) = self.solve_node(&curve, pillar, instrument, base)?;
            curve = next;
            pillars.push(diagnostics);
        }

        self.finish(curve, pillars, instruments, base, started)
    }

    /// Like [`calibrate`](Self::calibrate), but a curve that misses any quote
    /// by more than the verify tolerance is a `CalibrationFailure`.
    pub fn calibrate_strict(
        &self,
        name: &str,
        instruments: &[CalibrationInstrument],
        base: &CurveBundle,
    ) -> CurveResult<CalibrationResult> {
        let result = self.calibrate(name, instruments, base)?;
        match result.repricing_report.worst_failure() {
            None => Ok(result),
            Some(check) => Err(CurveError::calibration_failure(
                check.pillar,
                check.quote,
                format!(
                    "repricing residual {:.2e} exceeds tolerance {:.2e}",
                    check.residual, check.tolerance
                ),
            )),
        }
    }

    /// Re-solves node `pillar` of an existing curve against `instrument`.
    ///
    /// Earlier nodes stay frozen; later nodes are kept but do not take part.
    /// Returns the updated curve, which shares its node times with `curve`.
    pub fn solve_pillar(
        &self,
        curve: &InterpolatedCurve,
        pillar: usize,
        instrument: &CalibrationInstrument,
        base: &CurveBundle,
    ) -> CurveResult<(InterpolatedCurve, PillarDiagnostics)> {
        self.config.validate_or_error()?;
        let node_time = curve.times().get(pillar).copied().ok_or_else(|| {
            CurveError::invalid_argument(format!("pillar {pillar} out of range for {} nodes", curve.len()))
        })?;
        if (node_time - instrument.pillar_time()).abs() > TIME_MATCH {
            return Err(CurveError::invalid_argument(format!(
                "instrument pillar time {} does not match node time {node_time}",
                instrument.pillar_time()
            )));
        }
        instrument.check_curve(curve.name())?;
        self.solve_node(curve, pillar, instrument, base)
    }

    /// Re-solves every node from `first_pillar` on, keeping earlier nodes.
    ///
    /// `instruments` is the full calibration set of `curve`.
    pub fn recalibrate_from(
        &self,
        curve: &InterpolatedCurve,
        first_pillar: usize,
        instruments: &[CalibrationInstrument],
        base: &CurveBundle,
    ) -> CurveResult<CalibrationResult> {
        let started = Instant::now();
        self.config.validate_or_error()?;
        let times = pillar_times(instruments)?;
        if times.len() != curve.len() || times.iter().zip(curve.times()).any(|(a, b)| (a - b).abs() > TIME_MATCH) {
            return Err(CurveError::invalid_argument(
                "instrument pillars do not match the curve nodes",
            ));
        }
        if first_pillar >= curve.len() {
            return Err(CurveError::invalid_argument(format!(
                "first pillar {first_pillar} out of range for {} nodes",
                curve.len()
            )));
        }

        let mut next = curve.clone();
        let mut pillars = Vec::with_capacity(instruments.len());
        for (pillar, instrument) in instruments.iter().enumerate() {
            if pillar < first_pillar {
                pillars.push(PillarDiagnostics {
                    pillar,
                    time: times[pillar],
                    quote: instrument.quote(),
                    rate: curve.rates()[pillar],
                    iterations: 0,
                    residual: instrument.residual(&curve.truncated(pillar + 1)?, base)?,
                });
                continue;
            }
            instrument.check_curve(curve.name())?;
            let (solved, diagnostics) = self.solve_node(&next, pillar, instrument, base)?;
            next = solved;
            pillars.push(diagnostics);
        }

        self.finish(next, pillars, instruments, base, started)
    }

    /// Runs independent calibrations in parallel, one result per job.
    pub fn calibrate_all(&self, jobs: &[CalibrationJob], base: &CurveBundle) -> Vec<CurveResult<CalibrationResult>> {
        jobs.par_iter()
            .map(|job| self.calibrate(&job.name, &job.instruments, base))
            .collect()
    }

    /// Reprices every instrument against `curve`.
    pub fn reprice(
        &self,
        curve: &InterpolatedCurve,
        instruments: &[CalibrationInstrument],
        base: &CurveBundle,
    ) -> CurveResult<RepricingReport> {
        let checks = instruments
            .iter()
            .enumerate()
            .map(|(pillar, instrument)| {
                Ok(RepricingCheck::new(
                    instrument.description(),
                    pillar,
                    instrument.quote(),
                    instrument.residual(curve, base)?,
                    self.config.verify_tolerance,
                ))
            })
            .collect::<CurveResult<Vec<_>>>()?;
        Ok(RepricingReport::new(checks))
    }

    /// Node sensitivities of `derivative` to curve `curve_name`, bumped by
    /// the configured bump size.
    pub fn node_sensitivities(
        &self,
        derivative: &InstrumentDerivative,
        curves: &CurveBundle,
        curve_name: &str,
    ) -> CurveResult<Vec<f64>> {
        sensitivities::node_sensitivities(derivative, curves, curve_name, self.config.bump_size)
    }

    fn solve_node(
        &self,
        curve: &InterpolatedCurve,
        pillar: usize,
        instrument: &CalibrationInstrument,
        base: &CurveBundle,
    ) -> CurveResult<(InterpolatedCurve, PillarDiagnostics)> {
        let quote = instrument.quote();
        let prefix = curve.truncated(pillar + 1)?.with_extrapolation(Extrapolation::Flat);
        let pricing_error = RefCell::new(None);
        let objective = |rate: f64| {
            let residual = prefix
                .with_node_rate(pillar, rate)
                .and_then(|candidate| instrument.residual(&candidate, base));
            residual.unwrap_or_else(|e| {
                pricing_error.borrow_mut().get_or_insert(e);
                f64::NAN
            })
        };

        let solved = self.config.solver.solve(
            objective,
            self.config.bracket_low,
            self.config.bracket_high,
            &self.config.solver_config(),
        );
        if let Some(e) = pricing_error.into_inner() {
            warn!(curve = curve.name(), pillar, quote, error = %e, "pricing failed during calibration");
            return Err(e);
        }
        let result = solved.map_err(|e| {
            warn!(curve = curve.name(), pillar, quote, error = %e, "pillar calibration failed");
            CurveError::calibration_failure(pillar, quote, e.to_string())
        })?;

        debug!(
            curve = curve.name(),
            pillar,
            quote,
            rate = result.root,
            iterations = result.iterations,
            "solved pillar"
        );
        let diagnostics = PillarDiagnostics {
            pillar,
            time: curve.times()[pillar],
            quote,
            rate: result.root,
            iterations: result.iterations,
            residual: result.residual,
        };
        Ok((curve.with_node_rate(pillar, result.root)?, diagnostics))
    }

    fn finish(
        &self,
        curve: InterpolatedCurve,
        pillars: Vec<PillarDiagnostics>,
        instruments: &[CalibrationInstrument],
        base: &CurveBundle,
        started: Instant,
    ) -> CurveResult<CalibrationResult> {
        let repricing_report = self.reprice(&curve, instruments, base)?;
        if repricing_report.is_valid() {
            info!(
                curve = curve.name(),
                pillars = pillars.len(),
                max_error = repricing_report.max_error(),
                "calibration complete"
            );
        } else {
            warn!(
                curve = curve.name(),
                failed = repricing_report.failed_checks().len(),
                max_error = repricing_report.max_error(),
                "calibrated curve misses quotes"
            );
        }
        Ok(CalibrationResult {
            curve,
            pillars,
            repricing_report,
            build_duration: started.elapsed(),
        })
    }
}

fn pillar_times(instruments: &[CalibrationInstrument]) -> CurveResult<Vec<f64>> {
    if instruments.is_empty() {
        return Err(CurveError::InsufficientPoints { required: 1, got: 0 });
    }
    let times: Vec<f64> = instruments.iter().map(CalibrationInstrument::pillar_time).collect();
    if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
        return Err(CurveError::NonMonotonicTimes {
            index: index + 1,
            prev: times[index],
            current: times[index + 1],
        });
    }
    Ok(times)
}
