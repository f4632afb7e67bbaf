//! Node-based zero rate curve.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strata_math::interpolation::find_segment;

use crate::error::{CurveError, CurveResult};

/// How zero rates are interpolated between nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveInterpolation {
    /// Linear on the zero rate `r`.
    #[default]
    Linear,
    /// Linear on `r·t`, the ISDA standard model convention.
    ///
    /// Equivalent to piecewise constant forward (or hazard) rates.
    LinearRateTime,
}

/// What a curve answers outside `[t_first, t_last]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    /// The nearest node's zero rate.
    #[default]
    Flat,
    /// `CurveError::OutOfDomain`.
    Disallowed,
}

/// How a bucketed shift is applied to the rates of the nodes it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// `r + s`.
    #[default]
    Absolute,
    /// `r · (1 + s)`.
    Relative,
}

/// A shift applied to the nodes with `start <= t < end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketShift {
    /// Bucket start, in years.
    pub start: f64,
    /// Bucket end, in years (exclusive).
    pub end: f64,
    /// Shift size.
    pub shift: f64,
}

impl BucketShift {
    /// Creates a bucket shift.
    #[must_use]
    pub fn new(start: f64, end: f64, shift: f64) -> Self {
        Self { start, end, shift }
    }

    fn covers(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }
}

/// A curve of continuously compounded zero rates at strictly increasing node times.
///
/// Serves as a discount curve (`discount_factor`) or, read as a hazard
/// curve, as a survival curve (`survival_probability`). Updates are
/// persistent: `with_node_rate` returns a new curve that shares the node
/// times with `self` and copies the rates.
///
/// # Example
///
/// ```rust
/// use strata_curves::curves::InterpolatedCurve;
///
/// let curve = InterpolatedCurve::new("USD-DSC", vec![1.0, 2.0], vec![0.03, 0.04]).unwrap();
/// assert!((curve.zero_rate(1.5).unwrap() - 0.035).abs() < 1e-15);
/// assert!((curve.discount_factor(2.0).unwrap() - (-0.08f64).exp()).abs() < 1e-15);
///
/// let bumped = curve.with_node_rate(1, 0.05).unwrap();
/// assert_eq!(bumped.rates(), &[0.03, 0.05]);
/// assert_eq!(curve.rates(), &[0.03, 0.04]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedCurve {
    name: String,
    times: Arc<Vec<f64>>,
    rates: Vec<f64>,
    interpolation: CurveInterpolation,
    extrapolation: Extrapolation,
}

impl InterpolatedCurve {
    /// Creates a curve with linear interpolation and flat extrapolation.
    ///
    /// # Errors
    ///
    /// - `InsufficientPoints` without any node
    /// - `InvalidArgument` on a length mismatch, a non-finite rate or a
    ///   first time that is not positive
    /// - `NonMonotonicTimes` when times are not strictly increasing
    pub fn new(name: impl Into<String>, times: Vec<f64>, rates: Vec<f64>) -> CurveResult<Self> {
        validate_nodes(&times, &rates)?;
        Ok(Self {
            name: name.into(),
            times: Arc::new(times),
            rates,
            interpolation: CurveInterpolation::default(),
            extrapolation: Extrapolation::default(),
        })
    }

    /// Creates a curve holding the same rate at every node.
    pub fn flat(name: impl Into<String>, times: Vec<f64>, rate: f64) -> CurveResult<Self> {
        let rates = vec![rate; times.len()];
        Self::new(name, times, rates)
    }

    /// Sets the interpolation method.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: CurveInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Sets the extrapolation policy.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Curve name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node times.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Node zero rates.
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: a curve holds at least one node.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Interpolation method.
    pub fn interpolation(&self) -> CurveInterpolation {
        self.interpolation
    }

    /// Extrapolation policy.
    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// First and last node times.
    pub fn domain(&self) -> (f64, f64) {
        (self.times[0], self.times[self.times.len() - 1])
    }

    /// True when `other` uses the same node time storage.
    pub fn shares_times_with(&self, other: &InterpolatedCurve) -> bool {
        Arc::ptr_eq(&self.times, &other.times)
    }

    /// The curve restricted to its first `count` nodes.
    pub fn truncated(&self, count: usize) -> CurveResult<Self> {
        if count == 0 || count > self.len() {
            return Err(CurveError::invalid_argument(format!(
                "cannot keep {count} of {} nodes",
                self.len()
            )));
        }
        if count == self.len() {
            return Ok(self.clone());
        }
        Ok(Self {
            name: self.name.clone(),
            times: Arc::new(self.times[..count].to_vec()),
            rates: self.rates[..count].to_vec(),
            interpolation: self.interpolation,
            extrapolation: self.extrapolation,
        })
    }

    /// Continuously compounded zero rate at `t`.
    ///
    /// # Errors
    ///
    /// `OutOfDomain` outside the node range when extrapolation is disallowed;
    /// `InvalidArgument` for a non-finite `t`.
    pub fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        if !t.is_finite() {
            return Err(CurveError::invalid_argument(format!("time must be finite, got {t}")));
        }
        let (min, max) = self.domain();
        if t < min || t > max {
            return match self.extrapolation {
                Extrapolation::Flat if t < min => Ok(self.rates[0]),
                Extrapolation::Flat => Ok(self.rates[self.rates.len() - 1]),
                Extrapolation::Disallowed => Err(CurveError::out_of_domain(t, min, max)),
            };
        }
        if self.len() == 1 {
            return Ok(self.rates[0]);
        }

        let i = find_segment(&self.times, t);
        let (t0, t1) = (self.times[i], self.times[i + 1]);
        let (r0, r1) = (self.rates[i], self.rates[i + 1]);
        let w = (t - t0) / (t1 - t0);
        Ok(match self.interpolation {
            CurveInterpolation::Linear => r0 + w * (r1 - r0),
            CurveInterpolation::LinearRateTime => {
                let rt = r0 * t0 + w * (r1 * t1 - r0 * t0);
                rt / t
            }
        })
    }

    /// Discount factor `exp(-r(t)·t)`; 1 at `t = 0`.
    pub fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        if t == 0.0 {
            return Ok(1.0);
        }
        Ok((-self.zero_rate(t)? * t).exp())
    }

    /// Survival probability `exp(-h(t)·t)` when the curve holds hazard rates.
    pub fn survival_probability(&self, t: f64) -> CurveResult<f64> {
        self.discount_factor(t)
    }

    /// Continuously compounded forward rate between `t1` and `t2`.
    pub fn forward_rate(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if t2 <= t1 {
            return Err(CurveError::invalid_argument(format!(
                "forward period end {t2} must be after its start {t1}"
            )));
        }
        let rt1 = if t1 == 0.0 { 0.0 } else { self.zero_rate(t1)? * t1 };
        let rt2 = self.zero_rate(t2)? * t2;
        Ok((rt2 - rt1) / (t2 - t1))
    }

    /// The same curve with node `index` set to `rate`.
    pub fn with_node_rate(&self, index: usize, rate: f64) -> CurveResult<Self> {
        if index >= self.len() {
            return Err(CurveError::invalid_argument(format!(
                "node index {index} out of range for {} nodes",
                self.len()
            )));
        }
        if !rate.is_finite() {
            return Err(CurveError::invalid_argument(format!("node rate must be finite, got {rate}")));
        }
        let mut rates = self.rates.clone();
        rates[index] = rate;
        Ok(self.rebuilt(rates))
    }

    /// The same node times with new rates.
    pub fn with_rates(&self, rates: Vec<f64>) -> CurveResult<Self> {
        validate_nodes(&self.times, &rates)?;
        Ok(self.rebuilt(rates))
    }

    /// Every node rate moved by `shift`.
    pub fn with_parallel_shift(&self, shift: f64) -> CurveResult<Self> {
        self.with_rates(self.rates.iter().map(|r| r + shift).collect())
    }

    /// Applies each bucket's shift to the nodes it covers.
    ///
    /// Buckets may overlap; a node covered twice receives both shifts.
    pub fn with_bucketed_shifts(&self, buckets: &[BucketShift], shift_type: ShiftType) -> CurveResult<Self> {
        if let Some(bucket) = buckets.iter().find(|b| b.start.partial_cmp(&b.end) != Some(Ordering::Less)) {
            return Err(CurveError::invalid_argument(format!(
                "bucket start {} must be before its end {}",
                bucket.start, bucket.end
            )));
        }
        let rates = self
            .times
            .iter()
            .zip(&self.rates)
            .map(|(&t, &r)| {
                buckets.iter().filter(|b| b.covers(t)).fold(r, |acc, b| match shift_type {
                    ShiftType::Absolute => acc + b.shift,
                    ShiftType::Relative => acc * (1.0 + b.shift),
                })
            })
            .collect();
        self.with_rates(rates)
    }

    fn rebuilt(&self, rates: Vec<f64>) -> Self {
        Self {
            name: self.name.clone(),
            times: Arc::clone(&self.times),
            rates,
            interpolation: self.interpolation,
            extrapolation: self.extrapolation,
        }
    }
}

fn validate_nodes(times: &[f64], rates: &[f64]) -> CurveResult<()> {
    if times.is_empty() {
        return Err(CurveError::InsufficientPoints { required: 1, got: 0 });
    }
    if times.len() != rates.len() {
        return Err(CurveError::invalid_argument(format!(
            "{} times but {} rates",
            times.len(),
            rates.len()
        )));
    }
    if times.iter().any(|t| !t.is_finite()) {
        return Err(CurveError::invalid_argument("node times must be finite"));
    }
    if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
        return Err(CurveError::NonMonotonicTimes {
            index: index + 1,
            prev: times[index],
            current: times[index + 1],
        });
    }
    if times[0] <= 0.0 {
        return Err(CurveError::invalid_argument(format!(
            "first node time must be positive, got {}",
            times[0]
        )));
    }
    if let Some(rate) = rates.iter().find(|r| !r.is_finite()) {
        return Err(CurveError::invalid_argument(format!("node rates must be finite, got {rate}")));
    }
    Ok(())
}
