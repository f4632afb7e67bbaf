//! Property tests for interpolated curves and their calibration.

use approx::assert_relative_eq;
use proptest::prelude::*;
use strata_core::types::Currency;
use strata_curves::prelude::*;
use strata_instruments::derivatives::Cash;

/// One to seven strictly increasing node times, each step at least 0.05.
fn node_times() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.05f64..3.0, 1..8).prop_map(|steps| {
        steps
            .iter()
            .scan(0.0, |t, step| {
                *t += step;
                Some(*t)
            })
            .collect()
    })
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("strata_curves=debug")
        .with_test_writer()
        .try_init();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn flat_curve_returns_its_rate(times in node_times(), rate in -0.01f64..0.1, u in 0.0f64..1.0) {
        let (first, last) = (times[0], times[times.len() - 1]);
        let t = first + u * (last - first);

        let linear = InterpolatedCurve::flat("FLAT", times.clone(), rate).unwrap();
        prop_assert_eq!(linear.zero_rate(t).unwrap(), rate);

        let rate_time = linear.clone().with_interpolation(CurveInterpolation::LinearRateTime);
        let r = rate_time.zero_rate(t).unwrap();
        prop_assert!((r - rate).abs() <= 1e-12 * (1.0 + rate.abs()));
    }

    #[test]
    fn with_node_rate_leaves_receiver_unchanged(times in node_times(), rate in 0.0f64..0.1, bump in 0.0001f64..0.01) {
        let curve = InterpolatedCurve::flat("DSC", times.clone(), rate).unwrap();
        let before = curve.clone();
        let index = times.len() - 1;

        let bumped = curve.with_node_rate(index, rate + bump).unwrap();

        prop_assert_eq!(&curve, &before);
        prop_assert_eq!(bumped.rates()[index], rate + bump);
        prop_assert!(bumped.shares_times_with(&curve));
    }

    #[test]
    fn deposits_on_a_flat_curve_calibrate_flat(times in node_times(), rate in 0.0f64..0.08) {
        let instruments: Vec<_> = times
            .iter()
            .map(|t| {
                let cash = Cash::unit(Currency::USD, *t, 0.0, "DSC").unwrap();
                let quote = (rate * t).exp_m1() / t;
                CalibrationInstrument::deposit(&cash, quote).unwrap()
            })
            .collect();

        let result = CurveCalibrator::default()
            .calibrate("DSC", &instruments, &CurveBundle::new())
            .unwrap();

        prop_assert!(result.is_valid());
        for node in result.curve.rates() {
            prop_assert!((node - rate).abs() < 1e-8);
        }
    }

    #[test]
    fn discount_factors_decrease_for_positive_rates(times in node_times(), rate in 0.001f64..0.1) {
        let curve = InterpolatedCurve::flat("DSC", times.clone(), rate).unwrap();
        let mut previous = 1.0;
        for t in times {
            let df = curve.discount_factor(t).unwrap();
            prop_assert!(df < previous);
            previous = df;
        }
    }
}

#[test]
fn test_calibration_logs_each_pillar() {
    init_logging();
    let instruments: Vec<_> = [0.5, 1.0]
        .iter()
        .map(|t| {
            let cash = Cash::unit(Currency::USD, *t, 0.0, "DSC").unwrap();
            CalibrationInstrument::deposit(&cash, 0.03).unwrap()
        })
        .collect();
    let result = CurveCalibrator::default()
        .calibrate("DSC", &instruments, &CurveBundle::new())
        .unwrap();
    assert_eq!(result.pillars.len(), 2);
    assert_relative_eq!(result.curve.rates()[0], 0.015f64.ln_1p() / 0.5, epsilon = 1e-9);
}

#[test]
fn test_out_of_domain_without_extrapolation() {
    let curve = InterpolatedCurve::new("DSC", vec![1.0, 2.0], vec![0.02, 0.03])
        .unwrap()
        .with_extrapolation(Extrapolation::Disallowed);
    assert!(matches!(curve.zero_rate(2.5), Err(CurveError::OutOfDomain { .. })));
    assert!(matches!(curve.zero_rate(0.5), Err(CurveError::OutOfDomain { .. })));

    let flat = curve.with_extrapolation(Extrapolation::Flat);
    assert_eq!(flat.zero_rate(2.5).unwrap(), 0.03);
    assert_eq!(flat.zero_rate(0.5).unwrap(), 0.02);
}
