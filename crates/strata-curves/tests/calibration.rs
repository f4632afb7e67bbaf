//! Integration test: bootstrap a discount curve from a deposit and coupon strip.
//!
//! Quotes are generated from a known curve, so a successful calibration
//! must recover that curve's nodes and reprice every quote.

use approx::assert_relative_eq;
use strata_core::calendars::{BusinessDayConvention, WeekendCalendar};
use strata_core::daycounts::DayCountConvention;
use strata_core::types::{Currency, Date};
use strata_curves::calibration::CalibrationJob;
use strata_curves::prelude::*;
use strata_instruments::definitions::CashDefinition;
use strata_instruments::derivatives::{Cash, CompoundingSchedule, CouponFixed, CouponIborAverageCompounding};
use strata_instruments::{IborIndex, PeriodGrid};

const CURVE: &str = "USD-DSC";

fn valuation() -> Date {
    Date::from_ymd(2025, 3, 3).unwrap()
}

fn market_curve(times: Vec<f64>) -> InterpolatedCurve {
    let rates = times.iter().map(|t| 0.03 + 0.004 * t.sqrt()).collect();
    InterpolatedCurve::new(CURVE, times, rates).unwrap()
}

/// Deposits for each tenor, as seen from the valuation date.
fn deposits(tenors_months: &[u32]) -> Vec<Cash> {
    tenors_months
        .iter()
        .map(|months| {
            CashDefinition::from_tenor(
                Currency::USD,
                valuation(),
                *months,
                &WeekendCalendar,
                BusinessDayConvention::Following,
                DayCountConvention::Act360,
                1.0,
                0.0,
            )
            .unwrap()
            .to_cash(valuation(), &[CURVE])
            .unwrap()
        })
        .collect()
}

/// The rate at which `cash` has zero value on `curve`.
fn par_rate(cash: &Cash, curve: &InterpolatedCurve) -> f64 {
    let start = curve.discount_factor(cash.trade_time()).unwrap();
    let end = curve.discount_factor(cash.maturity()).unwrap();
    (start / end - 1.0) / cash.year_fraction()
}

#[test]
fn test_calibration_recovers_generating_curve() {
    let cash = deposits(&[1, 3, 6, 12, 24]);
    let market = market_curve(cash.iter().map(Cash::maturity).collect());
    let instruments: Vec<_> = cash
        .iter()
        .map(|c| CalibrationInstrument::deposit(c, par_rate(c, &market)).unwrap())
        .collect();

    let result = CurveCalibrator::default()
        .calibrate(CURVE, &instruments, &CurveBundle::new())
        .unwrap();

    assert!(result.is_valid());
    assert_eq!(result.curve.times(), market.times());
    // a residual of 1e-10 moves the shortest node by about 1e-9
    for (solved, expected) in result.curve.rates().iter().zip(market.rates()) {
        assert_relative_eq!(*solved, *expected, epsilon = 1e-8);
    }
    for check in result.repricing_report.checks() {
        assert!(check.error < 1e-10, "{check}");
    }
}

#[test]
fn test_mixed_strip_of_deposits_and_coupons() {
    let cash = deposits(&[3, 6]);
    let mut times: Vec<f64> = cash.iter().map(Cash::maturity).collect();
    times.extend([2.0, 3.0, 5.0]);
    let market = market_curve(times);

    let mut instruments: Vec<_> = cash
        .iter()
        .map(|c| CalibrationInstrument::deposit(c, par_rate(c, &market)).unwrap())
        .collect();
    for t in [2.0, 3.0, 5.0] {
        let coupon = CouponFixed::new(Currency::USD, t, 1.0, 100.0, 0.04, CURVE).unwrap();
        let quote = coupon.amount() * market.discount_factor(t).unwrap();
        instruments.push(CalibrationInstrument::present_value(coupon, quote));
    }

    let result = CurveCalibrator::default()
        .calibrate(CURVE, &instruments, &CurveBundle::new())
        .unwrap();

    for (solved, expected) in result.curve.rates().iter().zip(market.rates()) {
        assert_relative_eq!(*solved, *expected, epsilon = 1e-9);
    }
    assert_eq!(result.pillars.len(), 5);
    assert!(result.pillars.iter().all(|p| p.iterations <= 100));
}

#[test]
fn test_unreachable_quote_fails_at_its_pillar() {
    let mut instruments: Vec<_> = [1.0, 2.0, 3.0, 4.0]
        .iter()
        .map(|t| {
            let coupon = CouponFixed::new(Currency::USD, *t, 1.0, 100.0, 0.05, CURVE).unwrap();
            let quote = coupon.amount() * (-0.03 * t).exp();
            CalibrationInstrument::present_value(coupon, quote)
        })
        .collect();
    // a coupon's value is always positive
    let coupon = CouponFixed::new(Currency::USD, 3.0, 1.0, 100.0, 0.05, CURVE).unwrap();
    instruments[2] = CalibrationInstrument::present_value(coupon, -2.0);

    let err = CurveCalibrator::default()
        .calibrate(CURVE, &instruments, &CurveBundle::new())
        .unwrap_err();

    assert_eq!(err.failed_pillar(), Some(2));
    assert!(matches!(err, CurveError::CalibrationFailure { pillar: 2, quote, .. } if quote == -2.0));
}

/// An averaging coupon paying at 1y whose last fixing period runs to 1.25y.
fn averaging_coupon(quote_curve: &InterpolatedCurve) -> CalibrationInstrument {
    let grid = |v: Vec<f64>| PeriodGrid::new(v, vec![]).unwrap();
    let schedule = CompoundingSchedule {
        fixing_time: grid(vec![0.75, 1.0]),
        weight: grid(vec![0.5, 0.5]),
        fixing_period_start_time: grid(vec![0.75, 1.0]),
        fixing_period_end_time: grid(vec![1.0, 1.25]),
        fixing_period_accrual_factor: grid(vec![0.25, 0.25]),
    };
    let coupon = CouponIborAverageCompounding::new(
        Currency::USD,
        1.0,
        0.25,
        1.0,
        vec![0.25],
        IborIndex::new("USD-LIBOR-3M", Currency::USD, 3, 2),
        schedule,
        1.0,
        0.0,
        CURVE,
        CURVE,
    )
    .unwrap();
    let quote = strata_curves::pricing::present_value(
        &coupon.clone().into(),
        &CurveBundle::new().with_curve(quote_curve.clone()),
    )
    .unwrap();
    CalibrationInstrument::present_value(coupon, quote)
}

#[test]
fn test_strict_calibration_rejects_curve_that_misses_a_quote() {
    // the coupon projects past its own pillar, so the next node moves its value
    let flat = InterpolatedCurve::flat(CURVE, vec![1.0], 0.03).unwrap();
    let deposit = Cash::unit(Currency::USD, 2.0, 0.0, CURVE).unwrap();
    let instruments = vec![
        averaging_coupon(&flat),
        CalibrationInstrument::deposit(&deposit, 0.10).unwrap(),
    ];
    let calibrator = CurveCalibrator::default();

    let result = calibrator.calibrate(CURVE, &instruments, &CurveBundle::new()).unwrap();
    assert_relative_eq!(result.curve.rates()[0], 0.03, epsilon = 1e-8);
    assert!(!result.is_valid());
    assert_eq!(result.repricing_report.failed_checks().len(), 1);
    assert!(result.pillars[0].residual.abs() < 1e-10);

    let err = calibrator
        .calibrate_strict(CURVE, &instruments, &CurveBundle::new())
        .unwrap_err();
    assert_eq!(err.failed_pillar(), Some(0));
}

#[test]
fn test_deposit_on_another_curve_is_rejected() {
    let cash = Cash::unit(Currency::USD, 1.0, 0.0, "USD-OIS").unwrap();
    let instruments = vec![CalibrationInstrument::deposit(&cash, 0.04).unwrap()];
    let err = CurveCalibrator::default()
        .calibrate(CURVE, &instruments, &CurveBundle::new())
        .unwrap_err();
    assert!(matches!(err, CurveError::InvalidArgument { .. }));
}

#[test]
fn test_independent_calibrations_run_in_parallel() {
    let good: Vec<_> = [0.5, 1.0, 2.0]
        .iter()
        .map(|t| {
            let cash = Cash::unit(Currency::EUR, *t, 0.0, "EUR-DSC").unwrap();
            CalibrationInstrument::deposit(&cash, 0.025).unwrap()
        })
        .collect();
    let bad = vec![CalibrationInstrument::present_value(
        CouponFixed::new(Currency::GBP, 1.0, 1.0, 1.0, 0.05, "GBP-DSC").unwrap(),
        -1.0,
    )];

    let jobs = vec![
        CalibrationJob::new("EUR-DSC", good),
        CalibrationJob::new("GBP-DSC", bad),
        CalibrationJob::new("USD-DSC", Vec::new()),
    ];
    let results = CurveCalibrator::default().calibrate_all(&jobs, &CurveBundle::new());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().curve.name(), "EUR-DSC");
    assert_eq!(results[1].as_ref().unwrap_err().failed_pillar(), Some(0));
    assert!(matches!(results[2], Err(CurveError::InsufficientPoints { .. })));
}

#[test]
fn test_curve_calibrated_on_top_of_a_base_bundle() {
    // the forward-starting coupon is discounted on the calibrated curve;
    // an unrelated curve in the base bundle is left untouched
    let base = CurveBundle::new().with_curve(InterpolatedCurve::flat("USD-OIS", vec![1.0], 0.02).unwrap());
    let market = market_curve(vec![1.0, 2.0]);
    let instruments: Vec<_> = [1.0, 2.0]
        .iter()
        .map(|t| {
            let coupon = CouponFixed::new(Currency::USD, *t, 0.5, 1.0, 0.03, CURVE).unwrap();
            let quote = coupon.amount() * market.discount_factor(*t).unwrap();
            CalibrationInstrument::present_value(coupon, quote)
        })
        .collect();

    let result = CurveCalibrator::default().calibrate(CURVE, &instruments, &base).unwrap();
    let curves = base.with_curve(result.curve);

    assert_eq!(curves.len(), 2);
    assert_eq!(curves.curve("USD-OIS").unwrap().rates(), &[0.02]);
    assert_relative_eq!(curves.curve(CURVE).unwrap().rates()[1], market.rates()[1], epsilon = 1e-9);
}
