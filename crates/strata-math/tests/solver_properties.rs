//! Property tests for the bracketing solvers.

use proptest::prelude::*;
use strata_math::interpolation::{Interpolator, LinearInterpolator};
use strata_math::solvers::{BracketingSolver, SolverConfig};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A discount-factor style equation `exp(-r t) - target` always has its
    /// root reached to within the price tolerance.
    #[test]
    fn solvers_meet_price_tolerance(
        t in 0.1f64..30.0,
        rate in -0.02f64..0.15,
        solver in prop_oneof![Just(BracketingSolver::Brent), Just(BracketingSolver::Bisection)],
    ) {
        let target = (-rate * t).exp();
        let f = |r: f64| (-r * t).exp() - target;
        let config = SolverConfig::default();
        let result = solver.solve(f, -0.5, 1.0, &config).unwrap();
        prop_assert!(f(result.root).abs() < config.tolerance);
        prop_assert!(result.iterations <= config.max_iterations);
    }

    #[test]
    fn linear_interpolation_stays_between_neighbours(x in 0.0f64..10.0) {
        let xs = vec![0.0, 1.0, 3.0, 6.0, 10.0];
        let ys = vec![0.01, 0.02, 0.015, 0.03, 0.03];
        let interp = LinearInterpolator::new(xs, ys).unwrap();
        let y = interp.interpolate(x).unwrap();
        prop_assert!((0.01..=0.03).contains(&y));
    }
}
