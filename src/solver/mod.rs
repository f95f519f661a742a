//! Implicit single-unknown solver.
//!
//! This module provides the numerical engine of the crate.
//!
//! ## Method
//!
//! Given a formula `f`, a parameter mapping `P` and a target output `t`, the
//! solver first scans the formula's required parameters:
//!
//! - no unknown: evaluate `f(P)` directly
//! - exactly one unknown `x`: find the root of the residual
//!   `r(x) = f(P with x substituted) - t` by Newton-Raphson iteration
//!
//!   ```text
//!   x_{n+1} = x_n - r(x_n) / r'(x_n)
//!   ```
//!
//!   where `r'` is exact, computed by one dual-number evaluation per step.
//!   The first iterate sits one above the seed, so the residual is never
//!   evaluated at the raw seed, which for unknowns appearing in a
//!   denominator is often a pole
//! - two or more unknowns: rejected, the solver must not guess which one to
//!   solve for
//!
//! Either path rounds its result to [`RESULT_DECIMALS`] decimal places.

mod newton;

pub use newton::NewtonRaphson;

use crate::error::{FlightMechError, Result};
use crate::formula::{Bindings, Formula};
use crate::params::{ParamMap, Value};

/// Convergence tolerance for Newton-Raphson iteration.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// Maximum Newton-Raphson iterations per solve.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Seed of the iteration; the first iterate sits one above it.
pub const DEFAULT_INITIAL_GUESS: f64 = 0.0;

/// Decimal places of the returned result.
pub const RESULT_DECIMALS: i32 = 3;

/// Outcome of scanning a formula's required parameters for unknowns.
#[derive(Debug, Clone, PartialEq)]
pub enum UnknownScan {
    /// Every required parameter is bound
    None,
    /// Exactly one required parameter is unknown: the solve variable
    One(&'static str),
    /// Two or more required parameters are unknown
    Multiple(Vec<&'static str>),
}

/// Scan the formula's required parameters against the mapping.
///
/// Pure and O(k) in the number of required parameters. A required name
/// absent from the mapping is a
/// [`MissingParameter`](FlightMechError::MissingParameter) error; entries in
/// the mapping that the formula does not read are ignored.
pub fn scan_unknowns<F: Formula + ?Sized>(
    formula: &F,
    params: &ParamMap,
) -> Result<UnknownScan> {
    let mut unknowns: Vec<&'static str> = Vec::new();
    for &name in formula.parameters() {
        match params.get(name) {
            Some(Value::Bound(_)) => {}
            Some(Value::Unknown) => unknowns.push(name),
            None => return Err(FlightMechError::missing_parameter(formula.name(), name)),
        }
    }
    Ok(match unknowns.len() {
        0 => UnknownScan::None,
        1 => UnknownScan::One(unknowns[0]),
        _ => UnknownScan::Multiple(unknowns),
    })
}

/// Evaluate a formula, or solve for its single unknown parameter.
///
/// - With every required parameter bound, returns `f(P)` directly; `target`
///   is ignored.
/// - With exactly one parameter marked [`Value::Unknown`], finds the value
///   that makes the formula produce `target` (which is then required).
/// - With two or more unknowns, fails with
///   [`AmbiguousUnknown`](FlightMechError::AmbiguousUnknown).
///
/// The result is rounded to [`RESULT_DECIMALS`] decimal places. The caller's
/// mapping is never mutated. Solving uses the default seed and iteration cap;
/// use [`NewtonRaphson`] directly to override them.
pub fn solve<F: Formula + ?Sized>(
    formula: &F,
    target: Option<f64>,
    params: &ParamMap,
) -> Result<f64> {
    match scan_unknowns(formula, params)? {
        UnknownScan::None => evaluate_direct(formula, params),
        UnknownScan::One(variable) => {
            let target = target
                .ok_or_else(|| FlightMechError::missing_target(formula.name(), variable))?;
            NewtonRaphson::new().solve_for(formula, target, params, variable)
        }
        UnknownScan::Multiple(names) => {
            Err(FlightMechError::ambiguous_unknown(formula.name(), &names))
        }
    }
}

/// Direct evaluation: every required parameter already bound.
fn evaluate_direct<F: Formula + ?Sized>(formula: &F, params: &ParamMap) -> Result<f64> {
    let bindings = Bindings::<f64>::from_params(formula, params)?;
    let value = formula.eval(&bindings)?;
    if !value.is_finite() {
        return Err(FlightMechError::invalid_result(formula.name(), value));
    }
    Ok(round_to(value, RESULT_DECIMALS))
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    // Normalize negative zero so formatted results never read "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{
        AirDensity, Atmosphere, StallSpeed, StaticPressure, StaticTemperature, ThrustVariation,
    };
    use crate::math::Scalar;
    use approx::assert_relative_eq;

    #[test]
    fn test_scan_no_unknowns() {
        let f = StaticPressure::new(Atmosphere::default());
        let params = ParamMap::new().bind("H", 0.0);
        assert_eq!(scan_unknowns(&f, &params).unwrap(), UnknownScan::None);
    }

    #[test]
    fn test_scan_one_unknown() {
        let f = StaticPressure::new(Atmosphere::default());
        let params = ParamMap::new().mark_unknown("H");
        assert_eq!(scan_unknowns(&f, &params).unwrap(), UnknownScan::One("H"));
    }

    #[test]
    fn test_scan_multiple_unknowns() {
        let f = ThrustVariation::new(Atmosphere::default());
        let params = ParamMap::new()
            .mark_unknown("M0")
            .mark_unknown("Ps")
            .bind("F0", 1.0e6);
        match scan_unknowns(&f, &params).unwrap() {
            UnknownScan::Multiple(names) => assert_eq!(names, vec!["M0", "Ps"]),
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_ignores_extra_entries() {
        let f = StaticPressure::new(Atmosphere::default());
        let params = ParamMap::new().bind("H", 0.0).mark_unknown("unused");
        assert_eq!(scan_unknowns(&f, &params).unwrap(), UnknownScan::None);
    }

    #[test]
    fn test_direct_evaluation_temperature_at_sea_level() {
        // Ts(0) = 288.15, no iteration involved
        let f = StaticTemperature::new(Atmosphere::default());
        let params = ParamMap::new().bind("H", 0.0);
        assert_relative_eq!(solve(&f, None, &params).unwrap(), 288.15, epsilon = 1e-12);
    }

    #[test]
    fn test_direct_evaluation_rounds_to_three_decimals() {
        let f = StaticPressure::new(Atmosphere::default());
        let params = ParamMap::new().bind("H", 1234.5);
        let bindings = Bindings::<f64>::from_params(&f, &params).unwrap();
        let raw: f64 = f.eval(&bindings).unwrap();
        assert_relative_eq!(
            solve(&f, None, &params).unwrap(),
            round_to(raw, 3),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_solve_pressure_altitude_sea_level_identity() {
        // Ps = 101325 must put the aircraft at H = 0
        let f = StaticPressure::new(Atmosphere::default());
        let params = ParamMap::new().mark_unknown("H");
        assert_relative_eq!(
            solve(&f, Some(101_325.0), &params).unwrap(),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_solve_requires_target_with_unknown() {
        let f = StaticPressure::new(Atmosphere::default());
        let params = ParamMap::new().mark_unknown("H");
        let err = solve(&f, None, &params).unwrap_err();
        assert!(matches!(err, FlightMechError::MissingTarget { .. }));
    }

    #[test]
    fn test_solve_rejects_two_unknowns() {
        let f = ThrustVariation::new(Atmosphere::default());
        let params = ParamMap::new()
            .mark_unknown("M0")
            .mark_unknown("Ps")
            .bind("F0", 1.0e6);
        let err = solve(&f, Some(5.0e5), &params).unwrap_err();
        assert!(matches!(
            err,
            FlightMechError::AmbiguousUnknown { ref parameters, .. } if parameters == "M0, Ps"
        ));
    }

    #[test]
    fn test_solve_rejects_missing_parameter() {
        let f = StallSpeed::new(Atmosphere::default());
        let params = ParamMap::new().bind("m", 299_640.0).bind("rho", 1.225);
        // S and Cz_max absent entirely
        let err = solve(&f, None, &params).unwrap_err();
        assert!(matches!(
            err,
            FlightMechError::MissingParameter { ref parameter, .. } if parameter == "S"
        ));
    }

    #[test]
    fn test_direct_evaluation_flags_non_finite_result() {
        // Negative value under the root: rho < 0 makes V_stall NaN
        let f = StallSpeed::new(Atmosphere::default());
        let params = ParamMap::new()
            .bind("m", 299_640.0)
            .bind("rho", -1.225)
            .bind("S", 427.8)
            .bind("Cz_max", 2.0);
        let err = solve(&f, None, &params).unwrap_err();
        assert!(matches!(err, FlightMechError::InvalidFormulaResult { .. }));
    }

    #[test]
    fn test_round_to() {
        assert_relative_eq!(round_to(1.234_567, 3), 1.235, epsilon = 1e-12);
        assert_relative_eq!(round_to(-1.234_4, 3), -1.234, epsilon = 1e-12);
        assert_relative_eq!(round_to(2.5, 0), 3.0, epsilon = 1e-12);
        // Negative zero is normalized, it formats as "0" not "-0"
        assert_eq!(round_to(-1e-12, 3).to_string(), "0");
    }

    /// Round-trip: replace one bound input with Unknown, solve against the
    /// formula's own output, recover the input.
    #[test]
    fn test_round_trip_altitude_through_pressure() {
        let f = StaticPressure::new(Atmosphere::default());
        let h = 7_500.0;
        let bound = ParamMap::new().bind("H", h);
        let bindings = Bindings::<f64>::from_params(&f, &bound).unwrap();
        let target: f64 = f.eval(&bindings).unwrap();

        let params = ParamMap::new().mark_unknown("H");
        let solved = solve(&f, Some(target), &params).unwrap();
        assert_relative_eq!(solved, h, epsilon = 1e-3);
    }

    #[test]
    fn test_round_trip_mach_through_thrust() {
        let f = ThrustVariation::new(Atmosphere::default());
        let bound = ParamMap::new()
            .bind("M0", 0.84)
            .bind("Ps", 22_632.0)
            .bind("F0", 872_932.0);
        let bindings = Bindings::<f64>::from_params(&f, &bound).unwrap();
        let target: f64 = f.eval(&bindings).unwrap();

        let params = ParamMap::new()
            .mark_unknown("M0")
            .bind("Ps", 22_632.0)
            .bind("F0", 872_932.0);
        let solved = solve(&f, Some(target), &params).unwrap();
        assert_relative_eq!(solved, 0.84, epsilon = 1e-3);
    }

    /// Lift-coefficient recovery must work through the public entry point:
    /// Cz_max sits under a root in a denominator, so the iteration must not
    /// evaluate the residual at the raw seed of 0.
    #[test]
    fn test_solve_recovers_lift_coefficient_from_stall_speed() {
        let f = StallSpeed::new(Atmosphere::default());
        let bound = ParamMap::new()
            .bind("m", 299_640.0)
            .bind("rho", 1.225)
            .bind("S", 427.8)
            .bind("Cz_max", 2.0);
        let bindings = Bindings::<f64>::from_params(&f, &bound).unwrap();
        let target: f64 = f.eval(&bindings).unwrap();

        let params = ParamMap::new()
            .bind("m", 299_640.0)
            .bind("rho", 1.225)
            .bind("S", 427.8)
            .mark_unknown("Cz_max");
        let solved = solve(&f, Some(target), &params).unwrap();
        assert_relative_eq!(solved, 2.0, epsilon = 1e-3);

        // Substituting back reproduces the target stall speed
        let check = bound.bind("Cz_max", solved);
        let bindings = Bindings::<f64>::from_params(&f, &check).unwrap();
        let back: f64 = f.eval(&bindings).unwrap();
        assert_relative_eq!(back, target, epsilon = 1e-3);
    }

    #[test]
    fn test_solve_denominator_unknown_in_air_density() {
        // rho = Ps / (R * Ts) with Ts unknown: another denominator case
        let f = AirDensity::new(Atmosphere::default());
        let params = ParamMap::new().bind("Ps", 101_325.0).mark_unknown("Ts");
        let solved = solve(&f, Some(1.225), &params).unwrap();
        assert_relative_eq!(solved, 101_325.0 / (287.05 * 1.225), epsilon = 1e-2);
    }

    #[test]
    fn test_solver_does_not_mutate_caller_map() {
        let f = StaticPressure::new(Atmosphere::default());
        let params = ParamMap::new().mark_unknown("H");
        let before = params.clone();
        let _ = solve(&f, Some(50_000.0), &params).unwrap();
        assert_eq!(params, before);
    }

    /// A formula whose derivative is identically zero must fail cleanly.
    #[test]
    fn test_constant_formula_does_not_converge() {
        struct Constant;

        impl Formula for Constant {
            fn name(&self) -> &'static str {
                "const"
            }

            fn parameters(&self) -> &'static [&'static str] {
                &["x"]
            }

            fn eval<T: Scalar>(&self, _args: &Bindings<T>) -> Result<T> {
                Ok(T::from_f64(42.0))
            }
        }

        let params = ParamMap::new().mark_unknown("x");
        let err = solve(&Constant, Some(7.0), &params).unwrap_err();
        assert!(matches!(err, FlightMechError::NonConvergence { .. }));
    }
}
