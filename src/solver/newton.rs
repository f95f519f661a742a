//! Newton-Raphson iteration for the single solve variable.

use crate::error::{FlightMechError, Result};
use crate::formula::{Bindings, Formula};
use crate::params::ParamMap;

use super::{
    round_to, CONVERGENCE_TOLERANCE, DEFAULT_INITIAL_GUESS, DEFAULT_MAX_ITERATIONS,
    RESULT_DECIMALS,
};

/// Newton-Raphson solver for one unknown formula parameter.
///
/// Each iteration evaluates the formula once with the solve variable as a
/// dual-number differentiation variable, giving the residual and its exact
/// derivative in a single pass.
#[derive(Debug, Clone)]
pub struct NewtonRaphson {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Convergence tolerance on the estimate update
    pub tolerance: f64,
    /// Initial estimate of the unknown
    pub initial_guess: f64,
}

impl Default for NewtonRaphson {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: CONVERGENCE_TOLERANCE,
            initial_guess: DEFAULT_INITIAL_GUESS,
        }
    }
}

impl NewtonRaphson {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the seed of the iteration.
    ///
    /// The first iterate sits one above the seed, so the default of 0.0
    /// already clears poles at the origin; override the seed to steer the
    /// iteration towards a different root or basin.
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Solve `f(P with variable = x) = target` for `x`.
    ///
    /// The caller guarantees (normally via
    /// [`scan_unknowns`](super::scan_unknowns)) that `variable` is the single
    /// unknown among the formula's required parameters. Returns the converged
    /// value rounded to [`RESULT_DECIMALS`] decimal places.
    pub fn solve_for<F: Formula + ?Sized>(
        &self,
        formula: &F,
        target: f64,
        params: &ParamMap,
        variable: &str,
    ) -> Result<f64> {
        // Bootstrap one above the seed: the residual is never evaluated at
        // the raw seed itself, which for unknowns appearing in a denominator
        // (Cz_max in the stall speed, Ts in the air density) is a pole
        let mut previous = self.initial_guess;
        let mut estimate = self.initial_guess + 1.0;
        let mut iteration = 0;

        while (estimate - previous).abs() >= self.tolerance {
            if iteration == self.max_iterations {
                return Err(FlightMechError::non_convergence(iteration, estimate));
            }

            let bindings = Bindings::with_variable(formula, params, variable, estimate)?;
            let output = formula.eval(&bindings)?;

            if !output.val.is_finite() {
                return Err(FlightMechError::invalid_result(formula.name(), output.val));
            }

            let residual = output.val - target;
            let derivative = output.der;

            // A zero or non-finite derivative makes the update step
            // meaningless; surface it instead of propagating NaN
            if derivative == 0.0 || !derivative.is_finite() {
                return Err(FlightMechError::non_convergence(iteration, estimate));
            }

            let next = estimate - residual / derivative;
            if !next.is_finite() {
                return Err(FlightMechError::non_convergence(iteration, estimate));
            }

            previous = estimate;
            estimate = next;
            iteration += 1;
        }

        Ok(round_to(estimate, RESULT_DECIMALS))
    }
}
