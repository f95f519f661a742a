//! Error types for the Flightmech solver.
//!
//! This module provides a unified error type [`FlightMechError`] that covers
//! all error conditions that can occur during parameter validation, implicit
//! solving, and direct formula evaluation.

use thiserror::Error;

/// Result type alias using [`FlightMechError`].
pub type Result<T> = std::result::Result<T, FlightMechError>;

/// Unified error type for all Flightmech operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlightMechError {
    // ============ Parameter Mapping Errors ============
    /// A parameter the formula requires is absent from the mapping entirely
    #[error("Formula '{formula}' requires parameter '{parameter}' which is missing from the mapping")]
    MissingParameter { formula: String, parameter: String },

    /// More than one required parameter is marked unknown
    #[error("Formula '{formula}' has multiple unknowns ({parameters}) - exactly one parameter may be unknown")]
    AmbiguousUnknown { formula: String, parameters: String },

    /// One parameter is unknown but no target output was supplied
    #[error("Formula '{formula}' has unknown parameter '{parameter}' but no target value to solve against")]
    MissingTarget { formula: String, parameter: String },

    // ============ Solver Errors ============
    /// Newton-Raphson iteration did not converge
    #[error("Newton-Raphson did not converge after {iterations} iterations (last estimate: {last_estimate:.6})")]
    NonConvergence {
        iterations: usize,
        last_estimate: f64,
    },

    /// A formula produced a non-finite value during evaluation
    #[error("Formula '{formula}' produced a non-finite value ({value}) - likely a domain error")]
    InvalidFormulaResult { formula: String, value: f64 },

    // ============ Driver Errors ============
    /// Formula name not found in the library
    #[error("Unknown formula '{name}' - use --list to see available formulas")]
    UnknownFormula { name: String },

    /// Malformed NAME=VALUE parameter specification
    #[error("Invalid parameter spec '{spec}': {message}")]
    InvalidParameterSpec { spec: String, message: String },
}

impl FlightMechError {
    /// Create a missing-parameter error
    pub fn missing_parameter(formula: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            formula: formula.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an ambiguous-unknown error listing every unknown name
    pub fn ambiguous_unknown(formula: impl Into<String>, parameters: &[&str]) -> Self {
        Self::AmbiguousUnknown {
            formula: formula.into(),
            parameters: parameters.join(", "),
        }
    }

    /// Create a missing-target error
    pub fn missing_target(formula: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingTarget {
            formula: formula.into(),
            parameter: parameter.into(),
        }
    }

    /// Create a non-convergence error
    pub fn non_convergence(iterations: usize, last_estimate: f64) -> Self {
        Self::NonConvergence {
            iterations,
            last_estimate,
        }
    }

    /// Create an invalid-formula-result error
    pub fn invalid_result(formula: impl Into<String>, value: f64) -> Self {
        Self::InvalidFormulaResult {
            formula: formula.into(),
            value,
        }
    }

    /// Create an invalid parameter spec error
    pub fn invalid_spec(spec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameterSpec {
            spec: spec.into(),
            message: message.into(),
        }
    }
}
