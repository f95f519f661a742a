//! # Flightmech Core
//!
//! An evaluator and implicit solver for aircraft flight-mechanics formulas.
//!
//! This library provides:
//! - A library of closed-form flight-mechanics formulas (atmosphere,
//!   propulsion, take-off performance)
//! - An implicit single-unknown solver: given a formula, a target output and
//!   a parameter mapping with exactly one unknown, it finds the unknown by
//!   Newton-Raphson root finding with exact derivatives
//! - Direct evaluation when every parameter is bound
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`params`] - Parameter mappings (bound values and the unknown marker)
//! - [`formula`] - The formula contract and the built-in library
//! - [`math`] - Dual numbers for forward-mode automatic differentiation
//! - [`solver`] - Unknown detection, Newton-Raphson iteration, direct
//!   evaluation
//! - [`driver`] - Parameter-spec parsing and result formatting for frontends
//!
//! ## Usage
//!
//! ```
//! use flightmech_core::{solve, Atmosphere, ParamMap};
//! use flightmech_core::formula::StaticPressure;
//!
//! let formula = StaticPressure::new(Atmosphere::default());
//!
//! // Direct evaluation: static pressure at 11 km
//! let params = ParamMap::new().bind("H", 11_000.0);
//! let ps = solve(&formula, None, &params).unwrap();
//! assert!(ps < 30_000.0);
//!
//! // Implicit solve: which altitude has that pressure?
//! let params = ParamMap::new().mark_unknown("H");
//! let h = solve(&formula, Some(ps), &params).unwrap();
//! assert!((h - 11_000.0).abs() < 1.0);
//! ```
//!
//! ## Solving Method
//!
//! For a formula `f`, target `t` and solve variable `x`, the solver iterates
//!
//! ```text
//! x_{n+1} = x_n - r(x_n) / r'(x_n),    r(x) = f(P with x substituted) - t
//! ```
//!
//! until the update falls below 1e-6 or the iteration cap is exceeded. The
//! derivative `r'` is exact: each step evaluates the formula once with the
//! solve variable as a dual number, all other parameters held constant.

pub mod driver;
pub mod error;
pub mod formula;
pub mod math;
pub mod params;
pub mod solver;

// Re-export main types for convenience
pub use error::{FlightMechError, Result};
pub use formula::{Atmosphere, FlightFormula, Formula};
pub use params::{ParamMap, Value};
pub use solver::{solve, NewtonRaphson};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmFlightSolver;

/// Sea-level static pressure in Pa (ISA)
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;

/// Sea-level static temperature in K (ISA)
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15;

/// Gravitational acceleration in m/s^2
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Specific gas constant of air in J/(kg K)
pub const AIR_GAS_CONSTANT: f64 = 287.05;
