//! Numeric support for formula evaluation.
//!
//! Formulas are written once, generically over the [`Scalar`] trait, and
//! evaluated in two modes:
//!
//! - plain `f64` for direct evaluation
//! - [`Dual`] numbers for forward-mode automatic differentiation, which gives
//!   the solver an exact derivative of the residual in a single pass

mod dual;

pub use dual::{Dual, Scalar};
