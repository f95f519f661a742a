//! Forward-mode automatic differentiation with dual numbers.
//!
//! A dual number carries a value and a derivative: `x = (val, der)`.
//! Arithmetic propagates both parts simultaneously, so evaluating a formula
//! with the solve variable seeded as `Dual::variable(x)` (derivative 1) and
//! every other parameter as `Dual::constant(v)` (derivative 0) yields
//!
//!   f(x).val = f(x)      and      f(x).der = df/dx
//!
//! exactly, without symbolic manipulation or finite differences. The rules
//! are the usual ones:
//!
//!   (a, a') * (b, b') = (a*b, a'*b + a*b')
//!   (a, a') / (b, b') = (a/b, (a'*b - a*b') / b^2)
//!   g((a, a'))        = (g(a), a' * g'(a))

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Closed-form expression vocabulary shared by `f64` and [`Dual`].
///
/// A formula generic over `Scalar` is restricted to the operations listed
/// here (arithmetic, powers, roots, trigonometry, exp/log), which is exactly
/// the class of expressions that forward-mode differentiation handles exactly.
pub trait Scalar:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Lift a plain constant into the scalar type (derivative 0 for duals).
    fn from_f64(v: f64) -> Self;

    /// The primal (value) part.
    fn value(self) -> f64;

    /// Raise to a constant real power.
    fn powf(self, n: f64) -> Self;

    /// Raise to a constant integer power.
    fn powi(self, n: i32) -> Self;

    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn exp(self) -> Self;
    fn ln(self) -> Self;
}

impl Scalar for f64 {
    fn from_f64(v: f64) -> Self {
        v
    }

    fn value(self) -> f64 {
        self
    }

    fn powf(self, n: f64) -> Self {
        f64::powf(self, n)
    }

    fn powi(self, n: i32) -> Self {
        f64::powi(self, n)
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn tan(self) -> Self {
        f64::tan(self)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn ln(self) -> Self {
        f64::ln(self)
    }
}

/// A dual number for forward-mode automatic differentiation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual {
    /// The value part
    pub val: f64,
    /// The derivative part
    pub der: f64,
}

impl Dual {
    /// A constant: derivative 0.
    pub fn constant(val: f64) -> Self {
        Self { val, der: 0.0 }
    }

    /// The differentiation variable: derivative 1.
    pub fn variable(val: f64) -> Self {
        Self { val, der: 1.0 }
    }
}

impl Add for Dual {
    type Output = Dual;

    fn add(self, rhs: Dual) -> Dual {
        Dual {
            val: self.val + rhs.val,
            der: self.der + rhs.der,
        }
    }
}

impl Sub for Dual {
    type Output = Dual;

    fn sub(self, rhs: Dual) -> Dual {
        Dual {
            val: self.val - rhs.val,
            der: self.der - rhs.der,
        }
    }
}

impl Mul for Dual {
    type Output = Dual;

    fn mul(self, rhs: Dual) -> Dual {
        Dual {
            val: self.val * rhs.val,
            der: self.der * rhs.val + self.val * rhs.der,
        }
    }
}

impl Div for Dual {
    type Output = Dual;

    fn div(self, rhs: Dual) -> Dual {
        Dual {
            val: self.val / rhs.val,
            der: (self.der * rhs.val - self.val * rhs.der) / (rhs.val * rhs.val),
        }
    }
}

impl Neg for Dual {
    type Output = Dual;

    fn neg(self) -> Dual {
        Dual {
            val: -self.val,
            der: -self.der,
        }
    }
}

impl Scalar for Dual {
    fn from_f64(v: f64) -> Self {
        Dual::constant(v)
    }

    fn value(self) -> f64 {
        self.val
    }

    fn powf(self, n: f64) -> Self {
        Dual {
            val: self.val.powf(n),
            der: self.der * n * self.val.powf(n - 1.0),
        }
    }

    fn powi(self, n: i32) -> Self {
        Dual {
            val: self.val.powi(n),
            der: self.der * f64::from(n) * self.val.powi(n - 1),
        }
    }

    fn sqrt(self) -> Self {
        let root = self.val.sqrt();
        Dual {
            val: root,
            der: self.der / (2.0 * root),
        }
    }

    fn sin(self) -> Self {
        Dual {
            val: self.val.sin(),
            der: self.der * self.val.cos(),
        }
    }

    fn cos(self) -> Self {
        Dual {
            val: self.val.cos(),
            der: -self.der * self.val.sin(),
        }
    }

    fn tan(self) -> Self {
        let c = self.val.cos();
        Dual {
            val: self.val.tan(),
            der: self.der / (c * c),
        }
    }

    fn exp(self) -> Self {
        let e = self.val.exp();
        Dual {
            val: e,
            der: self.der * e,
        }
    }

    fn ln(self) -> Self {
        Dual {
            val: self.val.ln(),
            der: self.der / self.val,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polynomial_derivative() {
        // f(x) = 3x^2 + 2x + 1, f'(x) = 6x + 2
        let x = Dual::variable(4.0);
        let f = Dual::constant(3.0) * x.powi(2) + Dual::constant(2.0) * x + Dual::constant(1.0);
        assert!((f.val - 57.0).abs() < 1e-12);
        assert!((f.der - 26.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_has_zero_derivative() {
        let x = Dual::variable(2.0);
        let c = Dual::constant(5.0);
        let f = c * c + c;
        assert!((f.der).abs() < 1e-12);
        // ...and nothing leaks into an expression not involving x
        let g = x * Dual::constant(0.0);
        assert!((g.der).abs() < 1e-12);
    }

    #[test]
    fn test_quotient_rule() {
        // f(x) = x / (x + 1), f'(x) = 1 / (x + 1)^2
        let x = Dual::variable(3.0);
        let f = x / (x + Dual::constant(1.0));
        assert!((f.val - 0.75).abs() < 1e-12);
        assert!((f.der - 1.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_sqrt_matches_powf_half() {
        let x = Dual::variable(9.0);
        let a = x.sqrt();
        let b = x.powf(0.5);
        assert!((a.val - b.val).abs() < 1e-12);
        assert!((a.der - b.der).abs() < 1e-12);
        // d/dx sqrt(x) at 9 is 1/6
        assert!((a.der - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_chain_rule_through_powf() {
        // f(x) = (1 - 2x)^3, f'(x) = -6 (1 - 2x)^2
        let x = Dual::variable(0.25);
        let inner = Dual::constant(1.0) - Dual::constant(2.0) * x;
        let f = inner.powf(3.0);
        assert!((f.val - 0.125).abs() < 1e-12);
        assert!((f.der - (-1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_trig_derivatives() {
        let x = Dual::variable(0.5);
        assert!((x.sin().der - 0.5f64.cos()).abs() < 1e-12);
        assert!((x.cos().der + 0.5f64.sin()).abs() < 1e-12);
        let t = x.tan().der;
        assert!((t - 1.0 / (0.5f64.cos() * 0.5f64.cos())).abs() < 1e-12);
    }

    #[test]
    fn test_exp_ln_derivatives() {
        let x = Dual::variable(2.0);
        assert!((x.exp().der - 2.0f64.exp()).abs() < 1e-12);
        assert!((x.ln().der - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_f64_scalar_agrees_with_dual_value() {
        // The same generic expression evaluated at both scalar types
        fn expr<T: Scalar>(x: T) -> T {
            (T::from_f64(2.0) * x).sqrt() + x.powf(1.5)
        }
        let plain = expr(8.0f64);
        let dual = expr(Dual::variable(8.0));
        assert!((plain - dual.val).abs() < 1e-12);
    }
}
