//! Engine and fuel formulas.
//!
//! Thrust and fuel capacity are statistical fits against maximum take-off
//! weight; thrust and specific consumption variation scale the sea-level
//! figures with Mach number and local atmospheric conditions.

use crate::error::Result;
use crate::math::Scalar;

use super::{Atmosphere, Bindings, Formula};

/// Maximum thrust from maximum take-off weight: F0 = 14.275 * MTOW^0.868.
#[derive(Debug, Clone, Copy)]
pub struct MaxThrust;

impl Formula for MaxThrust {
    fn name(&self) -> &'static str {
        "F0"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["MTOW"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        let mtow = args.get("MTOW")?;
        Ok(T::from_f64(14.275) * mtow.powf(0.868))
    }
}

/// Maximum fuel quantity from maximum take-off weight:
/// M_fuel = 574e-9 * MTOW^2 + 287e-3 * MTOW.
#[derive(Debug, Clone, Copy)]
pub struct FuelMass;

impl Formula for FuelMass {
    fn name(&self) -> &'static str {
        "M_fuel"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["MTOW"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        let mtow = args.get("MTOW")?;
        Ok(T::from_f64(574e-9) * mtow.powi(2) + T::from_f64(287e-3) * mtow)
    }
}

/// Thrust variation with Mach number M0 and static pressure Ps:
/// F = F0 * (0.568 + 0.25 * (1.2 - M0)^3) * sigma^0.6, sigma = Ps / Ps0.
#[derive(Debug, Clone, Copy)]
pub struct ThrustVariation {
    pub atmosphere: Atmosphere,
}

impl ThrustVariation {
    pub fn new(atmosphere: Atmosphere) -> Self {
        Self { atmosphere }
    }
}

impl Formula for ThrustVariation {
    fn name(&self) -> &'static str {
        "F"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["M0", "Ps", "F0"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        let m0 = args.get("M0")?;
        let ps = args.get("Ps")?;
        let f0 = args.get("F0")?;
        let sigma = ps / T::from_f64(self.atmosphere.sea_level_pressure);
        let mach_term =
            T::from_f64(0.568) + T::from_f64(0.25) * (T::from_f64(1.2) - m0).powf(3.0);
        Ok(f0 * mach_term * sigma.powf(0.6))
    }
}

/// Specific fuel consumption variation with Mach number and temperature:
/// Cs = Cs0 * sqrt(Ts / Ts0) * (1 + M0).
#[derive(Debug, Clone, Copy)]
pub struct SpecificConsumption {
    pub atmosphere: Atmosphere,
}

impl SpecificConsumption {
    pub fn new(atmosphere: Atmosphere) -> Self {
        Self { atmosphere }
    }
}

impl Formula for SpecificConsumption {
    fn name(&self) -> &'static str {
        "Cs"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["M0", "Cs0", "Ts"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        let m0 = args.get("M0")?;
        let cs0 = args.get("Cs0")?;
        let ts = args.get("Ts")?;
        let ratio = ts / T::from_f64(self.atmosphere.sea_level_temperature);
        Ok(cs0 * ratio.sqrt() * (T::from_f64(1.0) + m0))
    }
}
