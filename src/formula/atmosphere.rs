//! Standard-atmosphere formulas.
//!
//! Pressure and temperature follow the troposphere model
//!
//!   Ps(H) = Ps0 * (1 - 22.557e-6 * H)^5.256
//!   Ts(H) = Ts0 - 6.5e-6 * H
//!
//! and density follows the perfect-gas relation rho = Ps / (R * Ts).

use crate::error::Result;
use crate::math::Scalar;
use crate::{AIR_GAS_CONSTANT, SEA_LEVEL_PRESSURE, SEA_LEVEL_TEMPERATURE, STANDARD_GRAVITY};

use super::{Bindings, Formula};

/// Pressure lapse factor in the troposphere model (per metre).
pub const PRESSURE_LAPSE: f64 = 22.557e-6;

/// Exponent of the pressure-altitude relation.
pub const PRESSURE_EXPONENT: f64 = 5.256;

/// Temperature lapse factor (per metre).
pub const TEMPERATURE_LAPSE: f64 = 6.5e-6;

/// Immutable physical constants injected into formula evaluation.
///
/// Defaults are the ISA sea-level values; tests may substitute an alternate
/// atmosphere without touching process-wide state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    /// Sea-level static pressure Ps0 (Pa)
    pub sea_level_pressure: f64,
    /// Sea-level static temperature Ts0 (K)
    pub sea_level_temperature: f64,
    /// Gravitational acceleration g (m/s^2)
    pub gravity: f64,
    /// Specific gas constant of air R (J/(kg K))
    pub gas_constant: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            sea_level_pressure: SEA_LEVEL_PRESSURE,
            sea_level_temperature: SEA_LEVEL_TEMPERATURE,
            gravity: STANDARD_GRAVITY,
            gas_constant: AIR_GAS_CONSTANT,
        }
    }
}

/// Static pressure at altitude H.
#[derive(Debug, Clone, Copy)]
pub struct StaticPressure {
    pub atmosphere: Atmosphere,
}

impl StaticPressure {
    pub fn new(atmosphere: Atmosphere) -> Self {
        Self { atmosphere }
    }
}

impl Formula for StaticPressure {
    fn name(&self) -> &'static str {
        "Ps"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["H"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        let h = args.get("H")?;
        let base = T::from_f64(1.0) - T::from_f64(PRESSURE_LAPSE) * h;
        Ok(T::from_f64(self.atmosphere.sea_level_pressure) * base.powf(PRESSURE_EXPONENT))
    }
}

/// Static temperature at altitude H.
#[derive(Debug, Clone, Copy)]
pub struct StaticTemperature {
    pub atmosphere: Atmosphere,
}

impl StaticTemperature {
    pub fn new(atmosphere: Atmosphere) -> Self {
        Self { atmosphere }
    }
}

impl Formula for StaticTemperature {
    fn name(&self) -> &'static str {
        "Ts"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["H"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        let h = args.get("H")?;
        Ok(T::from_f64(self.atmosphere.sea_level_temperature) - T::from_f64(TEMPERATURE_LAPSE) * h)
    }
}

/// Air density at static pressure Ps and temperature Ts.
#[derive(Debug, Clone, Copy)]
pub struct AirDensity {
    pub atmosphere: Atmosphere,
}

impl AirDensity {
    pub fn new(atmosphere: Atmosphere) -> Self {
        Self { atmosphere }
    }
}

impl Formula for AirDensity {
    fn name(&self) -> &'static str {
        "rho"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["Ps", "Ts"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        let ps = args.get("Ps")?;
        let ts = args.get("Ts")?;
        Ok(ps / (T::from_f64(self.atmosphere.gas_constant) * ts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamMap;
    use approx::assert_relative_eq;

    fn eval(formula: &impl Formula, params: &ParamMap) -> f64 {
        let bindings = Bindings::from_params(formula, params).unwrap();
        formula.eval(&bindings).unwrap()
    }

    #[test]
    fn test_sea_level_pressure() {
        let f = StaticPressure::new(Atmosphere::default());
        let params = ParamMap::new().bind("H", 0.0);
        assert_relative_eq!(eval(&f, &params), 101_325.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pressure_decreases_with_altitude() {
        let f = StaticPressure::new(Atmosphere::default());
        let p0 = eval(&f, &ParamMap::new().bind("H", 0.0));
        let p1 = eval(&f, &ParamMap::new().bind("H", 5000.0));
        let p2 = eval(&f, &ParamMap::new().bind("H", 11000.0));
        assert!(p0 > p1 && p1 > p2);
    }

    #[test]
    fn test_sea_level_temperature() {
        let f = StaticTemperature::new(Atmosphere::default());
        let params = ParamMap::new().bind("H", 0.0);
        assert_relative_eq!(eval(&f, &params), 288.15, epsilon = 1e-12);
    }

    #[test]
    fn test_density_at_sea_level() {
        let f = AirDensity::new(Atmosphere::default());
        let params = ParamMap::new().bind("Ps", 101_325.0).bind("Ts", 288.15);
        // 101325 / (287.05 * 288.15) ~ 1.225 kg/m^3
        assert_relative_eq!(eval(&f, &params), 1.225, epsilon = 1e-3);
    }

    #[test]
    fn test_alternate_atmosphere_is_injected() {
        let atm = Atmosphere {
            sea_level_pressure: 90_000.0,
            ..Atmosphere::default()
        };
        let f = StaticPressure::new(atm);
        let params = ParamMap::new().bind("H", 0.0);
        assert_relative_eq!(eval(&f, &params), 90_000.0, epsilon = 1e-9);
    }
}
