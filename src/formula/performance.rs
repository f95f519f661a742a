//! Flight-characteristics formulas.
//!
//! Weight, drag, stall speed, take-off distance and the V-speeds derived
//! from the stall speed.

use crate::error::Result;
use crate::math::Scalar;

use super::{Atmosphere, Bindings, Formula};

/// Operating weight of the aircraft from its mass: W = m * g.
#[derive(Debug, Clone, Copy)]
pub struct OperatingWeight {
    pub atmosphere: Atmosphere,
}

impl OperatingWeight {
    pub fn new(atmosphere: Atmosphere) -> Self {
        Self { atmosphere }
    }
}

impl Formula for OperatingWeight {
    fn name(&self) -> &'static str {
        "OP_weight"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["m"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        let m = args.get("m")?;
        Ok(m * T::from_f64(self.atmosphere.gravity))
    }
}

/// Drag coefficient from the lift coefficient: Cx = 0.0295 + 0.035 * Cz^2.
#[derive(Debug, Clone, Copy)]
pub struct DragCoefficient;

impl Formula for DragCoefficient {
    fn name(&self) -> &'static str {
        "Cx_max"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["Cz_max"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        let cz = args.get("Cz_max")?;
        Ok(T::from_f64(0.0295) + T::from_f64(0.035) * cz.powi(2))
    }
}

/// Stall speed from mass, air density, wing surface and max lift coefficient:
/// V_stall = sqrt(2 * m * g / (rho * S * Cz_max)).
#[derive(Debug, Clone, Copy)]
pub struct StallSpeed {
    pub atmosphere: Atmosphere,
}

impl StallSpeed {
    pub fn new(atmosphere: Atmosphere) -> Self {
        Self { atmosphere }
    }
}

impl Formula for StallSpeed {
    fn name(&self) -> &'static str {
        "V_stall"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["m", "rho", "S", "Cz_max"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        let m = args.get("m")?;
        let rho = args.get("rho")?;
        let s = args.get("S")?;
        let cz = args.get("Cz_max")?;
        let lift = T::from_f64(2.0) * m * T::from_f64(self.atmosphere.gravity);
        Ok((lift / (rho * s * cz)).sqrt())
    }
}

/// Take-off distance from thrust, mass, ground friction and take-off time:
/// d = (F / m - mu * g) * t^2 / 2.
#[derive(Debug, Clone, Copy)]
pub struct TakeOffDistance {
    pub atmosphere: Atmosphere,
}

impl TakeOffDistance {
    pub fn new(atmosphere: Atmosphere) -> Self {
        Self { atmosphere }
    }
}

impl Formula for TakeOffDistance {
    fn name(&self) -> &'static str {
        "TO_dist"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["m", "F", "mu", "TO_time"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        let m = args.get("m")?;
        let f = args.get("F")?;
        let mu = args.get("mu")?;
        let t = args.get("TO_time")?;
        let accel = f / m - mu * T::from_f64(self.atmosphere.gravity);
        Ok(accel * t.powi(2) / T::from_f64(2.0))
    }
}

/// Decision speed: V1 = 1.05 * V_stall.
#[derive(Debug, Clone, Copy)]
pub struct DecisionSpeed;

impl Formula for DecisionSpeed {
    fn name(&self) -> &'static str {
        "V1"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["V_stall"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        Ok(T::from_f64(1.05) * args.get("V_stall")?)
    }
}

/// Rotation speed: VR = 1.1 * V_stall.
#[derive(Debug, Clone, Copy)]
pub struct RotationSpeed;

impl Formula for RotationSpeed {
    fn name(&self) -> &'static str {
        "VR"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["V_stall"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        Ok(T::from_f64(1.1) * args.get("V_stall")?)
    }
}

/// Take-off safety speed: V2 = 1.2 * V_stall.
#[derive(Debug, Clone, Copy)]
pub struct TakeOffSpeed;

impl Formula for TakeOffSpeed {
    fn name(&self) -> &'static str {
        "V2"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["V_stall"]
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        Ok(T::from_f64(1.2) * args.get("V_stall")?)
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
    fn test_operating_weight() {
        let f = OperatingWeight::new(Atmosphere::default());
        let params = ParamMap::new().bind("m", 299_640.0);
        assert_relative_eq!(eval(&f, &params), 299_640.0 * 9.81, epsilon = 1e-6);
    }

    #[test]
    fn test_drag_coefficient() {
        let params = ParamMap::new().bind("Cz_max", 2.0);
        assert_relative_eq!(
            eval(&DragCoefficient, &params),
            0.0295 + 0.035 * 4.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_stall_speed_reference_aircraft() {
        // 777-class numbers from the reference data set
        let f = StallSpeed::new(Atmosphere::default());
        let params = ParamMap::new()
            .bind("m", 299_640.0)
            .bind("rho", 1.225)
            .bind("S", 427.8)
            .bind("Cz_max", 2.0);
        let expected = (2.0 * 299_640.0 * 9.81 / (1.225 * 427.8 * 2.0)).sqrt();
        assert_relative_eq!(eval(&f, &params), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_v_speeds_scale_stall_speed() {
        let params = ParamMap::new().bind("V_stall", 70.0);
        assert_relative_eq!(eval(&DecisionSpeed, &params), 73.5, epsilon = 1e-9);
        assert_relative_eq!(eval(&RotationSpeed, &params), 77.0, epsilon = 1e-9);
        assert_relative_eq!(eval(&TakeOffSpeed, &params), 84.0, epsilon = 1e-9);
    }

    #[test]
    fn test_take_off_distance() {
        let f = TakeOffDistance::new(Atmosphere::default());
        let params = ParamMap::new()
            .bind("m", 100_000.0)
            .bind("F", 500_000.0)
            .bind("mu", 0.02)
            .bind("TO_time", 30.0);
        let expected = (500_000.0 / 100_000.0 - 0.02 * 9.81) * 30.0f64.powi(2) / 2.0;
        assert_relative_eq!(eval(&f, &params), expected, epsilon = 1e-9);
    }
}
