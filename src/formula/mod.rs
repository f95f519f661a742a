//! Flight-mechanics formulas.
//!
//! This module provides the formula contract and the built-in library:
//! - Atmosphere: static pressure, static temperature, air density
//! - Propulsion: max thrust, fuel mass, thrust variation, specific consumption
//! - Performance: operating weight, drag coefficient, stall speed,
//!   take-off distance, V1/VR/V2 speeds
//!
//! A formula is a pure closed-form expression over named parameters, written
//! generically over [`Scalar`] so that the same definition serves direct
//! `f64` evaluation and dual-number differentiation.

mod atmosphere;
mod performance;
mod propulsion;

pub use atmosphere::{AirDensity, Atmosphere, StaticPressure, StaticTemperature};
pub use performance::{
    DecisionSpeed, DragCoefficient, OperatingWeight, RotationSpeed, StallSpeed, TakeOffDistance,
    TakeOffSpeed,
};
pub use propulsion::{FuelMass, MaxThrust, SpecificConsumption, ThrustVariation};

use crate::error::{FlightMechError, Result};
use crate::math::{Dual, Scalar};
use crate::params::{ParamMap, Value};

/// A closed-form formula over named parameters.
///
/// Implementations must be pure: no side effects, no mutable state, only the
/// fixed physical constants carried by the implementing struct (see
/// [`Atmosphere`]). The expression is restricted to the [`Scalar`] vocabulary
/// so an exact derivative with respect to any one parameter exists.
pub trait Formula {
    /// Stable name, used in diagnostics and library lookup.
    fn name(&self) -> &'static str;

    /// The parameter names this formula reads.
    fn parameters(&self) -> &'static [&'static str];

    /// Evaluate with every parameter bound.
    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T>;
}

/// A fully-bound view of a formula's parameters, handed to [`Formula::eval`].
///
/// Built per evaluation from a [`ParamMap`]; the caller's map is never
/// mutated. During solving, the unknown's slot is substituted with the
/// current dual-number estimate instead.
#[derive(Debug, Clone)]
pub struct Bindings<T> {
    formula: &'static str,
    entries: Vec<(&'static str, T)>,
}

impl<T: Scalar> Bindings<T> {
    /// Bind every parameter the formula requires from the mapping, with one
    /// name optionally substituted by a caller-supplied value.
    ///
    /// A required name absent from the mapping is a
    /// [`MissingParameter`](FlightMechError::MissingParameter) error. A
    /// required name still marked unknown (and not covered by the
    /// substitution) is rejected: that is an upstream logic error, reported
    /// as [`MissingTarget`](FlightMechError::MissingTarget).
    fn build<F: Formula + ?Sized>(
        formula: &F,
        params: &ParamMap,
        substitution: Option<(&str, T)>,
    ) -> Result<Self> {
        let mut entries = Vec::with_capacity(formula.parameters().len());
        for &name in formula.parameters() {
            if let Some((var, value)) = substitution {
                if name == var {
                    entries.push((name, value));
                    continue;
                }
            }
            match params.get(name) {
                Some(Value::Bound(v)) => entries.push((name, T::from_f64(v))),
                Some(Value::Unknown) => {
                    return Err(FlightMechError::missing_target(formula.name(), name));
                }
                None => {
                    return Err(FlightMechError::missing_parameter(formula.name(), name));
                }
            }
        }
        Ok(Self {
            formula: formula.name(),
            entries,
        })
    }

    /// Bind every required parameter; all must be [`Value::Bound`].
    pub fn from_params<F: Formula + ?Sized>(formula: &F, params: &ParamMap) -> Result<Self> {
        Self::build(formula, params, None)
    }

    /// Look up a parameter. Reading a name the binding set lacks (a name the
    /// formula did not declare) is a
    /// [`MissingParameter`](FlightMechError::MissingParameter) error.
    pub fn get(&self, name: &str) -> Result<T> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
            .ok_or_else(|| FlightMechError::missing_parameter(self.formula, name))
    }
}

impl Bindings<Dual> {
    /// Bind required parameters as dual constants, with `variable` seeded as
    /// the differentiation variable at `estimate`.
    pub fn with_variable<F: Formula + ?Sized>(
        formula: &F,
        params: &ParamMap,
        variable: &str,
        estimate: f64,
    ) -> Result<Self> {
        Self::build(formula, params, Some((variable, Dual::variable(estimate))))
    }
}

/// The built-in formula library as one dispatchable type.
///
/// The solver works with any [`Formula`]; this enum exists so callers that
/// select formulas by name at runtime (the CLI driver, the WASM surface)
/// have a concrete type to hold.
#[derive(Debug, Clone)]
pub enum FlightFormula {
    StaticPressure(StaticPressure),
    StaticTemperature(StaticTemperature),
    AirDensity(AirDensity),
    MaxThrust(MaxThrust),
    FuelMass(FuelMass),
    ThrustVariation(ThrustVariation),
    SpecificConsumption(SpecificConsumption),
    OperatingWeight(OperatingWeight),
    DragCoefficient(DragCoefficient),
    StallSpeed(StallSpeed),
    TakeOffDistance(TakeOffDistance),
    DecisionSpeed(DecisionSpeed),
    RotationSpeed(RotationSpeed),
    TakeOffSpeed(TakeOffSpeed),
}

impl FlightFormula {
    /// Look up a library formula by its stable name.
    pub fn by_name(name: &str, atmosphere: Atmosphere) -> Option<Self> {
        match name {
            "Ps" => Some(Self::StaticPressure(StaticPressure::new(atmosphere))),
            "Ts" => Some(Self::StaticTemperature(StaticTemperature::new(atmosphere))),
            "rho" => Some(Self::AirDensity(AirDensity::new(atmosphere))),
            "F0" => Some(Self::MaxThrust(MaxThrust)),
            "M_fuel" => Some(Self::FuelMass(FuelMass)),
            "F" => Some(Self::ThrustVariation(ThrustVariation::new(atmosphere))),
            "Cs" => Some(Self::SpecificConsumption(SpecificConsumption::new(
                atmosphere,
            ))),
            "OP_weight" => Some(Self::OperatingWeight(OperatingWeight::new(atmosphere))),
            "Cx_max" => Some(Self::DragCoefficient(DragCoefficient)),
            "V_stall" => Some(Self::StallSpeed(StallSpeed::new(atmosphere))),
            "TO_dist" => Some(Self::TakeOffDistance(TakeOffDistance::new(atmosphere))),
            "V1" => Some(Self::DecisionSpeed(DecisionSpeed)),
            "VR" => Some(Self::RotationSpeed(RotationSpeed)),
            "V2" => Some(Self::TakeOffSpeed(TakeOffSpeed)),
            _ => None,
        }
    }

    /// Every formula in the library, for listings.
    pub fn all(atmosphere: Atmosphere) -> Vec<Self> {
        [
            "Ps", "Ts", "rho", "F0", "M_fuel", "F", "Cs", "OP_weight", "Cx_max", "V_stall",
            "TO_dist", "V1", "VR", "V2",
        ]
        .into_iter()
        .filter_map(|name| Self::by_name(name, atmosphere))
        .collect()
    }
}

impl Formula for FlightFormula {
    fn name(&self) -> &'static str {
        match self {
            Self::StaticPressure(f) => f.name(),
            Self::StaticTemperature(f) => f.name(),
            Self::AirDensity(f) => f.name(),
            Self::MaxThrust(f) => f.name(),
            Self::FuelMass(f) => f.name(),
            Self::ThrustVariation(f) => f.name(),
            Self::SpecificConsumption(f) => f.name(),
            Self::OperatingWeight(f) => f.name(),
            Self::DragCoefficient(f) => f.name(),
            Self::StallSpeed(f) => f.name(),
            Self::TakeOffDistance(f) => f.name(),
            Self::DecisionSpeed(f) => f.name(),
            Self::RotationSpeed(f) => f.name(),
            Self::TakeOffSpeed(f) => f.name(),
        }
    }

    fn parameters(&self) -> &'static [&'static str] {
        match self {
            Self::StaticPressure(f) => f.parameters(),
            Self::StaticTemperature(f) => f.parameters(),
            Self::AirDensity(f) => f.parameters(),
            Self::MaxThrust(f) => f.parameters(),
            Self::FuelMass(f) => f.parameters(),
            Self::ThrustVariation(f) => f.parameters(),
            Self::SpecificConsumption(f) => f.parameters(),
            Self::OperatingWeight(f) => f.parameters(),
            Self::DragCoefficient(f) => f.parameters(),
            Self::StallSpeed(f) => f.parameters(),
            Self::TakeOffDistance(f) => f.parameters(),
            Self::DecisionSpeed(f) => f.parameters(),
            Self::RotationSpeed(f) => f.parameters(),
            Self::TakeOffSpeed(f) => f.parameters(),
        }
    }

    fn eval<T: Scalar>(&self, args: &Bindings<T>) -> Result<T> {
        match self {
            Self::StaticPressure(f) => f.eval(args),
            Self::StaticTemperature(f) => f.eval(args),
            Self::AirDensity(f) => f.eval(args),
            Self::MaxThrust(f) => f.eval(args),
            Self::FuelMass(f) => f.eval(args),
            Self::ThrustVariation(f) => f.eval(args),
            Self::SpecificConsumption(f) => f.eval(args),
            Self::OperatingWeight(f) => f.eval(args),
            Self::DragCoefficient(f) => f.eval(args),
            Self::StallSpeed(f) => f.eval(args),
            Self::TakeOffDistance(f) => f.eval(args),
            Self::DecisionSpeed(f) => f.eval(args),
            Self::RotationSpeed(f) => f.eval(args),
            Self::TakeOffSpeed(f) => f.eval(args),
        }
    }
}
