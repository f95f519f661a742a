//! WASM bindings for Flightmech Core.
//!
//! This module provides JavaScript-friendly bindings around the formula
//! library and the implicit solver.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmFlightSolver } from 'flightmech_core';
//!
//! await init();
//!
//! const solver = new WasmFlightSolver();
//!
//! // Direct evaluation: every parameter bound
//! const ts = solver.solve('Ts', null, ['H=0']);        // 288.15
//!
//! // Implicit solve: one parameter unknown, target required
//! const h = solver.solve('Ps', 101325, ['H=?']);       // 0
//! ```

use wasm_bindgen::prelude::*;

use crate::driver;
use crate::formula::{Atmosphere, FlightFormula, Formula};
use crate::solver;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible flight-mechanics solver.
///
/// Wraps the native formula library and [`solver::solve`] with an API that
/// takes parameter specs as `NAME=VALUE` / `NAME=?` strings.
#[wasm_bindgen]
pub struct WasmFlightSolver {
    atmosphere: Atmosphere,
}

impl Default for WasmFlightSolver {
    fn default() -> Self {
        Self {
            atmosphere: Atmosphere::default(),
        }
    }
}

#[wasm_bindgen]
impl WasmFlightSolver {
    /// Create a solver using the standard (ISA) atmosphere.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmFlightSolver {
        Self::default()
    }

    /// Create a solver with custom physical constants.
    #[wasm_bindgen]
    pub fn with_atmosphere(
        sea_level_pressure: f64,
        sea_level_temperature: f64,
        gravity: f64,
        gas_constant: f64,
    ) -> WasmFlightSolver {
        WasmFlightSolver {
            atmosphere: Atmosphere {
                sea_level_pressure,
                sea_level_temperature,
                gravity,
                gas_constant,
            },
        }
    }

    /// Evaluate a formula or solve for its single unknown parameter.
    ///
    /// # Arguments
    /// * `formula` - Library formula name (e.g. `"Ps"`, `"V_stall"`)
    /// * `target` - Target output; required when one parameter is `NAME=?`
    /// * `params` - Parameter specs, `NAME=VALUE` or `NAME=?`
    ///
    /// # Returns
    /// The solved or evaluated value, rounded to 3 decimal places.
    #[wasm_bindgen]
    pub fn solve(
        &self,
        formula: &str,
        target: Option<f64>,
        params: Vec<String>,
    ) -> Result<f64, JsValue> {
        let formula = FlightFormula::by_name(formula, self.atmosphere)
            .ok_or_else(|| JsValue::from_str(&format!("unknown formula '{formula}'")))?;
        let params = driver::parse_param_specs(&params)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        solver::solve(&formula, target, &params).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Names of the formulas in the library.
    #[wasm_bindgen]
    pub fn formula_names(&self) -> Vec<String> {
        FlightFormula::all(self.atmosphere)
            .iter()
            .map(|f| f.name().to_string())
            .collect()
    }

    /// Parameter names a formula requires, or `undefined` for an unknown name.
    #[wasm_bindgen]
    pub fn formula_parameters(&self, formula: &str) -> Option<Vec<String>> {
        let formula = FlightFormula::by_name(formula, self.atmosphere)?;
        Some(
            formula
                .parameters()
                .iter()
                .map(|p| p.to_string())
                .collect(),
        )
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
