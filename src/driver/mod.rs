//! Driver support for the CLI frontend.
//!
//! Handles parsing command-line parameter specifications and formatting
//! solver results.
//!
//! A parameter spec is `NAME=VALUE` for a bound parameter or `NAME=?` for
//! the unknown to solve for:
//!
//! ```text
//! flightmech Ps H=?  --target 101325
//! flightmech V_stall m=299640 rho=1.225 S=427.8 Cz_max=2
//! ```

use crate::error::{FlightMechError, Result};
use crate::formula::{Atmosphere, FlightFormula, Formula};
use crate::params::{ParamMap, Value};
use crate::solver;

/// Parse `NAME=VALUE` / `NAME=?` specs into a parameter mapping.
pub fn parse_param_specs(specs: &[String]) -> Result<ParamMap> {
    specs
        .iter()
        .map(|spec| {
            let (name, value) = spec.split_once('=').ok_or_else(|| {
                FlightMechError::invalid_spec(spec, "expected NAME=VALUE or NAME=?")
            })?;
            if name.is_empty() {
                return Err(FlightMechError::invalid_spec(spec, "empty parameter name"));
            }
            let slot = if value == "?" {
                Value::Unknown
            } else {
                value
                    .parse::<f64>()
                    .map_err(|_| {
                        FlightMechError::invalid_spec(spec, format!("'{value}' is not a number"))
                    })?
                    .into()
            };
            Ok((name.to_string(), slot))
        })
        .collect()
}

/// Look up a formula, run the solver, and format the outcome.
///
/// Returns a `NAME = value` line: the unknown's name when solving, the
/// formula's name when evaluating directly.
pub fn run(
    formula_name: &str,
    target: Option<f64>,
    specs: &[String],
    atmosphere: Atmosphere,
) -> Result<String> {
    let formula = FlightFormula::by_name(formula_name, atmosphere).ok_or_else(|| {
        FlightMechError::UnknownFormula {
            name: formula_name.to_string(),
        }
    })?;
    let params = parse_param_specs(specs)?;

    let label = match solver::scan_unknowns(&formula, &params)? {
        solver::UnknownScan::One(variable) => variable,
        _ => formula.name(),
    };
    let value = solver::solve(&formula, target, &params)?;
    Ok(format!("{label} = {value}"))
}

/// One `NAME(PARAMS, ...)` line per library formula, for `--list`.
pub fn list_formulas(atmosphere: Atmosphere) -> String {
    FlightFormula::all(atmosphere)
        .iter()
        .map(|f| format!("{}({})", f.name(), f.parameters().join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
