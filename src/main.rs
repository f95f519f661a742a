//! Flightmech - Aircraft Flight-Mechanics Calculator
//!
//! Evaluates flight-mechanics formulas and solves for a single unknown
//! parameter against a target output.
//!
//! # Usage
//!
//! ```bash
//! flightmech Ps H=? --target 101325
//! flightmech V_stall m=299640 rho=1.225 S=427.8 Cz_max=2
//! flightmech --list
//! ```

use std::process::ExitCode;

use clap::Parser;
use flightmech_core::{driver, Atmosphere};

/// Flight-mechanics formula evaluator and implicit solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of the formula to evaluate or solve (e.g. Ps, Ts, V_stall)
    #[arg(value_name = "FORMULA", required_unless_present = "list")]
    formula: Option<String>,

    /// Parameters as NAME=VALUE, with NAME=? marking the unknown
    #[arg(value_name = "PARAMS")]
    params: Vec<String>,

    /// Target output to solve the unknown against
    #[arg(short, long)]
    target: Option<f64>,

    /// List the available formulas and their parameters
    #[arg(short, long)]
    list: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let atmosphere = Atmosphere::default();

    if args.list {
        println!("{}", driver::list_formulas(atmosphere));
        return ExitCode::SUCCESS;
    }

    // Clap guarantees the formula name is present when --list is absent
    let formula = args.formula.unwrap_or_default();

    match driver::run(&formula, args.target, &args.params, atmosphere) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
