//! `float-distance` binary: population counts of float intervals.
//!
//! # Usage
//!
//! ```bash
//! float-distance                       # the sample doublings, f64
//! float-distance --width 32 --boundaries
//! float-distance -- -1.5 2.0 0 1e-300  # pairs [-1.5, 2.0] and [0, 1e-300]
//! float-distance --self-test --boundaries
//! ```

use std::error::Error;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::{error, info};

use float_distance::{
    boundary_pairs, check_encoding, inspect, sample_pairs, write_report, BinaryFloat, DistanceConfig,
    DistanceError, FloatWidth, NonFinitePolicy,
};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "float-distance",
    version,
    about = "Count the representable floating point values in closed intervals",
    long_about = None
)]
struct Args {
    /// Float width to measure in: 32 or 64.
    #[arg(short, long, default_value = "64", value_name = "BITS")]
    width: FloatWidth,

    /// Add the intervals around zero, the subnormals and the smallest normal.
    #[arg(long, default_value_t = false)]
    boundaries: bool,

    /// Verify both encoders on every operand instead of reporting.
    #[arg(long, default_value_t = false)]
    self_test: bool,

    /// Print the field decomposition of every operand before the report.
    #[arg(long, default_value_t = false)]
    inspect: bool,

    /// Count infinities as the ends of the order instead of rejecting them.
    #[arg(long, default_value_t = false)]
    extend_infinities: bool,

    /// Interval bounds, taken pairwise. Without operands the sample
    /// doublings are reported.
    #[arg(value_name = "OPERAND", allow_negative_numbers = true)]
    operands: Vec<String>,
}

/// Parse the command line, rejecting an odd number of operands.
fn parse_args<I, T>(argv: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(argv)?;
    if args.operands.len() % 2 != 0 {
        return Err(Args::command().error(ErrorKind::WrongNumberOfValues, "operands must come in pairs"));
    }
    Ok(args)
}

fn parse_pairs<F: BinaryFloat>(operands: &[String]) -> Result<Vec<(F, F)>, DistanceError> {
    let values = operands
        .iter()
        .map(|s| s.trim().parse::<F>().map_err(|_| DistanceError::InvalidOperand(s.clone())))
        .collect::<Result<Vec<F>, _>>()?;
    Ok(values.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect())
}

/// Run the requested report into `out`. Returns whether every interval was
/// counted (or every operand passed the self-test).
fn run<F: BinaryFloat, W: Write>(args: &Args, out: &mut W) -> Result<bool, Box<dyn Error>> {
    let mut pairs = if args.operands.is_empty() {
        sample_pairs::<F>()
    } else {
        parse_pairs::<F>(&args.operands)?
    };
    if args.boundaries {
        pairs.extend(boundary_pairs::<F>());
    }

    if args.self_test {
        let mut checked = 0;
        for &(a, b) in &pairs {
            for x in [a, b] {
                if let Err(err) = check_encoding(x) {
                    error!("self-test failed: {}", err);
                    writeln!(out, "{}", err)?;
                    return Ok(false);
                }
                checked += 1;
            }
        }
        writeln!(out, "{} operands encoded identically by both encoders ({}).", checked, F::WIDTH)?;
        return Ok(true);
    }

    if args.inspect {
        for &(a, b) in &pairs {
            writeln!(out, "{}", inspect(a))?;
            writeln!(out, "{}", inspect(b))?;
        }
    }

    let config = if args.extend_infinities {
        DistanceConfig::default().with_non_finite(NonFinitePolicy::ExtendInfinities)
    } else {
        DistanceConfig::default()
    };
    let rejected = write_report(out, &pairs, &config)?;
    info!("reported {} intervals, {} rejected", pairs.len(), rejected);

    Ok(rejected == 0)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = parse_args(std::env::args_os()).unwrap_or_else(|err| err.exit());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match args.width {
        FloatWidth::Width32 => run::<f32, _>(&args, &mut out),
        FloatWidth::Width64 => run::<f64, _>(&args, &mut out),
    };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
