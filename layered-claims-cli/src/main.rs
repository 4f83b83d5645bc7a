//! `claimlint`: lint patent claims for antecedent basis, restriction and
//! drafting issues.
//!
//! Exit codes: 0 when no warnings remain after filtering, 2 when some do,
//! 1 when the input could not be analyzed.

mod cli;
mod error;
mod logging;
mod report;
mod run;
mod sink;

use clap::Parser;
use layered_claims::RunOutcome;

use crate::cli::Cli;

fn main() {
    let code = match Cli::parse().resolve() {
        Ok(cli) => {
            logging::init_logging(cli.log_level());
            match run::run(&cli) {
                Ok(outcome) => {
                    if let RunOutcome::Aborted(err) = &outcome {
                        eprintln!("claimlint: {}", err);
                    }
                    outcome.exit_code()
                }
                Err(err) => {
                    eprintln!("claimlint: {}", err);
                    1
                }
            }
        }
        Err(err) => {
            eprintln!("claimlint: {}", err);
            1
        }
    };
    std::process::exit(code);
}
