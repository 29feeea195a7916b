//! Loopgate CLI entry point.

use clap::Parser;
use loopgate::cli::{self, Cli, EXIT_FAILED};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(cli::parse_error_exit_code(&e));
        }
    };
    cli::init_logging(cli.verbose);

    let exit_code = match cli::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILED
        }
    };

    std::process::exit(exit_code);
}
