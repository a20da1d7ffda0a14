//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use batchroute_cli::CliError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    match batchroute_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn report(err: &CliError) {
    if let CliError::ArgumentParsing(clap_err) = err {
        // Clap sends help to stdout and usage errors to stderr.
        if let Err(print_err) = clap_err.print() {
            eprintln!("batchroute: {print_err}");
        }
        return;
    }
    eprintln!("batchroute: {err}");
    if err.is_usage_error() {
        eprintln!("{}", batchroute_cli::usage());
    }
}
