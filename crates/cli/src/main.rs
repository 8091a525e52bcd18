use apply_versions_cli::args::Args;
use apply_versions_cli::error::AppError;
use apply_versions_cli::presentation;
use apply_versions_cli::prompt::Prompter;
use clap::Parser;
use env_logger::Env;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    let interactive = io::stdin().is_terminal();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("Error: cannot determine current directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut prompter = Prompter::new(&mut stdin, &mut stdout);
    let err = match apply_versions_cli::execute(&args, &cwd, &mut prompter) {
        Ok(report) => {
            match presentation::print_report(&mut io::stdout(), &report, args.format) {
                Ok(()) => return ExitCode::SUCCESS,
                Err(e) => e,
            }
        }
        Err(e) => e,
    };

    // Input ended in the middle of a prompt line.
    if matches!(err, AppError::MissingInput { .. }) {
        println!();
    }
    println!("{}", presentation::format_error(&err));
    if interactive
        && !args.behavior.no_pause
        && let Err(e) = prompter.pause()
    {
        log::debug!("pause failed: {e}");
    }
    // The error has been reported; the status stays 0 unless asked otherwise.
    if args.behavior.error_exit_code {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
