use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use macsetup_cli::cli::{Cli, Command};
use macsetup_cli::commands::{personal_apps, setup, step, version};
use macsetup_cli::logging::{self, Logger};

fn main() -> ExitCode {
    let args = Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = Arc::new(Logger::new());

    let result = match args.command {
        None => setup::run(&args.global, setup::RunMode::from(&args.mode), &log),
        Some(Command::Step(opts)) => step::run(&args.global, &opts, &log),
        Some(Command::PersonalApps(opts)) => personal_apps::run(&args.global, &opts, &log),
        Some(Command::Version) => {
            version::run();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
