use std::convert::TryInto;
use std::env;
use std::process;

use anyhow::{Context, Result};
use clap::ArgMatches;
use tracing::info;

use mdoh::app::cli_parser::create_parser;
use mdoh::app::logging::Logging;
use mdoh::app::output::styles;
use mdoh::app::{modules, AppConfig, ExitStatus};

#[tokio::main]
async fn main() {
    let args = create_parser().get_matches();

    if args.is_present("no-color") {
        styles::no_color_mode();
    }
    if args.is_present("ascii") {
        styles::ascii_mode();
    }

    let exit_status = match run(&args).await {
        Ok(exit_status) => exit_status,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::UnrecoverableError
        }
    };

    process::exit(exit_status as i32);
}

async fn run(args: &ArgMatches<'_>) -> Result<ExitStatus> {
    Logging::new(
        args.occurrences_of("v"),
        env::var_os("RUST_LOG"),
        !args.is_present("no-color"),
        args.is_present("debug"),
    )
    .start()
    .context("failed to start logging")?;
    info!("Set up logging.");

    let app_config: AppConfig = match args.try_into() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return Ok(ExitStatus::ConfigParsingFailed);
        }
    };
    info!("Parsed app config.");

    modules::resolve::run(args, &app_config).await
}
