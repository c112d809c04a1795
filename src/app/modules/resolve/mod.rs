use std::convert::TryInto;

use anyhow::Result;
use clap::ArgMatches;
use tracing::info;

use crate::app::{AppConfig, ExitStatus};

pub mod config;
#[allow(clippy::module_inception)]
mod resolve;

use config::ResolveConfig;
use resolve::Resolve;

pub async fn run(args: &ArgMatches<'_>, app_config: &AppConfig) -> Result<ExitStatus> {
    info!("resolve module selected.");
    let config: ResolveConfig = args.try_into()?;

    Resolve::init(app_config, &config).await?.lookups().await?.output()
}
