// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::app::output::json::JsonOptions;
use crate::app::output::summary::SummaryOptions;
use crate::app::output::{OutputConfig, OutputType};

#[derive(Debug)]
pub struct AppConfig {
    pub show_errors: bool,
    pub quiet: bool,
    pub output: OutputType,
    pub output_config: OutputConfig,
}

impl TryFrom<&ArgMatches<'_>> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ArgMatches) -> std::result::Result<Self, Self::Error> {
        let output = args
            .value_of("output")
            .map(|x| OutputType::try_from(x).context("failed to parse output type"))
            .unwrap()?; // Safe unwrap, because of clap's validation
        let config = AppConfig {
            show_errors: args.is_present("show-errors"),
            quiet: args.is_present("quiet"),
            output_config: output_config(output, args)?,
            output,
        };

        Ok(config)
    }
}

fn output_config(output_type: OutputType, args: &ArgMatches<'_>) -> Result<OutputConfig> {
    let options: Vec<&str> = args
        .values_of("output-options")
        .map(|options| options.collect())
        .unwrap_or_default();
    parse_output_options(output_type, options)
}

fn parse_output_options(output_type: OutputType, options: Vec<&str>) -> Result<OutputConfig> {
    match output_type {
        OutputType::Json => {
            let options = JsonOptions::try_from(options).context("failed to parse json options")?;
            Ok(OutputConfig::json(options))
        }
        OutputType::Summary => {
            let options = SummaryOptions::try_from(options).context("failed to parse summary options")?;
            Ok(OutputConfig::summary(options))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::cli_parser;
    use spectral::prelude::*;

    #[test]
    fn app_config_from_args() {
        let args = cli_parser::create_parser()
            .get_matches_from_safe(vec!["mdoh", "--show-errors", "-o", "json", "example.com"])
            .unwrap();

        let config = AppConfig::try_from(&args).unwrap();

        assert_that(&config.show_errors).is_true();
        assert_that(&config.quiet).is_false();
        assert_that(&matches!(config.output, OutputType::Json)).is_true();
    }

    #[test]
    fn domain_name_is_required() {
        let res = cli_parser::create_parser().get_matches_from_safe(vec!["mdoh"]);

        assert_that(&res).is_err();
    }
}
