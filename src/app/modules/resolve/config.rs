use std::convert::TryFrom;

use anyhow::Context;
use clap::ArgMatches;

pub struct ResolveConfig {
    pub domain_name: String,
}

impl TryFrom<&ArgMatches<'_>> for ResolveConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ArgMatches) -> std::result::Result<Self, Self::Error> {
        let config = ResolveConfig {
            domain_name: args
                .value_of("domain name")
                .context("No domain name to resolve specified")?
                .to_string(),
        };

        Ok(config)
    }
}
