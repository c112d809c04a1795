//! This file is used by the build script. Therefore all functions generating the app command line parser must be included
//! here. It would be nicer to move the args next to the code using them, but then all logic, all crates etc. used there
//! have to be available for the build script which makes it much more complex.

use clap::{crate_name, App, AppSettings, Arg};

pub static SUPPORTED_OUTPUT_FORMATS: &[&str] = &["json", "summary"];

pub fn create_parser() -> App<'static, 'static> {
    App::new(crate_name!())
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .global_setting(AppSettings::DeriveDisplayOrder)
        .global_setting(AppSettings::DisableHelpSubcommand)
        .global_setting(AppSettings::UnifiedHelpMessage)
        .arg(
            Arg::with_name("domain name")
                .required(true)
                .index(1)
                .value_name("NAME")
                .next_line_help(false)
                .help("domain name to resolve")
                .long_help(
                    "* DOMAIN NAME may be any domain name, e.g., lukas.pustina.de
  The name is passed to the resolvers as is; malformed names simply yield empty answers.",
                ),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FORMAT")
                .takes_value(true)
                .default_value("summary")
                .possible_values(SUPPORTED_OUTPUT_FORMATS)
                .help("Sets the output format for result presentation"),
        )
        .arg(
            Arg::with_name("output-options")
                .long("output-options")
                .value_name("OPTIONS")
                .multiple(true)
                .use_delimiter(true)
                .require_delimiter(true)
                .default_value_if("output", Some("json"), "pretty")
                .default_value_if("output", Some("summary"), "")
                .help("Sets output options")
                .long_help(
                    "* Json: 'pretty': Prettifies output
* Summary: 'condensed': Hides answer names, 'show-domain-names': Always shows answer names",
                ),
        )
        .arg(
            Arg::with_name("show-errors")
                .long("show-errors")
                .conflicts_with("quiet")
                .help("Shows error counts"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Does not print anything but results"),
        )
        // This is a special option that is not reflected in AppConfig, but is checked during
        // setup in `mdoh.rs`.
        .arg(
            Arg::with_name("no-color")
                .long("no-color")
                .help("Disables colorful output"),
        )
        // This is a special option that is not reflected in AppConfig, but is checked during
        // setup in `mdoh.rs` and sets the global AtomicBool `mdoh::app::output::styles::ASCII_MODE`.
        .arg(
            Arg::with_name("ascii")
                .long("ascii")
                .help("Uses only ASCII compatible characters for output"),
        )
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("Enables debug logging output"),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
}
