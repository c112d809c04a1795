// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::collections::HashSet;
use std::convert::TryFrom;

use super::*;
use crate::resolver::{QueryState, ResultSet};
use crate::resources::Record;

#[derive(Debug)]
pub struct SummaryOptions {
    /// Reduce output to an as concise as possible form
    condensed: bool,
    /// Show answer names even when they just repeat the queried domain
    show_domain_names: bool,
}

impl SummaryOptions {
    pub fn new(condensed: bool, show_domain_names: bool) -> SummaryOptions {
        SummaryOptions {
            condensed,
            show_domain_names,
        }
    }

    pub fn condensed(&self) -> bool {
        self.condensed
    }

    pub fn show_domain_names(&self) -> bool {
        self.show_domain_names
    }
}

impl Default for SummaryOptions {
    fn default() -> Self {
        SummaryOptions {
            condensed: false,
            show_domain_names: false,
        }
    }
}

impl<'a> TryFrom<Vec<&'a str>> for SummaryOptions {
    type Error = Error;

    fn try_from(values: Vec<&'a str>) -> std::result::Result<Self, Self::Error> {
        let options: HashSet<&str> = values.into_iter().collect();
        Ok(SummaryOptions {
            condensed: options.contains("condensed"),
            show_domain_names: options.contains("show-domain-names"),
        })
    }
}

#[derive(Debug, Default)]
pub struct SummaryFormat {
    opts: SummaryOptions,
}

impl SummaryFormat {
    pub fn new(opts: SummaryOptions) -> SummaryFormat {
        SummaryFormat { opts }
    }

    pub fn opts(&self) -> &SummaryOptions {
        &self.opts
    }
}

pub trait SummaryFormatter {
    fn output<W: Write>(&self, writer: &mut W, opts: &SummaryOptions) -> Result<()>;
}

impl<T: SummaryFormatter> OutputFormat<T> for SummaryFormat {
    fn output<W: Write>(&self, writer: &mut W, data: &T) -> Result<()> {
        data.output(writer, &self.opts)
    }
}

impl SummaryFormatter for QueryState {
    fn output<W: Write>(&self, writer: &mut W, opts: &SummaryOptions) -> Result<()> {
        match self {
            QueryState::Errored(narrative) => {
                writeln!(writer, "Error")?;
                writeln!(writer, "{}", narrative)?;
            }
            QueryState::Ready(result_set) if result_set.is_empty() => {
                writeln!(writer, "No Results")?;
            }
            QueryState::Ready(result_set) => output_result_set(writer, result_set, opts)?,
        }

        Ok(())
    }
}

fn output_result_set<W: Write>(writer: &mut W, result_set: &ResultSet, opts: &SummaryOptions) -> Result<()> {
    for record_type in result_set.record_types() {
        writeln!(writer, "{}", record_type)?;
        for record in result_set.records(record_type) {
            writeln!(writer, "* {}", render_record(record, result_set.name(), opts))?;
        }
    }

    Ok(())
}

/// An answer name that just repeats the queried domain carries no information,
/// so it is elided unless explicitly requested.
fn render_record(record: &Record, domain: &str, opts: &SummaryOptions) -> String {
    let show_name = !opts.condensed() && (opts.show_domain_names() || !record.is_name_of(domain));
    if show_name {
        format!("{}: {}", record.name(), record.data())
    } else {
        record.data().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::predefined;
    use crate::resolver::{aggregate, Error as ResolverError, Lookup, Lookups, LookupResult, Response, UniQuery};
    use crate::resources::RecordType;
    use spectral::prelude::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn render(state: &QueryState, opts: &SummaryOptions) -> String {
        let mut buf = Vec::new();
        state.output(&mut buf, opts).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn ready_state() -> QueryState {
        let endpoint = Arc::new(predefined::cloudflare::https());
        let lookups: Lookups = vec![
            Lookup::new(
                UniQuery::new("example.com", RecordType::A),
                endpoint.clone(),
                LookupResult::Response(Response::new(
                    vec![Record::new("example.com.", "93.184.216.34")],
                    Duration::from_millis(10),
                    None,
                )),
            ),
            Lookup::new(
                UniQuery::new("example.com", RecordType::TXT),
                endpoint,
                LookupResult::Response(Response::new(
                    vec![Record::new("_spf.example.com.", "\"v=spf1 -all\"")],
                    Duration::from_millis(10),
                    None,
                )),
            ),
        ]
        .into();

        aggregate("example.com", &lookups)
    }

    #[test]
    fn ready_state_renders_grouped_lists() {
        let rendered = render(&ready_state(), &SummaryOptions::default());

        assert_that(&rendered.contains("A\n* 93.184.216.34")).is_true();
        // the TXT answer name differs from the queried domain and is kept
        assert_that(&rendered.contains("TXT\n* _spf.example.com.: \"v=spf1 -all\"")).is_true();
        // empty record types are not rendered
        assert_that(&rendered.contains("AAAA")).is_false();
        assert_that(&rendered.contains("CNAME")).is_false();
    }

    #[test]
    fn condensed_hides_answer_names() {
        let opts = SummaryOptions::new(true, false);

        let rendered = render(&ready_state(), &opts);

        assert_that(&rendered.contains("_spf.example.com.")).is_false();
        assert_that(&rendered.contains("* \"v=spf1 -all\"")).is_true();
    }

    #[test]
    fn show_domain_names_keeps_all_answer_names() {
        let opts = SummaryOptions::new(false, true);

        let rendered = render(&ready_state(), &opts);

        assert_that(&rendered.contains("* example.com.: 93.184.216.34")).is_true();
    }

    #[test]
    fn empty_ready_state_renders_no_results() {
        let state = aggregate("nonexistent.invalid", &Lookups::new(Vec::new()));

        let rendered = render(&state, &SummaryOptions::default());

        assert_that(&rendered).is_equal_to("No Results\n".to_string());
    }

    #[test]
    fn errored_state_renders_error_heading_and_narrative() {
        let endpoint = Arc::new(predefined::alidns::https());
        let lookups: Lookups = vec![Lookup::new(
            UniQuery::new("example.com", RecordType::A),
            endpoint,
            LookupResult::Error(ResolverError::StatusError { code: 502 }),
        )]
        .into();
        let state = aggregate("example.com", &lookups);

        let rendered = render(&state, &SummaryOptions::default());

        assert_that(&rendered.starts_with("Error\n")).is_true();
        assert_that(&rendered.contains("502")).is_true();
    }
}
