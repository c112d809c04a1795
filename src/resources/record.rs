// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use serde::Serialize;
use std::fmt;

/// One answer entry as retained by the aggregator.
///
/// The derived ordering -- name first, then data -- is the order of the
/// record's string form. Result lists are deduplicated and sorted by exactly
/// this ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Record {
    name: String,
    data: String,
}

impl Record {
    pub fn new<N: Into<String>, D: Into<String>>(name: N, data: D) -> Record {
        Record {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    /// Checks whether this record's name refers to `domain`, ignoring the
    /// trailing dot of a fully qualified answer name.
    pub fn is_name_of(&self, domain: &str) -> bool {
        let name = self.name.strip_suffix('.').unwrap_or(&self.name);
        let domain = domain.strip_suffix('.').unwrap_or(domain);
        name.eq_ignore_ascii_case(domain)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectral::prelude::*;

    #[test]
    fn ordering_follows_string_form() {
        let mut records = vec![
            Record::new("www.example.com.", "93.184.216.34"),
            Record::new("example.com.", "93.184.216.34"),
            Record::new("example.com.", "192.0.2.1"),
        ];
        records.sort();

        let rendered: Vec<_> = records.iter().map(ToString::to_string).collect();
        let mut sorted = rendered.clone();
        sorted.sort();
        assert_that(&rendered).is_equal_to(&sorted);
    }

    #[test]
    fn is_name_of_ignores_trailing_dot_and_case() {
        let record = Record::new("Example.com.", "93.184.216.34");
        assert_that(&record.is_name_of("example.com")).is_true();
        assert_that(&record.is_name_of("www.example.com")).is_false();
    }
}
