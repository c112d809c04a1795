// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The JSON flavor of DNS-over-HTTPS as served by Cloudflare, AliDNS, and
//! friends; cf. <https://developers.cloudflare.com/1.1.1.1/encryption/dns-over-https/make-api-requests/dns-json/>
//!
//! Only `Status` and `Answer` are read; all other fields are ignored. A
//! missing `Answer` field is an empty answer, not an error.

use serde::Deserialize;
use std::convert::TryFrom;

use crate::resources::{Record, RecordType};

/// DNS RCODE signalling a non-existent domain.
const RCODE_NXDOMAIN: u32 = 3;

#[derive(Debug, Deserialize)]
pub struct DnsJsonResponse {
    #[serde(rename = "Status")]
    status: Option<u32>,
    #[serde(rename = "Answer", default)]
    answers: Vec<DnsJsonAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct DnsJsonAnswer {
    name: String,
    #[serde(rename = "type")]
    type_code: u16,
    #[serde(rename = "TTL")]
    ttl: Option<u32>,
    data: String,
}

impl DnsJsonResponse {
    pub fn is_nx_domain(&self) -> bool {
        self.status == Some(RCODE_NXDOMAIN)
    }

    /// The answers whose type code maps to `record_type`.
    ///
    /// Resolvers may bundle records of other types into an answer section,
    /// e.g., the CNAME chain leading to an A record. Such entries belong to
    /// the sub-query that asked for their type, not to this one.
    pub fn records_for(&self, record_type: RecordType) -> Vec<Record> {
        self.answers
            .iter()
            .filter(|answer| RecordType::try_from(answer.type_code).ok() == Some(record_type))
            .map(|answer| Record::new(answer.name.as_str(), answer.data.as_str()))
            .collect()
    }

    /// The smallest TTL among all answers, if any answer carries one.
    pub fn min_ttl(&self) -> Option<u32> {
        self.answers.iter().filter_map(|answer| answer.ttl).min()
    }
}
