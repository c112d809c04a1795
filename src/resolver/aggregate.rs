//! Merging of the settled lookup capsules into the per-type result set.
//!
//! Every invocation of [`ResolverGroup::resolve`](crate::resolver::ResolverGroup::resolve)
//! owns a fresh `ResultSet`; results of distinct invocations are never merged.
//! Each sub-query accumulates into its own capsule and the capsules are merged
//! single-threadedly after all of them have settled, so no locking is needed.

use indexmap::IndexMap;
use serde::Serialize;

use crate::resolver::lookup::Lookups;
use crate::resources::{Record, RecordType};

/// The records of one domain, merged across all endpoints.
///
/// All four record types are always present as keys, possibly with empty
/// lists. Within a type, records are deduplicated and sorted by their string
/// form; network arrival order is not preserved.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSet {
    name: String,
    records: IndexMap<RecordType, Vec<Record>>,
}

impl ResultSet {
    pub fn new<N: Into<String>>(name: N) -> ResultSet {
        let mut records = IndexMap::with_capacity(RecordType::all().len());
        for record_type in RecordType::all() {
            records.insert(record_type, Vec::new());
        }

        ResultSet {
            name: name.into(),
            records,
        }
    }

    pub fn from_lookups(name: &str, lookups: &Lookups) -> ResultSet {
        let mut result_set = ResultSet::new(name);
        for lookup in lookups.iter() {
            if let Some(response) = lookup.result().response() {
                result_set.add(lookup.query().record_type(), response.records().iter().cloned());
            }
        }

        result_set
    }

    fn add<I: IntoIterator<Item = Record>>(&mut self, record_type: RecordType, new_records: I) {
        let records = self.records.entry(record_type).or_default();
        records.extend(new_records);
        records.sort();
        records.dedup();
    }

    /// The domain name this result set belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self, record_type: RecordType) -> &[Record] {
        self.records.get(&record_type).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The record types with at least one record, in presentation order.
    pub fn record_types(&self) -> impl Iterator<Item = RecordType> + '_ {
        self.records
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(record_type, _)| *record_type)
    }

    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(Vec::is_empty)
    }
}

/// Terminal state of one aggregation.
///
/// A pending aggregation is simply the not-yet-completed future returned by
/// `resolve`; once all sub-queries have settled, the state is exactly one of
/// these two variants. Any single failed sub-query taints the whole
/// aggregation, even though the remaining sub-queries ran to completion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryState {
    Ready(ResultSet),
    Errored(String),
}

impl QueryState {
    pub fn is_ready(&self) -> bool {
        matches!(self, QueryState::Ready { .. })
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, QueryState::Errored { .. })
    }

    pub fn result_set(&self) -> Option<&ResultSet> {
        match self {
            QueryState::Ready(ref result_set) => Some(result_set),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Errored(ref narrative) => Some(narrative),
            _ => None,
        }
    }
}

/// Joins the settled lookups of one domain into the aggregate state.
///
/// Ready iff every sub-query succeeded; otherwise errored with the failure
/// messages concatenated, unattributed to endpoint or record type.
pub fn aggregate(name: &str, lookups: &Lookups) -> QueryState {
    let errors: Vec<_> = lookups
        .iter()
        .filter_map(|lookup| lookup.result().err())
        .map(ToString::to_string)
        .collect();

    if errors.is_empty() {
        QueryState::Ready(ResultSet::from_lookups(name, lookups))
    } else {
        QueryState::Errored(errors.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{predefined, EndpointConfig};
    use crate::resolver::lookup::{Lookup, LookupResult, NxDomain, Response};
    use crate::resolver::{Error, UniQuery};
    use spectral::prelude::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn cloudflare() -> Arc<EndpointConfig> {
        Arc::new(predefined::cloudflare::https())
    }

    fn alidns() -> Arc<EndpointConfig> {
        Arc::new(predefined::alidns::https())
    }

    fn response_lookup(
        name: &str,
        record_type: RecordType,
        endpoint: Arc<EndpointConfig>,
        records: Vec<Record>,
    ) -> Lookup {
        Lookup::new(
            UniQuery::new(name, record_type),
            endpoint,
            LookupResult::Response(Response::new(records, Duration::from_millis(10), None)),
        )
    }

    fn nxdomain_lookup(name: &str, record_type: RecordType, endpoint: Arc<EndpointConfig>) -> Lookup {
        Lookup::new(
            UniQuery::new(name, record_type),
            endpoint,
            LookupResult::NxDomain(NxDomain::new(Duration::from_millis(10))),
        )
    }

    fn error_lookup(name: &str, record_type: RecordType, endpoint: Arc<EndpointConfig>, error: Error) -> Lookup {
        Lookup::new(UniQuery::new(name, record_type), endpoint, LookupResult::Error(error))
    }

    #[test]
    fn all_record_types_are_present_even_when_empty() {
        let result_set = ResultSet::new("nonexistent.invalid");

        assert_that(&result_set.is_empty()).is_true();
        for record_type in RecordType::all() {
            assert_that(&result_set.records(record_type).to_vec()).is_empty();
        }
        assert_that(&result_set.record_types().count()).is_equal_to(0);
    }

    #[test]
    fn identical_records_from_both_endpoints_are_merged_once() {
        let record = Record::new("example.com.", "93.184.216.34");
        let lookups: Lookups = vec![
            response_lookup("example.com", RecordType::A, cloudflare(), vec![record.clone()]),
            response_lookup("example.com", RecordType::A, alidns(), vec![record.clone()]),
        ]
        .into();

        let result_set = ResultSet::from_lookups("example.com", &lookups);

        assert_that(&result_set.records(RecordType::A).to_vec()).has_length(1);
        assert_that(&result_set.len()).is_equal_to(1);
    }

    #[test]
    fn records_are_sorted_by_string_form() {
        let lookups: Lookups = vec![
            response_lookup(
                "example.com",
                RecordType::A,
                cloudflare(),
                vec![
                    Record::new("example.com.", "93.184.216.34"),
                    Record::new("example.com.", "192.0.2.1"),
                ],
            ),
            response_lookup(
                "example.com",
                RecordType::A,
                alidns(),
                vec![Record::new("example.com.", "192.0.2.0")],
            ),
        ]
        .into();

        let result_set = ResultSet::from_lookups("example.com", &lookups);

        let rendered: Vec<_> = result_set
            .records(RecordType::A)
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut sorted = rendered.clone();
        sorted.sort();
        assert_that(&rendered).has_length(3);
        assert_that(&rendered).is_equal_to(&sorted);
    }

    #[test]
    fn records_stay_with_their_record_type() {
        let lookups: Lookups = vec![
            response_lookup(
                "www.example.com",
                RecordType::A,
                cloudflare(),
                vec![Record::new("example.com.", "93.184.216.34")],
            ),
            response_lookup(
                "www.example.com",
                RecordType::CNAME,
                cloudflare(),
                vec![Record::new("www.example.com.", "example.com.")],
            ),
        ]
        .into();

        let result_set = ResultSet::from_lookups("www.example.com", &lookups);

        assert_that(&result_set.records(RecordType::A).to_vec()).has_length(1);
        assert_that(&result_set.records(RecordType::CNAME).to_vec()).has_length(1);
        assert_that(&result_set.records(RecordType::AAAA).to_vec()).is_empty();
        assert_that(&result_set.records(RecordType::TXT).to_vec()).is_empty();
    }

    #[test]
    fn all_successes_aggregate_to_ready() {
        let lookups: Lookups = vec![
            response_lookup(
                "example.com",
                RecordType::A,
                cloudflare(),
                vec![Record::new("example.com.", "93.184.216.34")],
            ),
            nxdomain_lookup("example.com", RecordType::AAAA, cloudflare()),
        ]
        .into();

        let state = aggregate("example.com", &lookups);

        assert_that(&state.is_ready()).is_true();
        assert_that(&state.result_set().unwrap().len()).is_equal_to(1);
    }

    #[test]
    fn all_nxdomains_aggregate_to_ready_and_empty() {
        let lookups: Lookups = RecordType::all()
            .iter()
            .map(|rt| nxdomain_lookup("nonexistent.invalid", *rt, cloudflare()))
            .collect::<Vec<_>>()
            .into();

        let state = aggregate("nonexistent.invalid", &lookups);

        assert_that(&state.is_ready()).is_true();
        assert_that(&state.result_set().unwrap().is_empty()).is_true();
    }

    #[test]
    fn a_single_failure_taints_the_aggregate() {
        let mut lookups = vec![error_lookup(
            "example.com",
            RecordType::TXT,
            alidns(),
            Error::StatusError { code: 500 },
        )];
        for record_type in RecordType::all() {
            lookups.push(response_lookup(
                "example.com",
                record_type,
                cloudflare(),
                vec![Record::new("example.com.", "x")],
            ));
        }
        let lookups: Lookups = lookups.into();

        let state = aggregate("example.com", &lookups);

        assert_that(&state.is_errored()).is_true();
        assert_that(&state.error().unwrap().contains("500")).is_true();
        // the other sub-queries still ran to completion
        let settled_responses = lookups.iter().filter(|l| l.result().is_response()).count();
        assert_that(&settled_responses).is_equal_to(4);
    }

    #[test]
    fn error_narrative_concatenates_all_failures() {
        let lookups: Lookups = vec![
            error_lookup(
                "example.com",
                RecordType::A,
                cloudflare(),
                Error::HttpError {
                    reason: "connection refused".to_string(),
                },
            ),
            error_lookup("example.com", RecordType::TXT, alidns(), Error::StatusError { code: 429 }),
        ]
        .into();

        let state = aggregate("example.com", &lookups);

        let narrative = state.error().unwrap();
        assert_that(&narrative.contains("connection refused")).is_true();
        assert_that(&narrative.contains("429")).is_true();
        assert_that(&narrative.lines().count()).is_equal_to(2);
    }

    #[test]
    fn queries_for_different_domains_stay_independent() {
        let com_lookups: Lookups = vec![response_lookup(
            "example.com",
            RecordType::A,
            cloudflare(),
            vec![Record::new("example.com.", "93.184.216.34")],
        )]
        .into();
        let org_lookups: Lookups = vec![response_lookup("example.org", RecordType::A, cloudflare(), Vec::new())].into();

        let com_state = aggregate("example.com", &com_lookups);
        let org_state = aggregate("example.org", &org_lookups);

        let org_set = org_state.result_set().unwrap();
        assert_that(&org_set.name()).is_equal_to("example.org");
        assert_that(&org_set.is_empty()).is_true();
        assert_that(&com_state.result_set().unwrap().len()).is_equal_to(1);
    }

    #[test]
    fn query_state_serializes_lowercase_tagged() {
        let state = aggregate("nonexistent.invalid", &Lookups::new(Vec::new()));

        let json = serde_json::to_value(&state).unwrap();

        assert_that(&json.get("ready").is_some()).is_true();
    }
}
