use std::collections::HashSet;
use std::slice::Iter;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use futures::Future;
use reqwest::header::ACCEPT;
use serde::Serialize;
use tokio::task;
use tracing::{debug, trace};

use crate::endpoint::EndpointConfig;
use crate::error::Errors;
use crate::resolver::dns_json::DnsJsonResponse;
use crate::resolver::{Error, MultiQuery, Resolver, ResolverResult, UniQuery};
use crate::resources::{Record, RecordType};
use crate::utils::serialize::ser_arc_endpoint_config;

#[derive(Debug, Clone, Serialize)]
pub struct Lookups {
    #[serde(rename = "lookups")]
    inner: Vec<Lookup>,
}

impl Lookups {
    #[allow(dead_code)]
    #[doc(hidden)]
    pub(crate) fn new(inner: Vec<Lookup>) -> Lookups {
        Lookups { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> Iter<Lookup> {
        self.inner.iter()
    }

    pub fn has_records(&self) -> bool {
        self.inner.iter().any(|x| x.result().is_response())
    }

    pub fn records_by_type(&self, record_type: RecordType) -> Vec<&Record> {
        self.inner
            .iter()
            .filter(|x| x.query().record_type == record_type)
            .filter_map(|x| x.result().response())
            .flat_map(|x| x.records())
            .collect()
    }

    pub fn record_types(&self) -> HashSet<RecordType> {
        self.inner
            .iter()
            .filter(|x| x.result().is_response())
            .map(|x| x.query().record_type)
            .collect()
    }
}

impl Errors for Lookups {
    fn errors(&self) -> Box<dyn Iterator<Item = Box<&dyn std::error::Error>> + '_> {
        Box::new(
            self.inner
                .iter()
                .filter_map(|lookup| lookup.result().err())
                .map(|err| Box::new(err as &dyn std::error::Error)),
        )
    }
}

impl IntoIterator for Lookups {
    type Item = Lookup;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl From<Vec<Lookup>> for Lookups {
    fn from(lookups: Vec<Lookup>) -> Self {
        Lookups { inner: lookups }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Lookup {
    query: UniQuery,
    #[serde(serialize_with = "ser_arc_endpoint_config")]
    endpoint: Arc<EndpointConfig>,
    result: LookupResult,
}

impl Lookup {
    #[allow(dead_code)]
    #[doc(hidden)]
    pub(crate) fn new(query: UniQuery, endpoint: Arc<EndpointConfig>, result: LookupResult) -> Lookup {
        Lookup { query, endpoint, result }
    }

    pub fn query(&self) -> &UniQuery {
        &self.query
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    pub fn result(&self) -> &LookupResult {
        &self.result
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum LookupResult {
    Response(Response),
    NxDomain(NxDomain),
    Error(Error),
}

impl LookupResult {
    pub fn is_response(&self) -> bool {
        matches!(self, LookupResult::Response { .. })
    }

    pub fn is_nxdomain(&self) -> bool {
        matches!(self, LookupResult::NxDomain { .. })
    }

    pub fn is_err(&self) -> bool {
        matches!(self, LookupResult::Error { .. })
    }

    pub fn response(&self) -> Option<&Response> {
        match self {
            LookupResult::Response(ref response) => Some(response),
            _ => None,
        }
    }

    pub fn nxdomain(&self) -> Option<&NxDomain> {
        match self {
            LookupResult::NxDomain(ref nxdomain) => Some(nxdomain),
            _ => None,
        }
    }

    pub fn err(&self) -> Option<&Error> {
        match self {
            LookupResult::Error(ref err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Response {
    records: Vec<Record>,
    response_time: Duration,
    valid_until: Option<DateTime<Utc>>,
}

impl Response {
    #[allow(dead_code)]
    #[doc(hidden)]
    pub(crate) fn new(records: Vec<Record>, response_time: Duration, valid_until: Option<DateTime<Utc>>) -> Response {
        Response {
            records,
            response_time,
            valid_until,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn response_time(&self) -> &Duration {
        &self.response_time
    }

    pub fn valid_until(&self) -> Option<&DateTime<Utc>> {
        self.valid_until.as_ref()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NxDomain {
    response_time: Duration,
}

impl NxDomain {
    #[allow(dead_code)]
    #[doc(hidden)]
    pub(crate) fn new(response_time: Duration) -> NxDomain {
        NxDomain { response_time }
    }

    pub fn response_time(&self) -> &Duration {
        &self.response_time
    }
}

pub async fn lookup<T: Into<MultiQuery>>(resolver: Resolver, query: T) -> ResolverResult<Lookups> {
    let query = query.into();

    let lookup_futures: Vec<_> = query
        .into_uni_queries()
        .drain(..)
        .map(|q| single_lookup(resolver.clone(), q))
        .collect();
    let lookups = sliding_window_lookups(lookup_futures, resolver.opts.max_concurrent_requests);
    let lookups = task::spawn(lookups).await?;

    Ok(lookups)
}

async fn single_lookup(resolver: Resolver, query: UniQuery) -> Lookup {
    let start_time = Instant::now();
    trace!(
        "Sending DoH query for '{}', record type {} to {}.",
        &query.name,
        &query.record_type,
        resolver.name()
    );
    let result = fetch(&resolver, &query).await.into_lookup(query.record_type, start_time);
    debug!(
        "Lookup returned for '{}', record type {} from {}: {}",
        &query.name,
        &query.record_type,
        resolver.name(),
        if result.is_err() { "error" } else { "ok" },
    );

    Lookup {
        query,
        endpoint: resolver.endpoint.clone(),
        result,
    }
}

/// Issues the HTTP GET of one sub-query and parses the body.
///
/// There is no request timeout and no retry; a sub-query runs to natural
/// completion or natural failure.
async fn fetch(resolver: &Resolver, query: &UniQuery) -> ResolverResult<DnsJsonResponse> {
    let record_type: &str = query.record_type.into();
    let res = resolver
        .http_client
        .get(resolver.endpoint.url())
        .query(&[("name", query.name()), ("type", record_type)])
        .header(ACCEPT, "application/dns-json")
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(Error::StatusError {
            code: res.status().as_u16(),
        });
    }

    let body = res.text().await?;
    let response = serde_json::from_str::<DnsJsonResponse>(&body)?;

    Ok(response)
}

async fn sliding_window_lookups(futures: Vec<impl Future<Output = Lookup>>, max_concurrent: usize) -> Lookups {
    stream::iter(futures)
        .buffer_unordered(max_concurrent)
        .inspect(|lookup| trace!("Received lookup {:?}", lookup))
        .collect::<Vec<_>>()
        .await
        .into()
}

#[doc(hidden)]
trait IntoLookup {
    fn into_lookup(self, record_type: RecordType, start_time: Instant) -> LookupResult;
}

#[doc(hidden)]
impl IntoLookup for ResolverResult<DnsJsonResponse> {
    fn into_lookup(self, record_type: RecordType, start_time: Instant) -> LookupResult {
        match self {
            Ok(response) if response.is_nx_domain() => LookupResult::NxDomain(NxDomain {
                response_time: Instant::now() - start_time,
            }),
            Ok(response) => LookupResult::Response(Response {
                records: response.records_for(record_type),
                response_time: Instant::now() - start_time,
                valid_until: response.min_ttl().map(ttl_to_utc),
            }),
            Err(err) => {
                debug!("Lookup error: {}", &err);
                LookupResult::Error(err)
            }
        }
    }
}

fn ttl_to_utc(ttl: u32) -> DateTime<Utc> {
    Utc::now() + chrono::Duration::seconds(i64::from(ttl))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::predefined;
    use spectral::prelude::*;

    fn lookups() -> Lookups {
        let endpoint = Arc::new(predefined::cloudflare::https());
        vec![
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
                LookupResult::Error(Error::StatusError { code: 500 }),
            ),
        ]
        .into()
    }

    #[test]
    fn has_records_and_records_by_type() {
        let lookups = lookups();

        assert_that(&lookups.has_records()).is_true();
        assert_that(&lookups.records_by_type(RecordType::A)).has_length(1);
        assert_that(&lookups.records_by_type(RecordType::TXT)).is_empty();
        assert_that(&lookups.record_types().contains(&RecordType::A)).is_true();
    }

    #[test]
    fn errors_yields_the_error_capsules() {
        let lookups = lookups();

        assert_that(&lookups.errors().count()).is_equal_to(1);
    }

    #[test]
    fn endpoint_serializes_as_display_string() {
        let lookups = lookups();

        let json = serde_json::to_value(&lookups).unwrap();

        let endpoint = json["lookups"][0]["endpoint"].as_str().unwrap();
        assert_that(&endpoint.contains("https://1.1.1.1/dns-query")).is_true();
    }
}
