use std::sync::Arc;

use futures::stream::{self, StreamExt};
use futures::Future;
use tokio::task;

pub use aggregate::{aggregate, QueryState, ResultSet};
pub use error::Error;
pub use lookup::{Lookup, LookupResult, Lookups, NxDomain, Response};
pub use query::{MultiQuery, UniQuery};

use crate::endpoint::EndpointConfig;
use crate::resources::RecordType;

pub mod aggregate;
pub mod dns_json;
pub mod error;
pub mod lookup;
pub mod predefined;
pub mod query;

pub type ResolverResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct ResolverConfig {
    endpoint_config: EndpointConfig,
}

impl ResolverConfig {
    pub fn new(endpoint_config: EndpointConfig) -> Self {
        ResolverConfig { endpoint_config }
    }
}

impl From<EndpointConfig> for ResolverConfig {
    fn from(endpoint_config: EndpointConfig) -> Self {
        ResolverConfig { endpoint_config }
    }
}

#[derive(Debug, Clone)]
pub struct ResolverOpts {
    /// Maximum number of concurrent queries send with this resolver
    ///
    /// There is deliberately no timeout and no retry setting: sub-queries run
    /// to natural completion or natural failure.
    pub max_concurrent_requests: usize,
}

impl Default for ResolverOpts {
    fn default() -> Self {
        ResolverOpts {
            max_concurrent_requests: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Resolver {
    pub(crate) http_client: Arc<reqwest::Client>,
    pub(crate) endpoint: Arc<EndpointConfig>,
    pub(crate) opts: Arc<ResolverOpts>,
}

impl Resolver {
    pub fn new(config: ResolverConfig, opts: ResolverOpts) -> Self {
        Resolver {
            http_client: Arc::new(reqwest::Client::new()),
            endpoint: Arc::new(config.endpoint_config),
            opts: Arc::new(opts),
        }
    }

    pub async fn lookup<T: Into<MultiQuery>>(&self, query: T) -> ResolverResult<Lookups> {
        lookup::lookup(self.clone(), query).await
    }

    pub fn name(&self) -> String {
        self.endpoint.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct ResolverGroupOpts {
    /// Maximum number of concurrent active resolvers
    pub max_concurrent: usize,
}

impl Default for ResolverGroupOpts {
    fn default() -> Self {
        ResolverGroupOpts { max_concurrent: 10 }
    }
}

#[derive(Debug)]
pub struct ResolverGroup {
    pub(crate) resolvers: Vec<Resolver>,
    pub(crate) opts: ResolverGroupOpts,
}

impl ResolverGroup {
    pub fn new<T: Into<Vec<Resolver>>>(resolvers: T, opts: ResolverGroupOpts) -> Self {
        ResolverGroup {
            resolvers: resolvers.into(),
            opts,
        }
    }

    pub fn from_configs<T: IntoIterator<Item = ResolverConfig>>(
        configs: T,
        resolver_opts: ResolverOpts,
        opts: ResolverGroupOpts,
    ) -> Self {
        let resolvers: Vec<_> = configs
            .into_iter()
            .map(|config| Resolver::new(config, resolver_opts.clone()))
            .collect();

        Self::new(resolvers, opts)
    }

    pub async fn lookup<T: Into<MultiQuery>>(&self, query: T) -> ResolverResult<Lookups> {
        let multi_query = query.into();
        let mut resolvers = self.resolvers.clone();

        let lookup_futures: Vec<_> = resolvers
            .drain(..)
            .map(|resolver| lookup::lookup(resolver, multi_query.clone()))
            .collect();
        let lookups = sliding_window_lookups(lookup_futures, self.opts.max_concurrent);
        let lookups = task::spawn(lookups).await?;

        Ok(lookups)
    }

    /// Resolves all supported record types of `domain` against all resolvers
    /// of this group and merges the settled lookups into one aggregate state.
    ///
    /// Every invocation creates a fresh, independently owned query context;
    /// nothing carries over between invocations, and invoking again with the
    /// same domain re-executes the full fan-out.
    pub async fn resolve(&self, domain: &str) -> ResolverResult<QueryState> {
        let query = MultiQuery::multi_record(domain, RecordType::all());
        let lookups = self.lookup(query).await?;

        Ok(aggregate(domain, &lookups))
    }

    /// Merges this `ResolverGroup` with another
    ///
    /// Attention: the `ResolverGroupOpts` of this `ResolverGroup` will apply
    pub fn merge(&mut self, other: Self) {
        self.resolvers.extend(other.resolvers)
    }

    pub fn add(&mut self, resolver: Resolver) {
        self.resolvers.push(resolver)
    }

    pub fn resolvers(&self) -> &[Resolver] {
        &self.resolvers
    }

    pub fn opts(&self) -> &ResolverGroupOpts {
        &self.opts
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

async fn sliding_window_lookups(
    futures: Vec<impl Future<Output = ResolverResult<Lookups>>>,
    max_concurrent: usize,
) -> Lookups {
    stream::iter(futures)
        .buffer_unordered(max_concurrent)
        .collect::<Vec<_>>()
        .await
        .drain(..)
        // This flattening masks JoinErrors which occurred during the lookups. This is a conscious decision:
        // per-query errors are already captured inside the Lookup capsules, so the only errors left here are
        // panicked or cancelled tasks, and aborting the whole group for those would make the library fragile.
        .filter_map(|l| l.ok())
        .flatten()
        .collect::<Vec<_>>()
        .into()
}
