use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::resolver::{predefined, Lookups, MultiQuery, ResolverGroup};

pub struct AppResolver {
    resolvers: Arc<ResolverGroup>,
}

impl AppResolver {
    /// Creates the resolver group over the fixed predefined endpoint set.
    pub fn create_resolvers() -> Result<AppResolver> {
        let resolvers = ResolverGroup::from_configs(predefined::resolver_configs(), Default::default(), Default::default());
        if resolvers.is_empty() {
            return Err(anyhow!("empty resolver group"));
        }
        info!("Created {} resolvers.", resolvers.len());

        Ok(AppResolver {
            resolvers: Arc::new(resolvers),
        })
    }

    pub async fn lookup(&self, query: MultiQuery) -> Result<Lookups> {
        self.resolvers.lookup(query).await.context("Failed to execute lookups")
    }

    pub fn resolvers(&self) -> &ResolverGroup {
        &self.resolvers
    }
}
