use std::time::Instant;

use anyhow::Result;
use tracing::info;

use crate::app::console::{Console, ConsoleOpts};
use crate::app::modules::resolve::config::ResolveConfig;
use crate::app::resolver::AppResolver;
use crate::app::{output, AppConfig, ExitStatus};
use crate::resolver::{aggregate, MultiQuery, QueryState};
use crate::resources::RecordType;

pub struct Resolve {}

impl Resolve {
    pub async fn init<'a>(app_config: &'a AppConfig, config: &'a ResolveConfig) -> Result<DohLookups<'a>> {
        let console = Console::new(ConsoleOpts::from(app_config));
        let query = MultiQuery::multi_record(config.domain_name.as_str(), RecordType::all());
        let app_resolver = AppResolver::create_resolvers()?;

        if console.not_quiet() {
            console.caption(format!("Running DoH lookups for {}.", config.domain_name));
            console.print_lookup_estimates(app_resolver.resolvers(), &query);
        }

        Ok(DohLookups {
            app_config,
            config,
            query,
            app_resolver,
            console,
        })
    }
}

pub struct DohLookups<'a> {
    app_config: &'a AppConfig,
    config: &'a ResolveConfig,
    query: MultiQuery,
    app_resolver: AppResolver,
    console: Console,
}

impl<'a> DohLookups<'a> {
    pub async fn lookups(self) -> Result<OutputState<'a>> {
        info!("Running lookups");
        let start_time = Instant::now();
        let lookups = self.app_resolver.lookup(self.query).await?;
        let total_run_time = Instant::now() - start_time;
        info!("Finished lookups.");

        if self.console.not_quiet() {
            self.console.print_statistics(&lookups, total_run_time);
        }

        if self.console.show_errors() {
            self.console.print_error_counts(&lookups);
        }

        let state = aggregate(&self.config.domain_name, &lookups);

        Ok(OutputState {
            app_config: self.app_config,
            state,
        })
    }
}

pub struct OutputState<'a> {
    app_config: &'a AppConfig,
    state: QueryState,
}

impl OutputState<'_> {
    pub fn output(self) -> Result<ExitStatus> {
        output::output(&self.app_config.output_config, &self.state)?;

        if self.state.is_errored() {
            Ok(ExitStatus::Failed)
        } else {
            Ok(ExitStatus::Ok)
        }
    }
}
