use std::borrow::Cow;

use clockabilly::{
    Clockable,
    UtcClock,
};
use tracing::*;

use super::*;
use crate::config::BuildLogConfig;
use crate::errors::*;
use crate::k8s::KubeRegistry;
use crate::prelude::*;

/// Read-only storage for the `BuildLog` resource: logs can be located and retrieved, but never
/// created, updated, listed or deleted.
pub struct BuildLogStorage {
    resolver: LogLocationResolver,
    fetcher: Box<dyn LogFetcher>,
    parser: LogParser,
    clock: Box<dyn Clockable + Send + Sync>,
}

impl BuildLogStorage {
    pub fn new(resolver: LogLocationResolver, fetcher: Box<dyn LogFetcher>, parser: LogParser) -> BuildLogStorage {
        BuildLogStorage { resolver, fetcher, parser, clock: Box::new(UtcClock::new()) }
    }

    pub fn from_config(client: kube::Client, config: &BuildLogConfig) -> anyhow::Result<BuildLogStorage> {
        let registry = KubeRegistry::new(client);
        let resolver = LogLocationResolver::new(
            Box::new(registry.clone()),
            Box::new(registry),
            config.proxy_base.clone(),
            &config.default_namespace,
        );
        let fetcher = HttpLogFetcher::new(config.fetch_timeout())?;
        Ok(BuildLogStorage::new(resolver, Box::new(fetcher), LogParser::new(config.parse_policy)))
    }

    pub fn with_clock(mut self, clock: Box<dyn Clockable + Send + Sync>) -> BuildLogStorage {
        self.clock = clock;
        self
    }

    pub async fn resource_location(&self, build_id: &str) -> anyhow::Result<String> {
        let locator = self
            .resolver
            .resolve(build_id)
            .await
            .with_context(|| format!("resolving log location for build {build_id}"))?;
        Ok(locator.url.into())
    }

    pub async fn get(&self, build_id: &str, cancel: &CancellationToken) -> anyhow::Result<BuildLog> {
        let locator = self
            .resolver
            .resolve(build_id)
            .await
            .with_context(|| format!("resolving log location for build {build_id}"))?;

        let raw = self
            .fetcher
            .fetch(&locator.url, cancel)
            .await
            .with_context(|| format!("fetching logs for build {build_id}"))?;

        let text = String::from_utf8_lossy(&raw);
        if let Cow::Owned(_) = text {
            warn!("logs for build {build_id} are not valid UTF-8; invalid bytes were replaced with U+FFFD");
        }
        let parsed = self
            .parser
            .parse(&text)
            .with_context(|| format!("parsing logs for build {build_id}"))?;
        info!(
            "retrieved {} log lines for build {build_id} ({} skipped)",
            parsed.items.len(),
            parsed.skipped_lines
        );

        let (ns, name) = self.resolver.split_build_id(build_id);
        Ok(BuildLog {
            build: format!("{ns}/{name}"),
            items: parsed.items,
            creation_timestamp: self.clock.now(),
            skipped_lines: parsed.skipped_lines,
        })
    }
}
