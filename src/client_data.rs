use crate::{
    config::Config,
    query::QueryClient,
};
use std::{
    collections::BTreeMap,
    sync::Arc,
};

/// A tool to build cache stats
#[derive(Debug)]
pub struct CacheStatsBuilder {
    stats: BTreeMap<&'static str, BTreeMap<&'static str, f32>>,
}

impl CacheStatsBuilder {
    /// Make a new [`CacheStatsBuilder`].
    pub fn new() -> Self {
        Self {
            stats: BTreeMap::new(),
        }
    }

    /// Publish a stat to a section
    pub fn publish_stat(&mut self, section: &'static str, name: &'static str, value: f32) {
        self.stats.entry(section).or_default().insert(name, value);
    }

    /// Get the inner stats
    pub fn into_inner(self) -> BTreeMap<&'static str, BTreeMap<&'static str, f32>> {
        self.stats
    }
}

impl Default for CacheStatsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A type that can provide cache stats
pub trait CacheStatsProvider {
    /// Publish stats to the provided [`CacheStatsBuilder`].
    fn publish_cache_stats(&self, cache_stats_builder: &mut CacheStatsBuilder);
}

/// The state shared by every command
#[derive(Debug, Clone)]
pub struct ClientData {
    /// The config
    pub config: Arc<Config>,

    /// The caching api client
    pub query_client: QueryClient,
}

impl ClientData {
    /// Make the client data from a config
    pub fn init(config: Arc<Config>) -> anyhow::Result<Self> {
        let client = config.build_client()?;
        let query_client = QueryClient::new(client, config.stale_time());

        Ok(Self {
            config,
            query_client,
        })
    }

    /// Generate cache stats
    pub fn generate_cache_stats(&self) -> BTreeMap<&'static str, BTreeMap<&'static str, f32>> {
        let mut stat_builder = CacheStatsBuilder::new();

        let cache_stat_providers: &[&dyn CacheStatsProvider] = &[&self.query_client];

        for cache_stat_provider in cache_stat_providers {
            cache_stat_provider.publish_cache_stats(&mut stat_builder);
        }

        stat_builder.into_inner()
    }
}
