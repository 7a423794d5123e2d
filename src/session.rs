use crate::buildlog::{build_graph, parse_log, RuleFilter};
use crate::cache::{CacheLookup, GraphCache};
use crate::config::TravConfig;
use crate::error::{Result, TravlogError};
use crate::graph::BuildGraph;
use crate::hasher::CacheDescriptor;
use crate::query::NameFilter;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Load the graph for `log_bytes`, from the cache when it is current.
///
/// With no `cache_path` the graph is always rebuilt and nothing is written.
pub fn load_graph_from_bytes(
    log_bytes: &[u8],
    cache_path: Option<&Path>,
    rules: &RuleFilter,
) -> Result<BuildGraph> {
    let descriptor = CacheDescriptor::for_log(log_bytes);
    let cache = cache_path.map(GraphCache::new);

    if let Some(cache) = &cache {
        match cache.load(&descriptor)? {
            CacheLookup::Hit(graph) => return Ok(graph),
            CacheLookup::Miss(reason) => debug!(?reason, "rebuilding build graph"),
        }
    }

    let records = parse_log(log_bytes)?;
    let graph = build_graph(&records, |r| rules.accepts(r))?;

    if let Some(cache) = &cache {
        cache.store(&graph, &descriptor)?;
    }
    Ok(graph)
}

/// Read the build log under `config.build_dir` and load its graph.
pub fn load_build_graph(config: &TravConfig) -> Result<BuildGraph> {
    let log_path = config.log_path();
    let log_bytes = std::fs::read(&log_path).map_err(|e| TravlogError::io(&log_path, e))?;
    let cache_path = config.cache_path();
    load_graph_from_bytes(&log_bytes, cache_path.as_deref(), &config.rule_filter())
}

/// Leaf sources that feed the given targets
pub fn find_sources_from_targets<S: AsRef<str>>(
    config: &TravConfig,
    targets: &[S],
    filter: &NameFilter,
) -> Result<HashSet<String>> {
    load_build_graph(config)?.sources_from_targets(targets, filter)
}

/// Final targets that the given sources feed
pub fn find_targets_from_sources<S: AsRef<str>>(
    config: &TravConfig,
    sources: &[S],
    filter: &NameFilter,
) -> Result<HashSet<String>> {
    load_build_graph(config)?.targets_from_sources(sources, filter)
}

pub fn find_source_paths_from_targets<S: AsRef<str>>(
    config: &TravConfig,
    targets: &[S],
    filter: &NameFilter,
) -> Result<Vec<Vec<String>>> {
    load_build_graph(config)?.source_paths_from_targets(targets, filter)
}

pub fn find_target_paths_from_sources<S: AsRef<str>>(
    config: &TravConfig,
    sources: &[S],
    filter: &NameFilter,
) -> Result<Vec<Vec<String>>> {
    load_build_graph(config)?.target_paths_from_sources(sources, filter)
}
