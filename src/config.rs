use crate::buildlog::{RuleFilter, DEFAULT_RULES};
use std::path::{Path, PathBuf};

/// Build log file name under the build output directory
pub const BUILD_LOG_BASENAME: &str = "build_log.json";
/// Graph cache file name under the build output directory
pub const GRAPH_CACHE_BASENAME: &str = "graph.cache";

/// Where the build log and graph cache live, and which records count
#[derive(Debug, Clone)]
pub struct TravConfig {
    pub build_dir: PathBuf,
    pub log_basename: String,
    pub cache_basename: String,
    pub use_cache: bool,
    pub rules: Vec<String>,
}

impl Default for TravConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("."),
            log_basename: BUILD_LOG_BASENAME.to_string(),
            cache_basename: GRAPH_CACHE_BASENAME.to_string(),
            use_cache: true,
            rules: DEFAULT_RULES.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl TravConfig {
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Replaces the rule allow-list; an empty list keeps the defaults.
    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rules: Vec<String> = rules.into_iter().map(Into::into).collect();
        if !rules.is_empty() {
            self.rules = rules;
        }
        self
    }

    pub fn log_path(&self) -> PathBuf {
        self.build_dir.join(&self.log_basename)
    }

    /// `None` when caching is disabled
    pub fn cache_path(&self) -> Option<PathBuf> {
        self.use_cache
            .then(|| self.build_dir.join(&self.cache_basename))
    }

    pub fn rule_filter(&self) -> RuleFilter {
        RuleFilter::new(self.rules.iter().cloned())
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }
}
