use crate::error::{Result, TravlogError};
use crate::graph::{dag, BuildGraph, DependencyGraph, NameRegistry};
use crate::hasher::CacheDescriptor;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Why a persisted graph was not reused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    /// No cache file at the location
    Absent,
    /// Descriptor line differs from the current one
    Stale,
    /// Descriptor matched but the body could not be decoded
    Corrupt,
}

#[derive(Debug)]
pub enum CacheLookup {
    Hit(BuildGraph),
    Miss(MissReason),
}

/// Text cache of a built graph, gated by a [`CacheDescriptor`].
///
/// Layout, one item per line:
///
/// ```text
/// # <builder-version>:<sha256-hex>
/// # N: <nodes> E: <edges>
/// ec <edge-count>
/// io <id> ^ {<prev ids>} ^ {<next ids>}
/// id <id> ^ <name>
/// ```
///
/// Blank lines and lines without a known sigil are ignored on read.
pub struct GraphCache {
    path: PathBuf,
}

impl GraphCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the graph if the stored descriptor matches `descriptor`.
    ///
    /// A stale or undecodable cache file is deleted before reporting a miss.
    pub fn load(&self, descriptor: &CacheDescriptor) -> Result<CacheLookup> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no graph cache");
                return Ok(CacheLookup::Miss(MissReason::Absent));
            }
            // unreadable bytes are as good as a stale cache
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                self.discard()?;
                return Ok(CacheLookup::Miss(MissReason::Corrupt));
            }
            Err(e) => return Err(TravlogError::io(&self.path, e)),
        };

        let (first, body) = text.split_once('\n').unwrap_or((text.as_str(), ""));
        let stored = first.trim_start_matches('#').trim();
        if stored != descriptor.token() {
            debug!(stored, current = %descriptor, "graph cache is stale");
            self.discard()?;
            return Ok(CacheLookup::Miss(MissReason::Stale));
        }

        match decode(body) {
            Ok(graph) => {
                debug!(
                    nodes = graph.node_count(),
                    edges = graph.edge_count(),
                    "graph cache hit"
                );
                Ok(CacheLookup::Hit(graph))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding corrupt graph cache");
                self.discard()?;
                Ok(CacheLookup::Miss(MissReason::Corrupt))
            }
        }
    }

    /// Writes the full cache, replacing any existing file.
    ///
    /// The text goes to a sibling temp file first and is renamed into place.
    pub fn store(&self, graph: &BuildGraph, descriptor: &CacheDescriptor) -> Result<()> {
        let text = encode(graph, descriptor);
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text).map_err(|e| TravlogError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| TravlogError::io(&self.path, e))?;
        info!(
            path = %self.path.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "wrote graph cache"
        );
        Ok(())
    }

    fn discard(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TravlogError::io(&self.path, e)),
        }
    }
}

/// Serializes `graph` with `descriptor` as the leading line.
pub fn encode(graph: &BuildGraph, descriptor: &CacheDescriptor) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {descriptor}\n"));
    out.push_str(&format!(
        "\n# N: {} E: {}\n# generated {}\n",
        graph.node_count(),
        graph.edge_count(),
        chrono::Utc::now().to_rfc3339()
    ));
    out.push_str(&format!("{} {}\n\n", dag::EDGE_COUNT_SIGIL, graph.edge_count()));
    out.push_str("# id prevs nexts\n");
    out.push_str(&graph.dag.to_string());
    out.push_str("\n# id name\n");
    out.push_str(&graph.names.to_string());
    out
}

/// Decodes everything after the descriptor line.
pub fn decode(body: &str) -> Result<BuildGraph> {
    let dag = DependencyGraph::from_repr(body)?;
    let names = NameRegistry::from_repr(body)?;
    Ok(BuildGraph::new(names, dag))
}
