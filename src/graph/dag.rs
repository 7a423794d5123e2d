use crate::error::{Result, TravlogError};
use crate::graph::NodeId;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Line prefix of a node record in the serialized cache
pub const SIGIL: &str = "io";
/// Line prefix of the persisted edge tally
pub const EDGE_COUNT_SIGIL: &str = "ec";
/// Separator between id, prevs and nexts
pub const SEP: char = '^';

/// Adjacency of a single node: what it is built from, and what is built from it
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    /// Direct dependencies (edges pointing into this node)
    pub prevs: BTreeSet<NodeId>,
    /// Direct dependents (edges pointing out of this node)
    pub nexts: BTreeSet<NodeId>,
}

/// Directed acyclic dependency graph, ever growing.
///
/// An edge `u -> v` means `v` is produced from `u`. Acyclicity is assumed,
/// never checked.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    nodes: BTreeMap<NodeId, NodeRecord>,
    /// Number of `add_edge` calls, duplicates included
    edge_count: usize,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        debug_assert_ne!(from, to, "self-loop on node {from}");
        if from == to {
            tracing::error!(node = %from, "refusing to add self-loop");
            return;
        }
        self.edge_count += 1;
        self.nodes.entry(from).or_default().nexts.insert(to);
        self.nodes.entry(to).or_default().prevs.insert(from);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(&id)
    }

    pub fn successors(&self, id: NodeId) -> Option<&BTreeSet<NodeId>> {
        self.nodes.get(&id).map(|rec| &rec.nexts)
    }

    pub fn predecessors(&self, id: NodeId) -> Option<&BTreeSet<NodeId>> {
        self.nodes.get(&id).map(|rec| &rec.prevs)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeRecord)> {
        self.nodes.iter().map(|(&id, rec)| (id, rec))
    }

    /// Number of distinct edges, which can be lower than [`Self::edge_count`]
    pub fn distinct_edge_count(&self) -> usize {
        self.nodes.values().map(|rec| rec.nexts.len()).sum()
    }

    /// Rebuilds a graph from `io` and `ec` lines, skipping everything else.
    ///
    /// Without an `ec` line the tally falls back to the distinct edge count.
    pub fn from_repr(text: &str) -> Result<Self> {
        let mut nodes = BTreeMap::new();
        let mut edge_count = None;
        for (lineno, line) in text.lines().enumerate() {
            let malformed = |reason: String| TravlogError::CacheFormat {
                line: lineno + 1,
                reason,
            };
            if let Some(rest) = strip_sigil(line, EDGE_COUNT_SIGIL) {
                let count = rest
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| malformed(format!("bad edge count: {e}")))?;
                edge_count = Some(count);
                continue;
            }
            let Some(rest) = strip_sigil(line, SIGIL) else {
                continue;
            };
            let mut fields = rest.splitn(3, SEP);
            let (Some(id), Some(prevs), Some(nexts)) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(malformed("expected '<id> ^ <prevs> ^ <nexts>'".to_string()));
            };
            let id = id
                .trim()
                .parse::<usize>()
                .map_err(|e| malformed(format!("bad node id: {e}")))?;
            let record = NodeRecord {
                prevs: parse_id_set(prevs).map_err(&malformed)?,
                nexts: parse_id_set(nexts).map_err(&malformed)?,
            };
            nodes.insert(NodeId(id), record);
        }
        let mut dag = Self {
            nodes,
            edge_count: 0,
        };
        dag.edge_count = edge_count.unwrap_or_else(|| dag.distinct_edge_count());
        Ok(dag)
    }
}

fn strip_sigil<'a>(line: &'a str, sigil: &str) -> Option<&'a str> {
    line.strip_prefix(sigil).filter(|rest| rest.starts_with(' '))
}

fn parse_id_set(field: &str) -> std::result::Result<BTreeSet<NodeId>, String> {
    let inner = field
        .trim()
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| format!("expected braces around id set, got '{}'", field.trim()))?;
    inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map(NodeId)
                .map_err(|e| format!("bad id '{s}' in set: {e}"))
        })
        .collect()
}

fn write_id_set(f: &mut fmt::Formatter<'_>, set: &BTreeSet<NodeId>) -> fmt::Result {
    f.write_str("{")?;
    for (i, id) in set.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{id}")?;
    }
    f.write_str("}")
}

impl fmt::Display for DependencyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, rec) in self.iter() {
            write!(f, "{SIGIL} {id} {SEP} ")?;
            write_id_set(f, &rec.prevs)?;
            write!(f, " {SEP} ")?;
            write_id_set(f, &rec.nexts)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
