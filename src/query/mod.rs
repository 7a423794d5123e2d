//! Reachability and path-enumeration queries over a [`BuildGraph`].
//!
//! Both query shapes walk breadth-first in one [`Direction`]. A step to a
//! candidate node is dropped when the candidate is an order-only dependency
//! or when the caller's predicate rejects its name; the graph itself is never
//! modified. A node with no remaining steps is an *effective sink*.

pub mod filter;

pub use filter::{is_order_only, NameFilter, ORDER_ONLY_MARKER};

use crate::error::{Result, TravlogError};
use crate::graph::{BuildGraph, NodeId};
use std::collections::{BTreeSet, HashSet, VecDeque};
use tracing::debug;

/// Which adjacency side a traversal follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Walk toward inputs: targets -> sources
    Dependencies,
    /// Walk toward outputs: sources -> targets
    Dependents,
}

impl Direction {
    fn steps(self, graph: &BuildGraph, id: NodeId) -> Option<&BTreeSet<NodeId>> {
        match self {
            Direction::Dependencies => graph.dag.predecessors(id),
            Direction::Dependents => graph.dag.successors(id),
        }
    }
}

impl BuildGraph {
    /// Resolve every start name, or fail listing all names that are unknown.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<NodeId>> {
        let mut ids = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.names.lookup_id(name.as_ref()) {
                Some(id) => ids.push(id),
                None => missing.push(name.as_ref().to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(TravlogError::UnresolvedStartNames { names: missing });
        }
        Ok(ids)
    }

    fn effective_steps<'g, P>(
        &'g self,
        id: NodeId,
        direction: Direction,
        accept: &'g P,
    ) -> impl Iterator<Item = NodeId> + 'g
    where
        P: Fn(&str) -> bool + 'g,
    {
        direction
            .steps(self, id)
            .into_iter()
            .flatten()
            .copied()
            .filter(move |&next| match self.names.lookup_name(next) {
                Some(name) => !is_order_only(name) && accept(name),
                None => false,
            })
    }

    fn name_of(&self, id: NodeId) -> String {
        self.names.lookup_name(id).unwrap_or_default().to_string()
    }

    /// Effective sinks reachable from `starts`, each node expanded once.
    pub fn find_ends<S, P>(
        &self,
        starts: &[S],
        direction: Direction,
        accept: P,
    ) -> Result<HashSet<String>>
    where
        S: AsRef<str>,
        P: Fn(&str) -> bool,
    {
        let start_ids = self.resolve(starts)?;
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut queue: VecDeque<NodeId> = VecDeque::new();
        for id in start_ids {
            if visited.insert(id) {
                queue.push_back(id);
            }
        }

        let mut ends = HashSet::new();
        while let Some(current) = queue.pop_front() {
            let mut has_step = false;
            for next in self.effective_steps(current, direction, &accept) {
                has_step = true;
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
            if !has_step {
                ends.insert(self.name_of(current));
            }
        }

        debug!(?direction, visited = visited.len(), ends = ends.len(), "find_ends done");
        Ok(ends)
    }

    /// Every chain from a start node to an effective sink, inclusive.
    ///
    /// Nodes are not de-duplicated: a node reached through k distinct chains
    /// is expanded k times, so the cost is bounded by the number of
    /// start-to-sink paths, which can grow exponentially on converging
    /// (diamond-shaped) graphs.
    pub fn find_paths<S, P>(
        &self,
        starts: &[S],
        direction: Direction,
        accept: P,
    ) -> Result<Vec<Vec<String>>>
    where
        S: AsRef<str>,
        P: Fn(&str) -> bool,
    {
        let start_ids = self.resolve(starts)?;
        let mut queue: VecDeque<Vec<NodeId>> = start_ids.into_iter().map(|id| vec![id]).collect();

        let mut paths = Vec::new();
        while let Some(path) = queue.pop_front() {
            let Some(&tail) = path.last() else {
                continue;
            };
            let mut has_step = false;
            for next in self.effective_steps(tail, direction, &accept) {
                has_step = true;
                let mut extended = path.clone();
                extended.push(next);
                queue.push_back(extended);
            }
            if !has_step {
                paths.push(path.iter().map(|&id| self.name_of(id)).collect());
            }
        }

        debug!(?direction, paths = paths.len(), "find_paths done");
        Ok(paths)
    }

    /// Leaf sources feeding the given targets
    pub fn sources_from_targets<S: AsRef<str>>(
        &self,
        targets: &[S],
        filter: &NameFilter,
    ) -> Result<HashSet<String>> {
        self.find_ends(targets, Direction::Dependencies, |n| filter.accepts(n))
    }

    /// Final targets built from the given sources
    pub fn targets_from_sources<S: AsRef<str>>(
        &self,
        sources: &[S],
        filter: &NameFilter,
    ) -> Result<HashSet<String>> {
        self.find_ends(sources, Direction::Dependents, |n| filter.accepts(n))
    }

    /// Paths from each target down to its leaf sources
    pub fn source_paths_from_targets<S: AsRef<str>>(
        &self,
        targets: &[S],
        filter: &NameFilter,
    ) -> Result<Vec<Vec<String>>> {
        self.find_paths(targets, Direction::Dependencies, |n| filter.accepts(n))
    }

    /// Paths from each source up to its final targets
    pub fn target_paths_from_sources<S: AsRef<str>>(
        &self,
        sources: &[S],
        filter: &NameFilter,
    ) -> Result<Vec<Vec<String>>> {
        self.find_paths(sources, Direction::Dependents, |n| filter.accepts(n))
    }
}
