pub mod dag;
pub mod registry;

pub use dag::{DependencyGraph, NodeRecord};
pub use registry::NameRegistry;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense handle for a node name, assigned in insertion order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A name registry and its dependency graph, built or loaded together.
///
/// Read-only once constructed; queries in [`crate::query`] borrow it immutably.
#[derive(Debug, Default)]
pub struct BuildGraph {
    pub names: NameRegistry,
    pub dag: DependencyGraph,
}

impl BuildGraph {
    pub fn new(names: NameRegistry, dag: DependencyGraph) -> Self {
        Self { names, dag }
    }

    pub fn node_count(&self) -> usize {
        self.dag.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.dag.edge_count()
    }
}
