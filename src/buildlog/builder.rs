use crate::buildlog::record::LogEntry;
use crate::error::Result;
use crate::graph::{BuildGraph, DependencyGraph, NameRegistry};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Convert build log entries into a dependency graph.
///
/// Entries whose rule `accept` rejects are skipped before validation. Every
/// accepted record contributes one edge from each of its inputs and headers
/// to its output. Inputs are registered before the output, so ids follow log
/// order. An input naming the record's own output adds no edge.
pub fn build_graph<F>(entries: &[LogEntry], accept: F) -> Result<BuildGraph>
where
    F: Fn(&str) -> bool,
{
    let mut names = NameRegistry::new();
    let mut dag = DependencyGraph::new();
    let mut skipped = 0usize;

    for (i, entry) in entries.iter().enumerate() {
        if !accept(entry.rule()) {
            skipped += 1;
            continue;
        }
        let record = entry.to_record(i + 1)?;

        let mut seen = HashSet::new();
        let in_ids: Vec<_> = record
            .inputs
            .iter()
            .chain(&record.headers)
            .filter(|name| seen.insert(name.as_str()))
            .map(|name| names.insert(name))
            .collect();
        let out_id = names.insert(&record.output);

        for in_id in in_ids {
            if in_id == out_id {
                warn!(
                    index = i + 1,
                    output = %record.output,
                    "record lists its output as an input"
                );
                continue;
            }
            dag.add_edge(in_id, out_id);
        }
    }

    debug!(
        records = entries.len(),
        skipped,
        nodes = dag.node_count(),
        edges = dag.edge_count(),
        "constructed build graph"
    );
    Ok(BuildGraph::new(names, dag))
}
