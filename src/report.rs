use crate::graph::BuildGraph;
use crate::hasher::GRAPH_BUILDER_VERSION;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One result per line
    Text,
    /// Machine-readable JSON
    Json,
}

#[derive(Debug, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub names: usize,
    pub builder_version: &'static str,
}

impl GraphStats {
    pub fn of(graph: &BuildGraph) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            names: graph.names.len(),
            builder_version: GRAPH_BUILDER_VERSION,
        }
    }
}

/// Reachability results, sorted for stable output
pub fn render_names(names: &HashSet<String>, format: OutputFormat) -> Result<String> {
    let mut sorted: Vec<&String> = names.iter().collect();
    sorted.sort();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&sorted)?),
        OutputFormat::Text => Ok(sorted
            .iter()
            .map(|n| n.as_str())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn render_paths(paths: &[Vec<String>], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(paths)?),
        OutputFormat::Text => {
            let arrow = format!(" {} ", "->".dimmed());
            Ok(paths
                .iter()
                .map(|p| p.join(arrow.as_str()))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

pub fn render_stats(stats: &GraphStats, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
        OutputFormat::Text => Ok(format!(
            "{} {}\n{} {}\n{} {}",
            "nodes:".bold(),
            stats.nodes,
            "edges:".bold(),
            stats.edges,
            "builder:".bold(),
            stats.builder_version
        )),
    }
}
