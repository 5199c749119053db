//! Graph-view projection for Sankey rendering.
//!
//! Only edges at or above the threshold become links, and only labels
//! used by a surviving link become nodes. The underlying graph is not
//! pruned.

use crate::aggregator::graph::CostGraph;
use crate::aggregator::normalizer::passes_threshold;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A Sankey node (one per distinct label)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SankeyNode {
    pub name: String,
}

/// A Sankey link between two labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLink {
    pub source: String,
    pub target: String,
    pub value: f64,
}

/// Nodes and links handed to a renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<SankeyNode>,
    pub links: Vec<SankeyLink>,
}

impl GraphView {
    /// Set of node labels
    pub fn node_labels(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Build the graph view from the aggregated graph
///
/// **Public** - main entry point for the rendering projection
///
/// Links are ordered by parent then child label; nodes appear in the order
/// they are first referenced by a link.
pub fn build_graph_view(graph: &CostGraph, threshold: f64) -> GraphView {
    let links: Vec<SankeyLink> = graph
        .sorted_edges()
        .into_iter()
        .filter(|(_, _, amount)| passes_threshold(*amount, threshold))
        .map(|(source, target, value)| SankeyLink {
            source: source.to_string(),
            target: target.to_string(),
            value,
        })
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut nodes = Vec::new();
    for link in &links {
        for name in [link.source.as_str(), link.target.as_str()] {
            if seen.insert(name) {
                nodes.push(SankeyNode {
                    name: name.to_string(),
                });
            }
        }
    }

    debug!(
        "Graph view: {} of {} edges at or above {}, {} nodes",
        links.len(),
        graph.edge_count(),
        threshold,
        nodes.len()
    );

    GraphView { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_threshold_drops_edges_and_orphan_nodes() {
        let mut graph = CostGraph::new();
        graph.add("all", "acct1", 500.0);
        graph.add("acct1", "prod", 500.0);
        graph.add("prod", "EC2", 450.0);
        graph.add("prod", "S3", 50.0);

        let view = build_graph_view(&graph, 100.0);

        assert_eq!(view.links.len(), 3);
        assert!(!view.node_labels().contains("S3"));
        assert_eq!(view.nodes.len(), 4);
    }

    #[test]
    fn test_nodes_are_deduplicated() {
        let mut graph = CostGraph::new();
        graph.add("all", "acct1", 10.0);
        graph.add("acct1", "prod", 10.0);
        graph.add("prod", "EC2", 10.0);

        let view = build_graph_view(&graph, 0.0);
        let names: Vec<&str> = view.nodes.iter().map(|n| n.name.as_str()).collect();

        assert_eq!(names, vec!["acct1", "prod", "all", "EC2"]);
    }

    #[test]
    fn test_empty_view() {
        let mut graph = CostGraph::new();
        graph.add("prod", "EC2", 10.0);

        let view = build_graph_view(&graph, 11.0);
        assert!(view.is_empty());
        assert!(view.nodes.is_empty());
        // the graph itself keeps the edge
        assert_eq!(graph.get("prod", "EC2"), Some(10.0));
    }
}
