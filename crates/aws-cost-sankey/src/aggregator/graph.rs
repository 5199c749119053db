//! The weighted, directed cost graph.
//!
//! A mapping `parent -> child -> amount`. By convention the tiers are
//! `all -> account -> environment -> category`, but the structure does not
//! enforce them: a label may be a child in one tier and a parent in the next.

use crate::sankey::view::{build_graph_view, GraphView};
use std::collections::HashMap;

/// Aggregated costs keyed by parent label, then child label
///
/// **Public** - built once per run by the aggregator, then read by the
/// projections. Owned by the caller; there is no process-wide instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostGraph {
    edges: HashMap<String, HashMap<String, f64>>,
}

impl CostGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `amount` onto the `(source, target)` edge
    pub fn add(&mut self, source: &str, target: &str, amount: f64) {
        *self
            .edges
            .entry(source.to_string())
            .or_default()
            .entry(target.to_string())
            .or_insert(0.0) += amount;
    }

    /// Overwrite the `(source, target)` edge with `amount`
    pub fn set(&mut self, source: &str, target: &str, amount: f64) {
        self.edges
            .entry(source.to_string())
            .or_default()
            .insert(target.to_string(), amount);
    }

    pub fn get(&self, source: &str, target: &str) -> Option<f64> {
        self.edges.get(source)?.get(target).copied()
    }

    /// Children of `parent` with their amounts
    pub fn children(&self, parent: &str) -> Option<&HashMap<String, f64>> {
        self.edges.get(parent)
    }

    /// Iterate over every `(parent, child, amount)` edge in unspecified order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.edges.iter().flat_map(|(parent, children)| {
            children
                .iter()
                .map(move |(child, amount)| (parent.as_str(), child.as_str(), *amount))
        })
    }

    /// Every edge sorted by parent then child
    pub fn sorted_edges(&self) -> Vec<(&str, &str, f64)> {
        let mut edges: Vec<_> = self.edges().collect();
        edges.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)));
        edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    /// Text projection, one `<parent> [<amount>] <child>` line per edge
    pub fn emit_text(&self) -> Vec<String> {
        crate::output::text::emit_text(self)
    }

    /// Graph-view projection keeping edges with `amount >= threshold`
    pub fn emit_graph_view(&self, threshold: f64) -> GraphView {
        build_graph_view(self, threshold)
    }
}
