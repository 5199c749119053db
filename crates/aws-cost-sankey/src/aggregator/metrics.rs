//! Summary statistics over a finished cost graph.
//!
//! Read-only: the graph must be fully aggregated before calling in here.

use super::graph::CostGraph;
use crate::parser::schema::CostRecord;
use crate::utils::config::ROOT_LABEL;
use log::debug;
use std::collections::HashSet;

/// Cost totals per tier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostSummary {
    /// Sum of every `all -> account` edge
    pub total: f64,

    /// Number of accounts under the root
    pub account_count: usize,

    /// Number of distinct environments under those accounts
    pub environment_count: usize,

    /// Number of edges in the whole graph
    pub edge_count: usize,

    /// Largest `environment -> category` edges, descending
    pub top_categories: Vec<CostRecord>,
}

impl CostSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging
    pub fn summary(&self) -> String {
        format!(
            "Total: ${:.2} | Accounts: {} | Environments: {} | Edges: {}",
            self.total, self.account_count, self.environment_count, self.edge_count
        )
    }
}

/// Calculate cost summary from the aggregated graph
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `graph` - Aggregated cost graph
/// * `top_n` - Number of largest category edges to return
pub fn calculate_cost_summary(graph: &CostGraph, top_n: usize) -> CostSummary {
    let accounts: Vec<&str> = graph
        .children(ROOT_LABEL)
        .map(|children| children.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let total: f64 = graph
        .children(ROOT_LABEL)
        .map(|children| children.values().sum())
        .unwrap_or(0.0);

    let environments: HashSet<&str> = accounts
        .iter()
        .filter_map(|account| graph.children(account))
        .flat_map(|children| children.keys().map(String::as_str))
        .collect();

    let mut top_categories: Vec<CostRecord> = graph
        .edges()
        .filter(|(parent, _, _)| environments.contains(parent))
        .map(|(parent, child, amount)| CostRecord::new(parent, child, amount))
        .collect();

    top_categories.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.target.cmp(&b.target))
    });
    top_categories.truncate(top_n);

    debug!(
        "Summarized {} accounts, {} environments",
        accounts.len(),
        environments.len()
    );

    CostSummary {
        total,
        account_count: accounts.len(),
        environment_count: environments.len(),
        edge_count: graph.edge_count(),
        top_categories,
    }
}
