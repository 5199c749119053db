use crate::aggregator::{apply_replay, calculate_cost_summary, CostGraph};
use crate::commands::generate::read_replay_file;
use crate::sankey::build_graph_view;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a replay dump file
///
/// Parses every line and rebuilds the graph; nothing is written.
pub fn validate_dump_file(file_path: PathBuf) -> Result<()> {
    println!("Validating dump: {}", file_path.display());

    let records = read_replay_file(&file_path)?;

    let mut graph = CostGraph::new();
    apply_replay(&mut graph, &records);

    let view = build_graph_view(&graph, 0.0);
    let summary = calculate_cost_summary(&graph, 0);

    println!("✓ Valid cost dump");
    println!("  Lines: {}", records.len());
    println!("  Edges: {}", graph.edge_count());
    println!("  Nodes: {}", view.nodes.len());
    println!("  Accounts: {}", summary.account_count);
    println!("  Total: ${:.2}", summary.total);

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("AWS Cost Sankey v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Aggregates AWS billing data into an account, environment and service Sankey diagram.");
}
