//! Plain-text projection of the cost graph.
//!
//! One edge per line, `<parent> [<amount>] <child>`, amounts always with
//! two fraction digits. The output can be fed back through the replay
//! parser as long as no parent label contains whitespace; only the child
//! label may span several tokens.

use super::write_file;
use crate::aggregator::graph::CostGraph;
use crate::utils::error::RenderError;
use log::info;
use std::path::Path;

/// Format a single edge line
pub fn format_edge_line(parent: &str, amount: f64, child: &str) -> String {
    format!("{} [{:.2}] {}", parent, amount, child)
}

/// Build the text projection
///
/// **Public** - read-only pass over a finished graph
///
/// Lines are sorted by parent then child so repeated runs diff cleanly;
/// consumers should still treat the output as a multiset.
pub fn emit_text(graph: &CostGraph) -> Vec<String> {
    graph
        .sorted_edges()
        .into_iter()
        .map(|(parent, child, amount)| format_edge_line(parent, amount, child))
        .collect()
}

/// Write text lines to a file, newline terminated
///
/// # Errors
/// * `RenderError::WriteFailed` - I/O error during write
/// * `RenderError::InvalidPath` - Path is invalid
pub fn write_text(lines: &[String], output_path: impl AsRef<Path>) -> Result<(), RenderError> {
    let output_path = output_path.as_ref();

    info!("Writing text output to: {}", output_path.display());

    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }

    write_file(&content, output_path)?;

    info!("Text output written successfully ({} lines)", lines.len());
    Ok(())
}
