//! Sankey projection and chart generation.
//!
//! This module converts the aggregated cost graph into nodes and links,
//! then into an interactive HTML chart.

pub mod generator;
pub mod view;

// Re-export main types
pub use generator::{generate_sankey_html, ChartOptions, GraphRenderer, SankeyHtmlRenderer};
pub use view::{build_graph_view, GraphView, SankeyLink, SankeyNode};
