//! Aggregation of cost records into the three-tier cost graph.
//!
//! This module transforms flat source records into:
//! - The weighted `all -> account -> environment -> category` graph
//! - Normalized environment labels and rounded amounts
//! - Summary statistics for logging and terminal output

pub mod cost_builder;
pub mod graph;
pub mod metrics;
pub mod normalizer;

// Re-export main types and functions
pub use cost_builder::{apply_replay, build_cost_records, ingest_cost_groups};
pub use graph::CostGraph;
pub use metrics::{calculate_cost_summary, CostSummary};
pub use normalizer::{normalize_environment, passes_threshold, RoundingPolicy};
