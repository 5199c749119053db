//! Input parsing and record definitions.
//!
//! This module handles:
//! - Raw grouped cost entries from the billing API
//! - Flat cost records fed to the aggregator
//! - Replayed text dumps from a previous run

pub mod replay;
pub mod schema;

// Re-export main types
pub use replay::{parse_replay, parse_replay_line};
pub use schema::{parse_amount, CostRecord, RawCostGroup};
